// src/services/file_service.rs

use std::{path::Path, sync::Arc};

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FileRepository, ProjectRepository},
    models::file::{ProjectFile, StoredFile},
    services::blob_storage::BlobStorage,
};

const FILE_NOT_FOUND: &str = "Arquivo não encontrado.";

/// Anexos de projeto: metadados no Postgres, conteúdo no blob storage.
#[derive(Clone)]
pub struct ProjectFileService {
    projects: Arc<dyn ProjectRepository>,
    files: Arc<dyn FileRepository>,
    storage: Arc<dyn BlobStorage>,
}

impl ProjectFileService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        files: Arc<dyn FileRepository>,
        storage: Arc<dyn BlobStorage>,
    ) -> Self {
        Self {
            projects,
            files,
            storage,
        }
    }

    pub async fn upload(
        &self,
        project_id: Uuid,
        original_name: &str,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<StoredFile, AppError> {
        self.ensure_project(project_id).await?;

        if bytes.is_empty() {
            return Err(AppError::validation("Nenhum arquivo foi enviado."));
        }

        let (file_name, file_extension) = split_file_name(original_name);
        let file_id = Uuid::new_v4();
        let blob_key = format!("projects/{}/{}{}", project_id, file_id, file_extension);
        let file_size = Decimal::from(bytes.len() as u64);

        let file_url = self.storage.upload(&blob_key, bytes, content_type).await?;

        let now = Utc::now();
        let file = StoredFile {
            id: file_id,
            file_name,
            file_extension,
            file_url,
            blob_key,
            file_size,
            created_at: now,
        };
        let link = ProjectFile {
            id: Uuid::new_v4(),
            project_id,
            file_id,
            created_at: now,
        };

        if let Err(e) = self.files.add_file_for_project(&file, &link).await {
            // Não deixa blob órfão quando o registro falha
            if let Err(cleanup) = self.storage.delete(&file.blob_key).await {
                tracing::warn!("⚠️ Falha ao remover o blob órfão '{}': {}", file.blob_key, cleanup);
            }
            return Err(e);
        }

        tracing::info!("📎 Arquivo {} anexado ao projeto {}.", file.id, project_id);
        Ok(file)
    }

    pub async fn list(&self, project_id: Uuid) -> Result<Vec<StoredFile>, AppError> {
        self.ensure_project(project_id).await?;
        self.files.list_by_project(project_id).await
    }

    pub async fn download(&self, project_id: Uuid, file_id: Uuid) -> Result<(StoredFile, Vec<u8>), AppError> {
        let file = self.find_linked(project_id, file_id).await?.1;
        let bytes = self.storage.download(&file.blob_key).await?;

        Ok((file, bytes))
    }

    pub async fn delete(&self, project_id: Uuid, file_id: Uuid) -> Result<(), AppError> {
        let (link, file) = self.find_linked(project_id, file_id).await?;

        self.storage.delete(&file.blob_key).await?;
        self.files.delete_link_and_file(&link).await?;

        tracing::info!("🗑️ Arquivo {} removido do projeto {}.", file_id, project_id);
        Ok(())
    }

    /// Remove todos os anexos do projeto antes de o projeto ser apagado.
    /// A cascata do banco só alcança os vínculos; arquivos e blobs ficariam órfãos.
    pub async fn delete_all_for_project(&self, project_id: Uuid) -> Result<(), AppError> {
        self.ensure_project(project_id).await?;

        let attached = self.files.list_by_project(project_id).await?;
        for file in &attached {
            self.storage.delete(&file.blob_key).await?;

            // Sem vínculo, só o blob existia
            if let Some(link) = self.files.get_link(project_id, file.id).await? {
                self.files.delete_link_and_file(&link).await?;
            }
        }

        if !attached.is_empty() {
            tracing::info!("🗑️ {} anexo(s) removido(s) do projeto {}.", attached.len(), project_id);
        }
        Ok(())
    }

    async fn ensure_project(&self, project_id: Uuid) -> Result<(), AppError> {
        match self.projects.get_by_id(project_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("Projeto não encontrado.")),
        }
    }

    async fn find_linked(&self, project_id: Uuid, file_id: Uuid) -> Result<(ProjectFile, StoredFile), AppError> {
        let link = self
            .files
            .get_link(project_id, file_id)
            .await?
            .ok_or_else(|| AppError::not_found(FILE_NOT_FOUND))?;

        let file = self
            .files
            .get_file(link.file_id)
            .await?
            .ok_or_else(|| AppError::not_found(FILE_NOT_FOUND))?;

        Ok((link, file))
    }
}

/// "contrato.final.PDF" -> ("contrato.final", ".PDF"); sem extensão -> (nome, "").
fn split_file_name(original_name: &str) -> (String, String) {
    // Alguns navegadores enviam o caminho completo
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name)
        .trim();

    let path = Path::new(base);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("arquivo");
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    (stem.to_string(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{file_repo::MockFileRepository, project_repo::MockProjectRepository},
        models::project::Project,
        services::blob_storage::MockBlobStorage,
    };

    fn project(id: Uuid) -> Project {
        Project {
            id,
            user_id: "u1".to_string(),
            client_id: None,
            title: "Site".to_string(),
            description: None,
            status: "Pendente".to_string(),
            due_date: Utc::now(),
            created_at: Utc::now(),
            hourly_rate: Decimal::ZERO,
            total_hours: Decimal::ZERO,
        }
    }

    fn existing_projects() -> MockProjectRepository {
        let mut projects = MockProjectRepository::new();
        projects.expect_get_by_id().returning(|id| Ok(Some(project(id))));
        projects
    }

    fn stored_file(id: Uuid) -> StoredFile {
        StoredFile {
            id,
            file_name: "contrato".to_string(),
            file_extension: ".pdf".to_string(),
            file_url: "https://cdn/projects/x/contrato.pdf".to_string(),
            blob_key: format!("projects/x/{}.pdf", id),
            file_size: Decimal::from(3),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn file_names_are_split_into_stem_and_extension() {
        assert_eq!(
            split_file_name("contrato.final.PDF"),
            ("contrato.final".to_string(), ".PDF".to_string())
        );
        assert_eq!(split_file_name("README"), ("README".to_string(), String::new()));
        assert_eq!(
            split_file_name("C:\\Users\\ana\\briefing.docx"),
            ("briefing".to_string(), ".docx".to_string())
        );
    }

    #[tokio::test]
    async fn upload_stores_blob_under_project_prefix_and_records_metadata() {
        let project_id = Uuid::new_v4();

        let mut storage = MockBlobStorage::new();
        storage
            .expect_upload()
            .times(1)
            .returning(move |key, bytes, _| {
                assert!(key.starts_with(&format!("projects/{}/", project_id)));
                assert!(key.ends_with(".pdf"));
                assert_eq!(bytes, vec![1, 2, 3]);
                Ok(format!("https://cdn/{}", key))
            });

        let mut files = MockFileRepository::new();
        files
            .expect_add_file_for_project()
            .times(1)
            .returning(move |file, link| {
                assert_eq!(link.file_id, file.id);
                assert_eq!(link.project_id, project_id);
                Ok(())
            });

        let service = ProjectFileService::new(
            Arc::new(existing_projects()),
            Arc::new(files),
            Arc::new(storage),
        );

        let file = service
            .upload(project_id, "contrato.pdf", vec![1, 2, 3], Some("application/pdf".to_string()))
            .await
            .unwrap();

        assert_eq!(file.file_name, "contrato");
        assert_eq!(file.file_size, Decimal::from(3));
        assert!(file.file_url.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn upload_to_missing_project_is_not_found_and_touches_nothing() {
        let mut projects = MockProjectRepository::new();
        projects.expect_get_by_id().returning(|_| Ok(None));
        let mut storage = MockBlobStorage::new();
        storage.expect_upload().never();
        let mut files = MockFileRepository::new();
        files.expect_add_file_for_project().never();

        let service = ProjectFileService::new(Arc::new(projects), Arc::new(files), Arc::new(storage));
        let result = service.upload(Uuid::new_v4(), "a.txt", vec![1], None).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let mut storage = MockBlobStorage::new();
        storage.expect_upload().never();

        let service = ProjectFileService::new(
            Arc::new(existing_projects()),
            Arc::new(MockFileRepository::new()),
            Arc::new(storage),
        );
        let result = service.upload(Uuid::new_v4(), "a.txt", Vec::new(), None).await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == "Nenhum arquivo foi enviado."));
    }

    #[tokio::test]
    async fn failed_metadata_write_removes_the_uploaded_blob() {
        let mut storage = MockBlobStorage::new();
        storage
            .expect_upload()
            .returning(|key, _, _| Ok(format!("https://cdn/{}", key)));
        storage.expect_delete().times(1).returning(|_| Ok(()));

        let mut files = MockFileRepository::new();
        files
            .expect_add_file_for_project()
            .returning(|_, _| Err(AppError::InternalServerError(anyhow::anyhow!("db caiu"))));

        let service = ProjectFileService::new(
            Arc::new(existing_projects()),
            Arc::new(files),
            Arc::new(storage),
        );
        let result = service.upload(Uuid::new_v4(), "a.txt", vec![1], None).await;

        assert!(matches!(result, Err(AppError::InternalServerError(_))));
    }

    #[tokio::test]
    async fn delete_removes_blob_then_rows() {
        let project_id = Uuid::new_v4();
        let file_id = Uuid::new_v4();

        let mut files = MockFileRepository::new();
        files.expect_get_link().returning(move |p, f| {
            Ok(Some(ProjectFile {
                id: Uuid::new_v4(),
                project_id: p,
                file_id: f,
                created_at: Utc::now(),
            }))
        });
        files.expect_get_file().returning(|id| Ok(Some(stored_file(id))));
        files.expect_delete_link_and_file().times(1).returning(|_| Ok(()));

        let mut storage = MockBlobStorage::new();
        storage
            .expect_delete()
            .times(1)
            .returning(move |key| {
                assert!(key.contains(&file_id.to_string()));
                Ok(())
            });

        let service = ProjectFileService::new(
            Arc::new(existing_projects()),
            Arc::new(files),
            Arc::new(storage),
        );

        assert!(service.delete(project_id, file_id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_or_download_of_unlinked_file_is_not_found() {
        let mut files = MockFileRepository::new();
        files.expect_get_link().returning(|_, _| Ok(None));
        files.expect_delete_link_and_file().never();
        let mut storage = MockBlobStorage::new();
        storage.expect_delete().never();
        storage.expect_download().never();

        let service = ProjectFileService::new(
            Arc::new(existing_projects()),
            Arc::new(files),
            Arc::new(storage),
        );

        assert!(matches!(
            service.delete(Uuid::new_v4(), Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.download(Uuid::new_v4(), Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_all_for_project_removes_every_blob_and_row() {
        let project_id = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let mut files = MockFileRepository::new();
        files
            .expect_list_by_project()
            .times(1)
            .returning(move |_| Ok(vec![stored_file(first), stored_file(second)]));
        files.expect_get_link().times(2).returning(|p, f| {
            Ok(Some(ProjectFile {
                id: Uuid::new_v4(),
                project_id: p,
                file_id: f,
                created_at: Utc::now(),
            }))
        });
        files
            .expect_delete_link_and_file()
            .withf(move |link| link.project_id == project_id)
            .times(2)
            .returning(|_| Ok(()));

        let mut storage = MockBlobStorage::new();
        storage
            .expect_delete()
            .withf(move |key| key.contains(&first.to_string()) || key.contains(&second.to_string()))
            .times(2)
            .returning(|_| Ok(()));

        let service = ProjectFileService::new(
            Arc::new(existing_projects()),
            Arc::new(files),
            Arc::new(storage),
        );

        assert!(service.delete_all_for_project(project_id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_all_for_missing_project_is_not_found_and_touches_nothing() {
        let mut projects = MockProjectRepository::new();
        projects.expect_get_by_id().returning(|_| Ok(None));
        let mut files = MockFileRepository::new();
        files.expect_list_by_project().never();
        files.expect_delete_link_and_file().never();
        let mut storage = MockBlobStorage::new();
        storage.expect_delete().never();

        let service = ProjectFileService::new(Arc::new(projects), Arc::new(files), Arc::new(storage));

        assert!(matches!(
            service.delete_all_for_project(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn storage_failures_surface_as_internal_errors() {
        let mut files = MockFileRepository::new();
        files.expect_get_link().returning(|p, f| {
            Ok(Some(ProjectFile {
                id: Uuid::new_v4(),
                project_id: p,
                file_id: f,
                created_at: Utc::now(),
            }))
        });
        files.expect_get_file().returning(|id| Ok(Some(stored_file(id))));

        let mut storage = MockBlobStorage::new();
        storage
            .expect_download()
            .returning(|_| Err(anyhow::anyhow!("timeout no storage")));

        let service = ProjectFileService::new(
            Arc::new(existing_projects()),
            Arc::new(files),
            Arc::new(storage),
        );

        assert!(matches!(
            service.download(Uuid::new_v4(), Uuid::new_v4()).await,
            Err(AppError::InternalServerError(_))
        ));
    }
}
