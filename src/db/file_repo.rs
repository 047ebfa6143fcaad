// src/db/file_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::{
    common::error::AppError,
    models::file::{ProjectFile, StoredFile},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Grava os metadados e o vínculo com o projeto na mesma transação.
    async fn add_file_for_project(&self, file: &StoredFile, link: &ProjectFile) -> Result<(), AppError>;

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<StoredFile>, AppError>;

    async fn get_link(&self, project_id: Uuid, file_id: Uuid) -> Result<Option<ProjectFile>, AppError>;

    async fn get_file(&self, file_id: Uuid) -> Result<Option<StoredFile>, AppError>;

    async fn delete_link_and_file(&self, link: &ProjectFile) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    // =========================================================================
    //  ESCRITA
    // =========================================================================

    async fn add_file_for_project(&self, file: &StoredFile, link: &ProjectFile) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO files (id, file_name, file_extension, file_url, blob_key, file_size, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(file.id)
        .bind(&file.file_name)
        .bind(&file.file_extension)
        .bind(&file.file_url)
        .bind(&file.blob_key)
        .bind(file.file_size)
        .bind(file.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO project_files (id, project_id, file_id, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(link.id)
        .bind(link.project_id)
        .bind(link.file_id)
        .bind(link.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete_link_and_file(&self, link: &ProjectFile) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM project_files WHERE id = $1")
            .bind(link.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(link.file_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<StoredFile>, AppError> {
        let files = sqlx::query_as::<_, StoredFile>(
            r#"
            SELECT f.id, f.file_name, f.file_extension, f.file_url, f.blob_key, f.file_size, f.created_at
            FROM files f
            INNER JOIN project_files pf ON pf.file_id = f.id
            WHERE pf.project_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    async fn get_link(&self, project_id: Uuid, file_id: Uuid) -> Result<Option<ProjectFile>, AppError> {
        let link = sqlx::query_as::<_, ProjectFile>(
            "SELECT id, project_id, file_id, created_at FROM project_files WHERE project_id = $1 AND file_id = $2",
        )
        .bind(project_id)
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(link)
    }

    async fn get_file(&self, file_id: Uuid) -> Result<Option<StoredFile>, AppError> {
        let file = sqlx::query_as::<_, StoredFile>(
            "SELECT id, file_name, file_extension, file_url, blob_key, file_size, created_at FROM files WHERE id = $1",
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file)
    }
}
