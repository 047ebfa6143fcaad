// src/services/project_service.rs

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validation::{money, require_not_before_today, require_owner, require_status, require_text},
    },
    db::ProjectRepository,
    models::project::{
        CreateProjectPayload, Project, ProjectHoursSummary, UpdateProjectHoursPayload,
        UpdateProjectPayload, PROJECT_STATUSES,
    },
};

const PROJECT_NOT_FOUND: &str = "Projeto não encontrado.";
const CLIENT_NOT_OWNED: &str = "Cliente não encontrado ou não pertence ao usuário.";

#[derive(Clone)]
pub struct ProjectService {
    repo: Arc<dyn ProjectRepository>,
}

impl ProjectService {
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Project>, AppError> {
        require_owner(owner_id)?;
        self.repo.get_by_owner(owner_id).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, owner_id: &str, payload: CreateProjectPayload) -> Result<Project, AppError> {
        require_owner(owner_id)?;
        validate_fields(&payload.title, &payload.status)?;

        if !self
            .repo
            .client_belongs_to_user(owner_id, payload.client_id)
            .await?
        {
            return Err(AppError::validation(CLIENT_NOT_OWNED));
        }

        require_not_before_today(payload.due_date)?;

        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            user_id: owner_id.to_string(),
            client_id: payload.client_id,
            title: payload.title.trim().to_string(),
            description: payload.description,
            status: payload.status,
            due_date: payload.due_date.unwrap_or(now),
            created_at: now,
            hourly_rate: Decimal::ZERO,
            total_hours: Decimal::ZERO,
        };

        self.repo.add(&project).await?;
        tracing::info!("📁 Projeto {} criado para o usuário {}.", project.id, owner_id);

        Ok(project)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateProjectPayload) -> Result<(), AppError> {
        let mut project = self.find(id).await?;

        validate_fields(&payload.title, &payload.status)?;

        // Só revalida o cliente quando ele de fato muda
        if payload.client_id.is_some() && payload.client_id != project.client_id {
            if !self
                .repo
                .client_belongs_to_user(&project.user_id, payload.client_id)
                .await?
            {
                return Err(AppError::validation(CLIENT_NOT_OWNED));
            }
            project.client_id = payload.client_id;
        }

        require_not_before_today(payload.due_date)?;

        project.title = payload.title.trim().to_string();
        project.description = payload.description;
        project.status = payload.status;
        if let Some(due_date) = payload.due_date {
            project.due_date = due_date;
        }

        self.repo.update(&project).await?;
        tracing::info!("📁 Projeto {} atualizado.", project.id);

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let project = self.find(id).await?;

        self.repo.delete(&project).await?;
        tracing::info!("🗑️ Projeto {} removido.", project.id);

        Ok(())
    }

    /// Atualiza horas e valor-hora (última escrita vence) e devolve o resumo recalculado.
    pub async fn update_hours(
        &self,
        id: Uuid,
        payload: UpdateProjectHoursPayload,
    ) -> Result<ProjectHoursSummary, AppError> {
        let mut project = self.find(id).await?;

        project.apply_hours(&payload);
        project.total_hours = money(project.total_hours);
        project.hourly_rate = money(project.hourly_rate);

        self.repo.update(&project).await?;

        match payload.description.as_deref().map(str::trim) {
            Some(note) if !note.is_empty() => tracing::info!(
                "⏱️ Horas do projeto {} atualizadas: total={} valor-hora={} ({})",
                project.id,
                project.total_hours,
                project.hourly_rate,
                note
            ),
            _ => tracing::info!(
                "⏱️ Horas do projeto {} atualizadas: total={} valor-hora={}",
                project.id,
                project.total_hours,
                project.hourly_rate
            ),
        }

        Ok(project.hours_summary())
    }

    pub async fn hours_summary(&self, id: Uuid) -> Result<ProjectHoursSummary, AppError> {
        Ok(self.find(id).await?.hours_summary())
    }

    async fn find(&self, id: Uuid) -> Result<Project, AppError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(PROJECT_NOT_FOUND))
    }
}

fn validate_fields(title: &str, status: &str) -> Result<(), AppError> {
    require_text(title, "O título do projeto é obrigatório.")?;
    require_text(status, "O status do projeto é obrigatório.")?;
    require_status(status, &PROJECT_STATUSES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::project_repo::MockProjectRepository;
    use chrono::Duration;
    use std::sync::Mutex;

    fn payload(title: &str, status: &str) -> CreateProjectPayload {
        CreateProjectPayload {
            title: title.to_string(),
            status: status.to_string(),
            due_date: Some(Utc::now() + Duration::days(1)),
            ..Default::default()
        }
    }

    fn stored(total_hours: i64, hourly_rate: i64) -> Project {
        Project {
            id: Uuid::new_v4(),
            user_id: "u1".to_string(),
            client_id: None,
            title: "Site".to_string(),
            description: None,
            status: "Pendente".to_string(),
            due_date: Utc::now(),
            created_at: Utc::now(),
            hourly_rate: Decimal::from(hourly_rate),
            total_hours: Decimal::from(total_hours),
        }
    }

    #[tokio::test]
    async fn create_with_empty_owner_is_unauthorized_and_never_persists() {
        let mut repo = MockProjectRepository::new();
        repo.expect_client_belongs_to_user().never();
        repo.expect_add().never();

        let service = ProjectService::new(Arc::new(repo));
        let result = service.create("", payload("Site", "Pendente")).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn all_canonical_statuses_are_accepted() {
        let mut repo = MockProjectRepository::new();
        repo.expect_client_belongs_to_user().returning(|_, _| Ok(true));
        repo.expect_add().times(4).returning(|_| Ok(()));

        let service = ProjectService::new(Arc::new(repo));
        for status in PROJECT_STATUSES {
            let project = service.create("u1", payload("Site", status)).await.unwrap();
            assert_eq!(project.status, status);
        }
    }

    #[tokio::test]
    async fn unknown_or_differently_cased_status_is_rejected() {
        let mut repo = MockProjectRepository::new();
        repo.expect_add().never();

        let service = ProjectService::new(Arc::new(repo));

        for status in ["Arquivado", "pendente"] {
            let result = service.create("u1", payload("Site", status)).await;
            assert!(matches!(result, Err(AppError::Validation(msg)) if msg.starts_with("Status inválido")));
        }
    }

    #[tokio::test]
    async fn client_of_another_user_is_rejected() {
        let mut repo = MockProjectRepository::new();
        repo.expect_client_belongs_to_user()
            .times(1)
            .returning(|_, _| Ok(false));
        repo.expect_add().never();

        let service = ProjectService::new(Arc::new(repo));
        let mut input = payload("Site", "Pendente");
        input.client_id = Some(Uuid::new_v4());

        let result = service.create("u1", input).await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("Cliente não encontrado")));
    }

    #[tokio::test]
    async fn past_due_date_is_rejected_but_today_is_accepted() {
        let mut repo = MockProjectRepository::new();
        repo.expect_client_belongs_to_user().returning(|_, _| Ok(true));
        repo.expect_add().times(1).returning(|_| Ok(()));

        let service = ProjectService::new(Arc::new(repo));

        let mut yesterday = payload("Site", "Pendente");
        yesterday.due_date = Some(Utc::now() - Duration::days(1));
        assert!(matches!(
            service.create("u1", yesterday).await,
            Err(AppError::Validation(_))
        ));

        let mut today = payload("Site", "Pendente");
        today.due_date = Some(Utc::now());
        assert!(service.create("u1", today).await.is_ok());
    }

    #[tokio::test]
    async fn update_keeps_client_when_omitted_and_skips_the_ownership_query() {
        let mut project = stored(0, 0);
        project.client_id = Some(Uuid::new_v4());
        let client_id = project.client_id;

        let mut repo = MockProjectRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(project.clone())));
        repo.expect_client_belongs_to_user().never();
        repo.expect_update()
            .times(1)
            .returning(move |p| {
                assert_eq!(p.client_id, client_id);
                assert_eq!(p.status, "Em Andamento");
                Ok(())
            });

        let service = ProjectService::new(Arc::new(repo));
        let mut input = payload("Site", "Em Andamento");
        input.due_date = None;

        assert!(service.update(Uuid::new_v4(), input).await.is_ok());
    }

    #[tokio::test]
    async fn update_and_delete_on_missing_id_are_not_found() {
        let mut repo = MockProjectRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update().never();
        repo.expect_delete().never();

        let service = ProjectService::new(Arc::new(repo));

        assert!(matches!(
            service.update(Uuid::new_v4(), payload("Site", "Pendente")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete(Uuid::new_v4()).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            service
                .update_hours(Uuid::new_v4(), UpdateProjectHoursPayload::default())
                .await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn negative_increment_persists_zero_hours() {
        let mut repo = MockProjectRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Ok(Some(stored(10, 50))));
        repo.expect_update()
            .times(1)
            .returning(|p| {
                assert_eq!(p.total_hours, Decimal::ZERO);
                Ok(())
            });

        let service = ProjectService::new(Arc::new(repo));
        let summary = service
            .update_hours(
                Uuid::new_v4(),
                UpdateProjectHoursPayload {
                    hours_to_add: Some(Decimal::from(-100)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.total_earned, Decimal::ZERO);
    }

    #[tokio::test]
    async fn negative_rate_leaves_the_stored_rate_unchanged() {
        let mut repo = MockProjectRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Ok(Some(stored(10, 80))));
        repo.expect_update()
            .times(1)
            .returning(|p| {
                assert_eq!(p.hourly_rate, Decimal::from(80));
                Ok(())
            });

        let service = ProjectService::new(Arc::new(repo));
        let summary = service
            .update_hours(
                Uuid::new_v4(),
                UpdateProjectHoursPayload {
                    hourly_rate: Some(Decimal::from(-5)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(summary.hourly_rate, Decimal::from(80));
        assert_eq!(summary.total_earned, Decimal::from(800));
    }

    #[tokio::test]
    async fn hours_are_rounded_to_two_places_before_persisting() {
        let mut repo = MockProjectRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Ok(Some(stored(0, 0))));
        repo.expect_update()
            .times(1)
            .returning(|p| {
                assert_eq!(p.total_hours, Decimal::new(133, 2));
                Ok(())
            });

        let service = ProjectService::new(Arc::new(repo));
        let result = service
            .update_hours(
                Uuid::new_v4(),
                UpdateProjectHoursPayload {
                    hours_to_add: Some(Decimal::new(1333, 3)),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn client_then_project_then_hours_yields_total_earned() {
        use crate::db::client_repo::MockClientRepository;
        use crate::models::client::CreateClientPayload;
        use crate::services::client_service::ClientService;

        let mut client_repo = MockClientRepository::new();
        client_repo.expect_email_exists().returning(|_, _, _| Ok(false));
        client_repo.expect_add().times(1).returning(|_| Ok(()));
        let clients = ClientService::new(Arc::new(client_repo));

        let client = clients
            .create(
                "u1",
                CreateClientPayload {
                    name: "Felipe".to_string(),
                    email: "felipe@test.com".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // O "banco" do projeto é um Mutex compartilhado entre add/get/update
        let saved: Arc<Mutex<Option<Project>>> = Arc::new(Mutex::new(None));
        let client_id = client.id;

        let mut project_repo = MockProjectRepository::new();
        project_repo
            .expect_client_belongs_to_user()
            .times(1)
            .returning(move |owner, id| Ok(owner == "u1" && id == Some(client_id)));
        let on_add = saved.clone();
        project_repo.expect_add().times(1).returning(move |p| {
            *on_add.lock().unwrap() = Some(p.clone());
            Ok(())
        });
        let on_get = saved.clone();
        project_repo
            .expect_get_by_id()
            .returning(move |_| Ok(on_get.lock().unwrap().clone()));
        let on_update = saved.clone();
        project_repo.expect_update().times(1).returning(move |p| {
            *on_update.lock().unwrap() = Some(p.clone());
            Ok(())
        });
        let projects = ProjectService::new(Arc::new(project_repo));

        let mut input = payload("Site", "Pendente");
        input.client_id = Some(client.id);
        let project = projects.create("u1", input).await.unwrap();

        let summary = projects
            .update_hours(
                project.id,
                UpdateProjectHoursPayload {
                    hours_to_add: Some(Decimal::from(5)),
                    hourly_rate: Some(Decimal::from(100)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(summary.total_earned, Decimal::from(500));
        assert_eq!(saved.lock().unwrap().as_ref().unwrap().total_hours, Decimal::from(5));
    }
}
