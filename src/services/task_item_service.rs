// src/services/task_item_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validation::{
            require_max_chars, require_not_before_today, require_owner, require_status, require_text,
        },
    },
    db::TaskItemRepository,
    models::task_item::{
        CreateTaskItemPayload, TaskItem, UpdateTaskItemPayload, DESCRIPTION_MAX_CHARS,
        TASK_STATUSES, TITLE_MAX_CHARS,
    },
};

const TASK_NOT_FOUND: &str = "Tarefa não encontrada.";
const PROJECT_NOT_OWNED: &str = "Projeto não encontrado ou não pertence ao usuário.";

#[derive(Clone)]
pub struct TaskItemService {
    repo: Arc<dyn TaskItemRepository>,
}

impl TaskItemService {
    pub fn new(repo: Arc<dyn TaskItemRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<TaskItem>, AppError> {
        require_owner(owner_id)?;
        self.repo.get_by_owner(owner_id).await
    }

    pub async fn list_by_project(&self, owner_id: &str, project_id: Uuid) -> Result<Vec<TaskItem>, AppError> {
        require_owner(owner_id)?;

        if !self.repo.project_belongs_to_user(owner_id, project_id).await? {
            return Err(AppError::validation(PROJECT_NOT_OWNED));
        }

        self.repo.get_by_project(project_id).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskItem>, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, owner_id: &str, payload: CreateTaskItemPayload) -> Result<TaskItem, AppError> {
        require_owner(owner_id)?;
        require_text(&payload.title, "O título da tarefa é obrigatório.")?;
        require_text(&payload.status, "O status da tarefa é obrigatório.")?;
        require_status(&payload.status, &TASK_STATUSES)?;

        if !self
            .repo
            .project_belongs_to_user(owner_id, payload.project_id)
            .await?
        {
            return Err(AppError::validation(PROJECT_NOT_OWNED));
        }

        validate_dates_and_lengths(&payload.title, payload.description.as_deref(), payload.due_date)?;

        let now = Utc::now();
        let task = TaskItem {
            id: Uuid::new_v4(),
            project_id: payload.project_id,
            title: payload.title.trim().to_string(),
            description: payload.description,
            status: payload.status,
            due_date: payload.due_date.unwrap_or(now),
            created_at: now,
        };

        self.repo.add(&task).await?;
        tracing::info!("✅ Tarefa {} criada no projeto {}.", task.id, task.project_id);

        Ok(task)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateTaskItemPayload) -> Result<(), AppError> {
        let mut task = self.find(id).await?;

        require_text(&payload.title, "O título da tarefa é obrigatório.")?;
        require_text(&payload.status, "O status da tarefa é obrigatório.")?;
        require_status(&payload.status, &TASK_STATUSES)?;
        validate_dates_and_lengths(&payload.title, payload.description.as_deref(), payload.due_date)?;

        task.title = payload.title.trim().to_string();
        task.description = payload.description;
        task.status = payload.status;
        // Sem data informada, a tarefa passa a vencer agora
        task.due_date = payload.due_date.unwrap_or_else(Utc::now);

        self.repo.update(&task).await?;
        tracing::info!("✅ Tarefa {} atualizada.", task.id);

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let task = self.find(id).await?;

        self.repo.delete(&task).await?;
        tracing::info!("🗑️ Tarefa {} removida.", task.id);

        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<TaskItem, AppError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(TASK_NOT_FOUND))
    }
}

fn validate_dates_and_lengths(
    title: &str,
    description: Option<&str>,
    due_date: Option<chrono::DateTime<Utc>>,
) -> Result<(), AppError> {
    require_not_before_today(due_date)?;
    require_max_chars(title.trim(), TITLE_MAX_CHARS, "O título não pode ter mais de 200 caracteres.")?;
    if let Some(description) = description {
        require_max_chars(
            description,
            DESCRIPTION_MAX_CHARS,
            "A descrição não pode ter mais de 1000 caracteres.",
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::task_item_repo::MockTaskItemRepository;
    use chrono::Duration;

    fn payload(title: &str, status: &str) -> CreateTaskItemPayload {
        CreateTaskItemPayload {
            project_id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            status: status.to_string(),
            due_date: Some(Utc::now() + Duration::days(2)),
        }
    }

    fn stored() -> TaskItem {
        TaskItem {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            title: "Layout".to_string(),
            description: None,
            status: "Pendente".to_string(),
            due_date: Utc::now() + Duration::days(5),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_with_empty_owner_is_unauthorized_and_never_persists() {
        let mut repo = MockTaskItemRepository::new();
        repo.expect_project_belongs_to_user().never();
        repo.expect_add().never();

        let service = TaskItemService::new(Arc::new(repo));

        assert!(matches!(
            service.create("", payload("Layout", "Pendente")).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn list_with_empty_owner_is_unauthorized() {
        let mut repo = MockTaskItemRepository::new();
        repo.expect_get_by_owner().never();

        let service = TaskItemService::new(Arc::new(repo));

        assert!(matches!(service.list("  ").await, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn list_returns_tasks_of_the_owner_projects() {
        let mut repo = MockTaskItemRepository::new();
        repo.expect_get_by_owner()
            .withf(|owner| owner == "u1")
            .times(1)
            .returning(|_| Ok(vec![stored(), stored()]));

        let service = TaskItemService::new(Arc::new(repo));

        assert_eq!(service.list("u1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn task_statuses_use_the_feminine_forms() {
        let mut repo = MockTaskItemRepository::new();
        repo.expect_project_belongs_to_user().returning(|_, _| Ok(true));
        repo.expect_add().times(1).returning(|_| Ok(()));

        let service = TaskItemService::new(Arc::new(repo));

        assert!(service.create("u1", payload("Layout", "Concluída")).await.is_ok());
        assert!(matches!(
            service.create("u1", payload("Layout", "Concluído")).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn project_of_another_user_is_rejected() {
        let mut repo = MockTaskItemRepository::new();
        repo.expect_project_belongs_to_user()
            .times(1)
            .returning(|_, _| Ok(false));
        repo.expect_add().never();

        let service = TaskItemService::new(Arc::new(repo));
        let result = service.create("u1", payload("Layout", "Pendente")).await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == PROJECT_NOT_OWNED));
    }

    #[tokio::test]
    async fn long_title_and_description_are_rejected() {
        let mut repo = MockTaskItemRepository::new();
        repo.expect_project_belongs_to_user().returning(|_, _| Ok(true));
        repo.expect_add().never();

        let service = TaskItemService::new(Arc::new(repo));

        let long_title = service.create("u1", payload(&"a".repeat(201), "Pendente")).await;
        assert!(matches!(long_title, Err(AppError::Validation(msg)) if msg.contains("200")));

        let mut long_description = payload("Layout", "Pendente");
        long_description.description = Some("b".repeat(1001));
        let result = service.create("u1", long_description).await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("1000")));
    }

    #[tokio::test]
    async fn missing_due_date_defaults_to_now_on_create() {
        let mut repo = MockTaskItemRepository::new();
        repo.expect_project_belongs_to_user().returning(|_, _| Ok(true));
        repo.expect_add().times(1).returning(|_| Ok(()));

        let service = TaskItemService::new(Arc::new(repo));
        let mut input = payload("Layout", "Pendente");
        input.due_date = None;

        let before = Utc::now();
        let task = service.create("u1", input).await.unwrap();

        assert!(task.due_date >= before);
    }

    #[tokio::test]
    async fn update_without_due_date_resets_it_to_now() {
        let mut repo = MockTaskItemRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(Some(stored())));
        let before = Utc::now();
        repo.expect_update()
            .times(1)
            .returning(move |task| {
                assert!(task.due_date >= before);
                assert!(task.due_date < before + Duration::days(1));
                Ok(())
            });

        let service = TaskItemService::new(Arc::new(repo));
        let result = service
            .update(
                Uuid::new_v4(),
                UpdateTaskItemPayload {
                    title: "Layout".to_string(),
                    description: None,
                    status: "Em Andamento".to_string(),
                    due_date: None,
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn list_by_project_checks_ownership() {
        let mut repo = MockTaskItemRepository::new();
        repo.expect_project_belongs_to_user().returning(|owner, _| Ok(owner == "u1"));
        repo.expect_get_by_project()
            .times(1)
            .returning(|_| Ok(vec![stored()]));

        let service = TaskItemService::new(Arc::new(repo));

        assert_eq!(service.list_by_project("u1", Uuid::new_v4()).await.unwrap().len(), 1);
        assert!(matches!(
            service.list_by_project("u2", Uuid::new_v4()).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_and_delete_on_missing_id_are_not_found() {
        let mut repo = MockTaskItemRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update().never();
        repo.expect_delete().never();

        let service = TaskItemService::new(Arc::new(repo));

        assert!(matches!(
            service.update(Uuid::new_v4(), UpdateTaskItemPayload::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete(Uuid::new_v4()).await, Err(AppError::NotFound(_))));
    }
}
