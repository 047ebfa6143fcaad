// src/db/task_item_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::{common::error::AppError, models::task_item::TaskItem};

const TASK_COLUMNS: &str = "id, project_id, title, description, status, due_date, created_at";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskItemRepository: Send + Sync {
    /// Tarefas não guardam o dono; ele vem do projeto.
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<TaskItem>, AppError>;

    async fn get_by_project(&self, project_id: Uuid) -> Result<Vec<TaskItem>, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskItem>, AppError>;

    async fn add(&self, task: &TaskItem) -> Result<(), AppError>;

    async fn update(&self, task: &TaskItem) -> Result<(), AppError>;

    async fn delete(&self, task: &TaskItem) -> Result<(), AppError>;

    async fn project_belongs_to_user(&self, owner_id: &str, project_id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgTaskItemRepository {
    pool: PgPool,
}

impl PgTaskItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskItemRepository for PgTaskItemRepository {
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<TaskItem>, AppError> {
        let tasks = sqlx::query_as::<_, TaskItem>(
            r#"
            SELECT t.id, t.project_id, t.title, t.description, t.status, t.due_date, t.created_at
            FROM task_items t
            INNER JOIN projects p ON p.id = t.project_id
            WHERE p.user_id = $1
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn get_by_project(&self, project_id: Uuid) -> Result<Vec<TaskItem>, AppError> {
        let tasks = sqlx::query_as::<_, TaskItem>(&format!(
            "SELECT {TASK_COLUMNS} FROM task_items WHERE project_id = $1 ORDER BY created_at DESC"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskItem>, AppError> {
        let task = sqlx::query_as::<_, TaskItem>(&format!(
            "SELECT {TASK_COLUMNS} FROM task_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn add(&self, task: &TaskItem) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO task_items (id, project_id, title, description, status, due_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(task.id)
        .bind(task.project_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(task.due_date)
        .bind(task.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, task: &TaskItem) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE task_items
            SET title = $2, description = $3, status = $4, due_date = $5
            WHERE id = $1
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(task.due_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, task: &TaskItem) -> Result<(), AppError> {
        sqlx::query("DELETE FROM task_items WHERE id = $1")
            .bind(task.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn project_belongs_to_user(&self, owner_id: &str, project_id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1 AND user_id = $2)",
        )
        .bind(project_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
