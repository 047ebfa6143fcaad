// src/db/project_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::{common::error::AppError, models::project::Project};

const PROJECT_COLUMNS: &str = "id, user_id, client_id, title, description, status, due_date, \
                               created_at, hourly_rate, total_hours";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<Project>, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError>;

    async fn add(&self, project: &Project) -> Result<(), AppError>;

    /// Sem token de concorrência: a última escrita vence.
    async fn update(&self, project: &Project) -> Result<(), AppError>;

    async fn delete(&self, project: &Project) -> Result<(), AppError>;

    /// `None` (projeto sem cliente) é sempre válido.
    async fn client_belongs_to_user(
        &self,
        owner_id: &str,
        client_id: Option<Uuid>,
    ) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn add(&self, project: &Project) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, user_id, client_id, title, description, status,
                due_date, created_at, hourly_rate, total_hours
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(project.id)
        .bind(&project.user_id)
        .bind(project.client_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.status)
        .bind(project.due_date)
        .bind(project.created_at)
        .bind(project.hourly_rate)
        .bind(project.total_hours)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE projects
            SET client_id = $2, title = $3, description = $4, status = $5,
                due_date = $6, hourly_rate = $7, total_hours = $8
            WHERE id = $1
            "#,
        )
        .bind(project.id)
        .bind(project.client_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.status)
        .bind(project.due_date)
        .bind(project.hourly_rate)
        .bind(project.total_hours)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, project: &Project) -> Result<(), AppError> {
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn client_belongs_to_user(
        &self,
        owner_id: &str,
        client_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let Some(client_id) = client_id else {
            return Ok(true);
        };

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1 AND user_id = $2)",
        )
        .bind(client_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
