// src/db/client_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::{common::error::AppError, models::client::Client};

const CLIENT_COLUMNS: &str =
    "id, user_id, name, email, phone, company_name, notes, created_at";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<Client>, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError>;

    async fn add(&self, client: &Client) -> Result<(), AppError>;

    async fn update(&self, client: &Client) -> Result<(), AppError>;

    async fn delete(&self, client: &Client) -> Result<(), AppError>;

    /// Unicidade do e-mail por dono, não global.
    async fn email_exists(
        &self,
        owner_id: &str,
        email: &str,
        exclude_client_id: Option<Uuid>,
    ) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn add(&self, client: &Client) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO clients (id, user_id, name, email, phone, company_name, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(client.id)
        .bind(&client.user_id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.company_name)
        .bind(&client.notes)
        .bind(client.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::validation("Já existe um cliente com este email.");
                }
            }
            e.into()
        })?;

        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE clients
            SET name = $2, email = $3, phone = $4, company_name = $5, notes = $6
            WHERE id = $1
            "#,
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.company_name)
        .bind(&client.notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, client: &Client) -> Result<(), AppError> {
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(client.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn email_exists(
        &self,
        owner_id: &str,
        email: &str,
        exclude_client_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM clients
                WHERE user_id = $1
                AND email = $2
                AND ($3::UUID IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(owner_id)
        .bind(email)
        .bind(exclude_client_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
