// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

#[cfg(test)]
use mockall::automock;

use crate::{common::error::AppError, models::user::User};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<User>, AppError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn add(&self, user: &User) -> Result<(), AppError>;

    /// Reescreve a linha inteira a partir da entidade em memória.
    async fn update(&self, user: &User) -> Result<(), AppError>;

    async fn delete(&self, user: &User) -> Result<(), AppError>;

    /// `exclude_user_id` permite que o próprio usuário mantenha o seu e-mail.
    async fn email_exists(&self, email: &str, exclude_user_id: Option<String>) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, language, created_at FROM users ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, language, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(maybe_user)
    }

    async fn add(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, language, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.language)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Duas requisições simultâneas do mesmo usuário no primeiro acesso
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::validation("Já existe um usuário com este email.");
                }
            }
            e.into()
        })?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET name = $2, email = $3, language = $4 WHERE id = $1")
            .bind(&user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.language)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, user: &User) -> Result<(), AppError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(&user.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn email_exists(&self, email: &str, exclude_user_id: Option<String>) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM users
                WHERE email = $1
                AND ($2::TEXT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude_user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
