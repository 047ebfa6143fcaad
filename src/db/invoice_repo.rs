// src/db/invoice_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::{common::error::AppError, models::finance::Invoice};

const INVOICE_COLUMNS: &str = "id, user_id, client_id, project_id, issue_date, due_date, \
                               amount, status, pdf_url, created_at";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<Invoice>, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError>;

    async fn add(&self, invoice: &Invoice) -> Result<(), AppError>;

    async fn update(&self, invoice: &Invoice) -> Result<(), AppError>;

    async fn delete(&self, invoice: &Invoice) -> Result<(), AppError>;

    async fn client_belongs_to_user(&self, owner_id: &str, client_id: Uuid) -> Result<bool, AppError>;

    async fn project_belongs_to_user(&self, owner_id: &str, project_id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE user_id = $1 ORDER BY issue_date DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    async fn add(&self, invoice: &Invoice) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, user_id, client_id, project_id, issue_date, due_date,
                amount, status, pdf_url, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(invoice.id)
        .bind(&invoice.user_id)
        .bind(invoice.client_id)
        .bind(invoice.project_id)
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.amount)
        .bind(&invoice.status)
        .bind(&invoice.pdf_url)
        .bind(invoice.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, invoice: &Invoice) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE invoices
            SET issue_date = $2, due_date = $3, amount = $4, status = $5, pdf_url = $6
            WHERE id = $1
            "#,
        )
        .bind(invoice.id)
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.amount)
        .bind(&invoice.status)
        .bind(&invoice.pdf_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, invoice: &Invoice) -> Result<(), AppError> {
        sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(invoice.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn client_belongs_to_user(&self, owner_id: &str, client_id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1 AND user_id = $2)",
        )
        .bind(client_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
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
