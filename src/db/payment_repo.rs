// src/db/payment_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::{common::error::AppError, models::finance::Payment};

const PAYMENT_COLUMNS: &str =
    "id, user_id, invoice_id, amount, payment_date, payment_method, notes, created_at";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<Payment>, AppError>;

    async fn get_by_invoice(&self, invoice_id: Uuid) -> Result<Vec<Payment>, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError>;

    async fn add(&self, payment: &Payment) -> Result<(), AppError>;

    async fn update(&self, payment: &Payment) -> Result<(), AppError>;

    async fn delete(&self, payment: &Payment) -> Result<(), AppError>;

    async fn invoice_belongs_to_user(&self, owner_id: &str, invoice_id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE user_id = $1 ORDER BY payment_date DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    async fn get_by_invoice(&self, invoice_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE invoice_id = $1 ORDER BY payment_date DESC"
        ))
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    async fn add(&self, payment: &Payment) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, user_id, invoice_id, amount, payment_date, payment_method, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(payment.id)
        .bind(&payment.user_id)
        .bind(payment.invoice_id)
        .bind(payment.amount)
        .bind(payment.payment_date)
        .bind(&payment.payment_method)
        .bind(&payment.notes)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE payments
            SET amount = $2, payment_date = $3, payment_method = $4, notes = $5
            WHERE id = $1
            "#,
        )
        .bind(payment.id)
        .bind(payment.amount)
        .bind(payment.payment_date)
        .bind(&payment.payment_method)
        .bind(&payment.notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, payment: &Payment) -> Result<(), AppError> {
        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(payment.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn invoice_belongs_to_user(&self, owner_id: &str, invoice_id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM invoices WHERE id = $1 AND user_id = $2)",
        )
        .bind(invoice_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
