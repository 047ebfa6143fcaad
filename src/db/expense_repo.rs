// src/db/expense_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::{common::error::AppError, models::finance::Expense};

const EXPENSE_COLUMNS: &str = "id, user_id, title, amount, category, payment_date, notes, created_at";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<Expense>, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Expense>, AppError>;

    async fn add(&self, expense: &Expense) -> Result<(), AppError>;

    async fn update(&self, expense: &Expense) -> Result<(), AppError>;

    async fn delete(&self, expense: &Expense) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgExpenseRepository {
    pool: PgPool,
}

impl PgExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseRepository for PgExpenseRepository {
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE user_id = $1 ORDER BY payment_date DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Expense>, AppError> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    async fn add(&self, expense: &Expense) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, user_id, title, amount, category, payment_date, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(expense.id)
        .bind(&expense.user_id)
        .bind(&expense.title)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(expense.payment_date)
        .bind(&expense.notes)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, expense: &Expense) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE expenses
            SET title = $2, amount = $3, category = $4, payment_date = $5, notes = $6
            WHERE id = $1
            "#,
        )
        .bind(expense.id)
        .bind(&expense.title)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(expense.payment_date)
        .bind(&expense.notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, expense: &Expense) -> Result<(), AppError> {
        sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(expense.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
