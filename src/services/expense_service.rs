// src/services/expense_service.rs

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validation::{positive_money, require_not_in_future, require_owner, require_text},
    },
    db::ExpenseRepository,
    models::finance::{CreateExpensePayload, Expense, ExpensePayload, UpdateExpensePayload},
};

const EXPENSE_NOT_FOUND: &str = "Despesa não encontrada.";

#[derive(Clone)]
pub struct ExpenseService {
    repo: Arc<dyn ExpenseRepository>,
}

impl ExpenseService {
    pub fn new(repo: Arc<dyn ExpenseRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Expense>, AppError> {
        require_owner(owner_id)?;
        self.repo.get_by_owner(owner_id).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Expense>, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, owner_id: &str, payload: CreateExpensePayload) -> Result<Expense, AppError> {
        require_owner(owner_id)?;
        let amount = validate(&payload)?;

        let expense = Expense {
            id: Uuid::new_v4(),
            user_id: owner_id.to_string(),
            title: payload.title.trim().to_string(),
            amount,
            category: payload.category.trim().to_string(),
            payment_date: payload.payment_date,
            notes: payload.notes,
            created_at: Utc::now(),
        };

        self.repo.add(&expense).await?;
        tracing::info!("💸 Despesa {} registrada para o usuário {}.", expense.id, owner_id);

        Ok(expense)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateExpensePayload) -> Result<(), AppError> {
        let mut expense = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(EXPENSE_NOT_FOUND))?;

        let amount = validate(&payload)?;

        expense.title = payload.title.trim().to_string();
        expense.amount = amount;
        expense.category = payload.category.trim().to_string();
        expense.payment_date = payload.payment_date;
        expense.notes = payload.notes;

        self.repo.update(&expense).await?;
        tracing::info!("💸 Despesa {} atualizada.", expense.id);

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let expense = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(EXPENSE_NOT_FOUND))?;

        self.repo.delete(&expense).await?;
        tracing::info!("🗑️ Despesa {} removida.", expense.id);

        Ok(())
    }
}

// Devolve o valor já arredondado para persistir
fn validate(payload: &ExpensePayload) -> Result<Decimal, AppError> {
    require_text(&payload.title, "O título da despesa é obrigatório.")?;
    let amount = positive_money(payload.amount, "O valor da despesa deve ser maior que zero.")?;
    require_text(&payload.category, "A categoria da despesa é obrigatória.")?;
    // Timestamp completo, diferente do vencimento de projetos/tarefas
    require_not_in_future(payload.payment_date, "A data de pagamento não pode ser futura.")?;
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::expense_repo::MockExpenseRepository;
    use chrono::Duration;

    fn payload(amount: Decimal, payment_date: chrono::DateTime<Utc>) -> CreateExpensePayload {
        CreateExpensePayload {
            title: "Licença do Figma".to_string(),
            amount,
            category: "Software".to_string(),
            payment_date,
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_with_empty_owner_is_unauthorized_and_never_persists() {
        let mut repo = MockExpenseRepository::new();
        repo.expect_add().never();

        let service = ExpenseService::new(Arc::new(repo));
        let result = service.create("", payload(Decimal::ONE, Utc::now())).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let mut repo = MockExpenseRepository::new();
        repo.expect_add().never();

        let service = ExpenseService::new(Arc::new(repo));

        for amount in [Decimal::ZERO, Decimal::from(-10)] {
            let result = service.create("u1", payload(amount, Utc::now())).await;
            assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("maior que zero")));
        }
    }

    #[tokio::test]
    async fn amounts_that_round_to_zero_are_rejected_on_create_and_update() {
        let stored = Expense {
            id: Uuid::new_v4(),
            user_id: "u1".to_string(),
            title: "Licença do Figma".to_string(),
            amount: Decimal::ONE,
            category: "Software".to_string(),
            payment_date: Utc::now(),
            notes: None,
            created_at: Utc::now(),
        };

        let mut repo = MockExpenseRepository::new();
        repo.expect_get_by_id().returning(move |_| Ok(Some(stored.clone())));
        repo.expect_add().never();
        repo.expect_update().never();

        let service = ExpenseService::new(Arc::new(repo));
        let one_second_ago = Utc::now() - Duration::seconds(1);

        // 0.005 empata e o arredondamento bancário vai para o par (0.00)
        for amount in [Decimal::new(1, 3), Decimal::new(5, 3)] {
            let created = service.create("u1", payload(amount, one_second_ago)).await;
            assert!(matches!(created, Err(AppError::Validation(msg)) if msg.contains("maior que zero")));

            let updated = service.update(Uuid::new_v4(), payload(amount, one_second_ago)).await;
            assert!(matches!(updated, Err(AppError::Validation(msg)) if msg.contains("maior que zero")));
        }
    }

    #[tokio::test]
    async fn persisted_amount_is_rounded_to_cents() {
        let mut repo = MockExpenseRepository::new();
        repo.expect_add()
            .withf(|e: &Expense| e.amount == Decimal::new(1235, 2))
            .times(1)
            .returning(|_| Ok(()));

        let service = ExpenseService::new(Arc::new(repo));
        let expense = service
            .create("u1", payload(Decimal::new(12346, 3), Utc::now() - Duration::seconds(1)))
            .await
            .unwrap();

        assert_eq!(expense.amount, Decimal::new(1235, 2));
    }

    #[tokio::test]
    async fn future_payment_date_is_rejected() {
        let mut repo = MockExpenseRepository::new();
        repo.expect_add().never();

        let service = ExpenseService::new(Arc::new(repo));
        let result = service
            .create("u1", payload(Decimal::ONE, Utc::now() + Duration::minutes(5)))
            .await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("futura")));
    }

    #[tokio::test]
    async fn smallest_amount_one_second_ago_is_accepted() {
        let mut repo = MockExpenseRepository::new();
        repo.expect_add().times(1).returning(|_| Ok(()));

        let service = ExpenseService::new(Arc::new(repo));
        let expense = service
            .create("u1", payload(Decimal::new(1, 2), Utc::now() - Duration::seconds(1)))
            .await
            .unwrap();

        assert_eq!(expense.amount, Decimal::new(1, 2));
        assert_eq!(expense.user_id, "u1");
    }

    #[tokio::test]
    async fn blank_category_is_rejected() {
        let mut repo = MockExpenseRepository::new();
        repo.expect_add().never();

        let service = ExpenseService::new(Arc::new(repo));
        let mut input = payload(Decimal::ONE, Utc::now());
        input.category = "  ".to_string();

        assert!(matches!(
            service.create("u1", input).await,
            Err(AppError::Validation(msg)) if msg.contains("categoria")
        ));
    }

    #[tokio::test]
    async fn update_and_delete_on_missing_id_are_not_found() {
        let mut repo = MockExpenseRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update().never();
        repo.expect_delete().never();

        let service = ExpenseService::new(Arc::new(repo));

        assert!(matches!(
            service.update(Uuid::new_v4(), payload(Decimal::ONE, Utc::now())).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete(Uuid::new_v4()).await, Err(AppError::NotFound(_))));
    }
}
