// src/services/payment_service.rs

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validation::{positive_money, require_owner, require_text},
    },
    db::PaymentRepository,
    models::finance::{CreatePaymentPayload, Payment, UpdatePaymentPayload},
};

const PAYMENT_NOT_FOUND: &str = "Pagamento não encontrado.";
const INVOICE_NOT_OWNED: &str = "Fatura não encontrada ou não pertence ao usuário.";

#[derive(Clone)]
pub struct PaymentService {
    repo: Arc<dyn PaymentRepository>,
}

impl PaymentService {
    pub fn new(repo: Arc<dyn PaymentRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Payment>, AppError> {
        require_owner(owner_id)?;
        self.repo.get_by_owner(owner_id).await
    }

    pub async fn list_by_invoice(&self, owner_id: &str, invoice_id: Uuid) -> Result<Vec<Payment>, AppError> {
        require_owner(owner_id)?;

        if !self.repo.invoice_belongs_to_user(owner_id, invoice_id).await? {
            return Err(AppError::validation(INVOICE_NOT_OWNED));
        }

        self.repo.get_by_invoice(invoice_id).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, owner_id: &str, payload: CreatePaymentPayload) -> Result<Payment, AppError> {
        require_owner(owner_id)?;
        let amount = validate(payload.amount, &payload.payment_method)?;

        if !self
            .repo
            .invoice_belongs_to_user(owner_id, payload.invoice_id)
            .await?
        {
            return Err(AppError::validation(INVOICE_NOT_OWNED));
        }

        let now = Utc::now();
        let payment = Payment {
            id: Uuid::new_v4(),
            user_id: owner_id.to_string(),
            invoice_id: payload.invoice_id,
            amount,
            payment_date: payload.payment_date.unwrap_or(now),
            payment_method: payload.payment_method.trim().to_string(),
            notes: payload.notes,
            created_at: now,
        };

        self.repo.add(&payment).await?;
        tracing::info!("💰 Pagamento {} registrado na fatura {}.", payment.id, payment.invoice_id);

        Ok(payment)
    }

    pub async fn update(&self, id: Uuid, payload: UpdatePaymentPayload) -> Result<(), AppError> {
        let mut payment = self.find(id).await?;

        let amount = validate(payload.amount, &payload.payment_method)?;

        payment.amount = amount;
        if let Some(payment_date) = payload.payment_date {
            payment.payment_date = payment_date;
        }
        payment.payment_method = payload.payment_method.trim().to_string();
        payment.notes = payload.notes;

        self.repo.update(&payment).await?;
        tracing::info!("💰 Pagamento {} atualizado.", payment.id);

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let payment = self.find(id).await?;

        self.repo.delete(&payment).await?;
        tracing::info!("🗑️ Pagamento {} removido.", payment.id);

        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Payment, AppError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(PAYMENT_NOT_FOUND))
    }
}

// Devolve o valor já arredondado para persistir
fn validate(amount: Decimal, payment_method: &str) -> Result<Decimal, AppError> {
    let amount = positive_money(amount, "O valor do pagamento deve ser maior que zero.")?;
    require_text(payment_method, "A forma de pagamento é obrigatória.")?;
    Ok(amount)
}
