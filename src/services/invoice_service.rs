// src/services/invoice_service.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validation::{positive_money, require_owner},
    },
    db::InvoiceRepository,
    models::finance::{CreateInvoicePayload, Invoice, UpdateInvoicePayload, DEFAULT_INVOICE_STATUS},
};

const INVOICE_NOT_FOUND: &str = "Fatura não encontrada.";

#[derive(Clone)]
pub struct InvoiceService {
    repo: Arc<dyn InvoiceRepository>,
}

impl InvoiceService {
    pub fn new(repo: Arc<dyn InvoiceRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Invoice>, AppError> {
        require_owner(owner_id)?;
        self.repo.get_by_owner(owner_id).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, owner_id: &str, payload: CreateInvoicePayload) -> Result<Invoice, AppError> {
        require_owner(owner_id)?;

        let issue_date = payload.issue_date.unwrap_or_else(Utc::now);
        let due_date = payload.due_date.unwrap_or(issue_date);
        let amount = validate(payload.amount, issue_date, due_date)?;

        if !self.repo.client_belongs_to_user(owner_id, payload.client_id).await? {
            return Err(AppError::validation(
                "Cliente não encontrado ou não pertence ao usuário.",
            ));
        }
        if !self.repo.project_belongs_to_user(owner_id, payload.project_id).await? {
            return Err(AppError::validation(
                "Projeto não encontrado ou não pertence ao usuário.",
            ));
        }

        let invoice = Invoice {
            id: Uuid::new_v4(),
            user_id: owner_id.to_string(),
            client_id: payload.client_id,
            project_id: payload.project_id,
            issue_date,
            due_date,
            amount,
            status: status_or(payload.status, DEFAULT_INVOICE_STATUS),
            pdf_url: payload.pdf_url,
            created_at: Utc::now(),
        };

        self.repo.add(&invoice).await?;
        tracing::info!("🧾 Fatura {} emitida para o cliente {}.", invoice.id, invoice.client_id);

        Ok(invoice)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateInvoicePayload) -> Result<(), AppError> {
        let mut invoice = self.find(id).await?;

        let issue_date = payload.issue_date.unwrap_or(invoice.issue_date);
        let due_date = payload.due_date.unwrap_or(invoice.due_date);
        let amount = validate(payload.amount, issue_date, due_date)?;

        invoice.issue_date = issue_date;
        invoice.due_date = due_date;
        invoice.amount = amount;
        invoice.status = status_or(payload.status, &invoice.status);
        invoice.pdf_url = payload.pdf_url;

        self.repo.update(&invoice).await?;
        tracing::info!("🧾 Fatura {} atualizada.", invoice.id);

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let invoice = self.find(id).await?;

        self.repo.delete(&invoice).await?;
        tracing::info!("🗑️ Fatura {} removida.", invoice.id);

        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Invoice, AppError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(INVOICE_NOT_FOUND))
    }
}

// Devolve o valor já arredondado para persistir
fn validate(amount: Decimal, issue_date: DateTime<Utc>, due_date: DateTime<Utc>) -> Result<Decimal, AppError> {
    let amount = positive_money(amount, "O valor da fatura deve ser maior que zero.")?;
    if due_date < issue_date {
        return Err(AppError::validation(
            "A data de vencimento não pode ser anterior à data de emissão.",
        ));
    }
    Ok(amount)
}

fn status_or(status: Option<String>, fallback: &str) -> String {
    status
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
