// src/models/finance.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_INVOICE_STATUS: &str = "pendente";

// --- Faturas ---

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub user_id: String,
    pub client_id: Uuid,
    pub project_id: Uuid,

    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,

    #[schema(example = "1500.00")]
    pub amount: Decimal,

    #[schema(example = "pendente")]
    pub status: String,

    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateInvoicePayload {
    pub client_id: Uuid,
    pub project_id: Uuid,
    pub issue_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,

    #[schema(example = "1500.00")]
    pub amount: Decimal,

    pub status: Option<String>,
    pub pdf_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateInvoicePayload {
    pub issue_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub amount: Decimal,
    pub status: Option<String>,
    pub pdf_url: Option<String>,
}

// --- Pagamentos ---

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,

    #[schema(ignore)]
    #[serde(skip_serializing)]
    pub user_id: String,

    pub invoice_id: Uuid,

    #[schema(example = "750.00")]
    pub amount: Decimal,

    pub payment_date: DateTime<Utc>,

    // Texto livre (Pix, transferência, cartão...)
    #[schema(example = "Pix")]
    pub payment_method: String,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePaymentPayload {
    pub invoice_id: Uuid,
    pub amount: Decimal,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePaymentPayload {
    pub amount: Decimal,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: String,
    pub notes: Option<String>,
}

// --- Despesas ---

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub user_id: String,

    #[schema(example = "Licença do Figma")]
    pub title: String,

    #[schema(example = "75.90")]
    pub amount: Decimal,

    #[schema(example = "Software")]
    pub category: String,

    pub payment_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpensePayload {
    #[schema(example = "Licença do Figma")]
    pub title: String,

    #[schema(example = "75.90")]
    pub amount: Decimal,

    #[schema(example = "Software")]
    pub category: String,

    pub payment_date: DateTime<Utc>,
    pub notes: Option<String>,
}

pub type CreateExpensePayload = ExpensePayload;
pub type UpdateExpensePayload = ExpensePayload;
