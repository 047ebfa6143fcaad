// src/models/file.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Metadados do blob; o conteúdo fica no object storage.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub id: Uuid,

    #[schema(example = "contrato")]
    pub file_name: String,

    #[schema(example = ".pdf")]
    pub file_extension: String,

    #[schema(example = "https://storage.example.com/freelancer-hub/projects/.../contrato.pdf")]
    pub file_url: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub blob_key: String,

    // Tamanho em bytes
    #[schema(example = "20480")]
    pub file_size: Decimal,

    pub created_at: DateTime<Utc>,
}

/// Vínculo N:N entre arquivo e projeto.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub id: Uuid,
    pub project_id: Uuid,
    pub file_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Formulário multipart do upload (apenas para a documentação).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct FileUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
