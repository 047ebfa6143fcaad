// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(ignore)]
    #[serde(skip_serializing)]
    pub user_id: String,

    #[schema(example = "Felipe")]
    pub name: String,

    // Único por usuário dono, não globalmente
    #[schema(example = "felipe@test.com")]
    pub email: String,

    #[schema(example = "+55 11 99999-0000")]
    pub phone: Option<String>,

    #[schema(example = "Souza Design")]
    pub company_name: Option<String>,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientPayload {
    #[schema(example = "Felipe")]
    pub name: String,

    #[schema(example = "felipe@test.com")]
    pub email: String,

    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub notes: Option<String>,
}

// Criação e atualização aceitam o mesmo formato.
pub type CreateClientPayload = ClientPayload;
pub type UpdateClientPayload = ClientPayload;
