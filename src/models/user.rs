// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const DEFAULT_LANGUAGE: &str = "pt";
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["pt", "en"];
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;

// O id vem do provedor de identidade (claim do JWT), não é gerado aqui.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = "a7a8003b-6e49-4ac4-ab16-edde844f3d93")]
    pub id: String,

    #[schema(example = "Felipe Souza")]
    pub name: String,

    #[schema(example = "felipe@test.com")]
    pub email: String,

    #[schema(example = "pt")]
    pub language: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserPayload {
    #[schema(example = "Felipe Souza")]
    pub name: String,

    #[schema(example = "felipe@test.com")]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserPayload {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateLanguagePayload {
    #[schema(example = "en")]
    pub language: String,
}
