// src/models/task_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const TASK_STATUSES: [&str; 4] = ["Pendente", "Em Andamento", "Concluída", "Cancelada"];

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

// A tarefa pertence ao projeto; o dono (usuário) é o dono do projeto.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub id: Uuid,
    pub project_id: Uuid,

    #[schema(example = "Criar wireframes")]
    pub title: String,

    pub description: Option<String>,

    #[schema(example = "Pendente")]
    pub status: String,

    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTaskItemPayload {
    pub project_id: Uuid,

    #[schema(example = "Criar wireframes")]
    pub title: String,

    pub description: Option<String>,

    #[schema(example = "Pendente")]
    pub status: String,

    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTaskItemPayload {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub due_date: Option<DateTime<Utc>>,
}
