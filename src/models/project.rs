// src/models/project.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const PROJECT_STATUSES: [&str; 4] = ["Pendente", "Em Andamento", "Concluído", "Cancelado"];

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub id: Uuid,

    pub user_id: String,

    // Projeto pode não ter cliente
    pub client_id: Option<Uuid>,

    #[schema(example = "Site institucional")]
    pub title: String,

    pub description: Option<String>,

    #[schema(example = "Em Andamento")]
    pub status: String,

    pub due_date: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    #[schema(example = "100.00")]
    pub hourly_rate: Decimal,

    #[schema(example = "12.50")]
    pub total_hours: Decimal,
}

impl Project {
    pub fn total_earned(&self) -> Decimal {
        self.total_hours * self.hourly_rate
    }

    /// Aplica uma atualização de horas/valor-hora, na ordem:
    /// total absoluto (com piso 0), incremento (sem piso), valor-hora
    /// (negativo é ignorado) e, por fim, piso 0 no total.
    pub fn apply_hours(&mut self, update: &UpdateProjectHoursPayload) {
        if let Some(total_hours) = update.total_hours {
            self.total_hours = total_hours.max(Decimal::ZERO);
        }

        if let Some(hours_to_add) = update.hours_to_add {
            self.total_hours += hours_to_add;
        }

        if let Some(hourly_rate) = update.hourly_rate {
            if hourly_rate >= Decimal::ZERO {
                self.hourly_rate = hourly_rate;
            }
        }

        if self.total_hours < Decimal::ZERO {
            self.total_hours = Decimal::ZERO;
        }
    }

    pub fn hours_summary(&self) -> ProjectHoursSummary {
        ProjectHoursSummary {
            project_id: self.id,
            project_title: self.title.clone(),
            total_hours: self.total_hours,
            hourly_rate: self.hourly_rate,
            total_earned: self.total_earned(),
            last_updated: Utc::now(),
        }
    }
}

/// Projeção de leitura: o projeto + o total ganho (sempre derivado).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: Project,

    #[schema(example = "1250.00")]
    pub total_earned: Decimal,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        let total_earned = project.total_earned();
        Self { project, total_earned }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPayload {
    pub client_id: Option<Uuid>,

    #[schema(example = "Site institucional")]
    pub title: String,

    pub description: Option<String>,

    #[schema(example = "Pendente")]
    pub status: String,

    pub due_date: Option<DateTime<Utc>>,
}

pub type CreateProjectPayload = ProjectPayload;
pub type UpdateProjectPayload = ProjectPayload;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProjectHoursPayload {
    #[schema(example = "10.0")]
    pub total_hours: Option<Decimal>,

    #[schema(example = "120.00")]
    pub hourly_rate: Option<Decimal>,

    #[schema(example = "2.5")]
    pub hours_to_add: Option<Decimal>,

    #[schema(example = "Reunião de alinhamento")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHoursSummary {
    pub project_id: Uuid,
    pub project_title: String,
    pub total_hours: Decimal,
    pub hourly_rate: Decimal,
    pub total_earned: Decimal,
    pub last_updated: DateTime<Utc>,
}
