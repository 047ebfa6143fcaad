// src/services/client_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validation::{require_email, require_owner, require_text},
    },
    db::ClientRepository,
    models::client::{Client, CreateClientPayload, UpdateClientPayload},
};

const CLIENT_NOT_FOUND: &str = "Cliente não encontrado.";

#[derive(Clone)]
pub struct ClientService {
    repo: Arc<dyn ClientRepository>,
}

impl ClientService {
    pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Client>, AppError> {
        require_owner(owner_id)?;
        self.repo.get_by_owner(owner_id).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, owner_id: &str, payload: CreateClientPayload) -> Result<Client, AppError> {
        require_owner(owner_id)?;
        self.validate(owner_id, &payload.name, &payload.email, None).await?;

        let client = Client {
            id: Uuid::new_v4(),
            user_id: owner_id.to_string(),
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            phone: payload.phone,
            company_name: payload.company_name,
            notes: payload.notes,
            created_at: Utc::now(),
        };

        self.repo.add(&client).await?;
        tracing::info!("🤝 Cliente {} criado para o usuário {}.", client.id, owner_id);

        Ok(client)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateClientPayload) -> Result<(), AppError> {
        let mut client = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(CLIENT_NOT_FOUND))?;

        // A unicidade é verificada contra o dono atual do registro
        let owner_id = client.user_id.clone();
        self.validate(&owner_id, &payload.name, &payload.email, Some(id)).await?;

        client.name = payload.name.trim().to_string();
        client.email = payload.email.trim().to_string();
        client.phone = payload.phone;
        client.company_name = payload.company_name;
        client.notes = payload.notes;

        self.repo.update(&client).await?;
        tracing::info!("🤝 Cliente {} atualizado.", client.id);

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let client = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(CLIENT_NOT_FOUND))?;

        self.repo.delete(&client).await?;
        tracing::info!("🗑️ Cliente {} removido.", client.id);

        Ok(())
    }

    async fn validate(
        &self,
        owner_id: &str,
        name: &str,
        email: &str,
        exclude_client_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        require_text(name, "O nome do cliente é obrigatório.")?;
        require_text(email, "O email do cliente é obrigatório.")?;
        require_email(email)?;

        if self
            .repo
            .email_exists(owner_id, email.trim(), exclude_client_id)
            .await?
        {
            return Err(AppError::validation("Já existe um cliente com este email."));
        }

        Ok(())
    }
}
