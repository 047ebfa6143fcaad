// src/services/user_service.rs

use std::sync::Arc;

use chrono::Utc;

use crate::{
    common::{
        error::AppError,
        validation::{require_email, require_owner, require_text},
    },
    db::UserRepository,
    models::user::{
        CreateUserPayload, UpdateUserPayload, User, DEFAULT_LANGUAGE, NAME_MAX_CHARS,
        NAME_MIN_CHARS, SUPPORTED_LANGUAGES,
    },
};

const USER_NOT_FOUND: &str = "Usuário não encontrado.";

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        self.repo.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.repo.get_by_id(id).await
    }

    /// Perfil do usuário autenticado (`GET /api/User/me`).
    pub async fn get_current(&self, user_id: &str) -> Result<User, AppError> {
        require_owner(user_id)?;

        self.repo
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }

    /// Primeiro acesso: cria o perfil se ainda não existir, senão devolve o atual sem alterá-lo.
    /// O `bool` indica se o usuário foi criado agora.
    pub async fn create_or_get(
        &self,
        user_id: &str,
        payload: CreateUserPayload,
        language: &str,
    ) -> Result<(User, bool), AppError> {
        require_owner(user_id)?;

        if let Some(existing) = self.repo.get_by_id(user_id).await? {
            return Ok((existing, false));
        }

        self.validate_profile(&payload.name, &payload.email, None).await?;

        let language = if SUPPORTED_LANGUAGES.contains(&language) {
            language
        } else {
            DEFAULT_LANGUAGE
        };

        let user = User {
            id: user_id.to_string(),
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            language: language.to_string(),
            created_at: Utc::now(),
        };

        self.repo.add(&user).await?;
        tracing::info!("👤 Usuário {} criado no primeiro acesso.", user.id);

        Ok((user, true))
    }

    pub async fn update(&self, id: &str, payload: UpdateUserPayload) -> Result<(), AppError> {
        require_text(id, "ID do usuário é obrigatório.")?;

        let mut user = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        self.validate_profile(&payload.name, &payload.email, Some(id.to_string()))
            .await?;

        user.name = payload.name.trim().to_string();
        user.email = payload.email.trim().to_string();

        self.repo.update(&user).await?;
        tracing::info!("👤 Usuário {} atualizado.", user.id);

        Ok(())
    }

    pub async fn update_language(&self, id: &str, language: &str) -> Result<(), AppError> {
        require_text(id, "ID do usuário é obrigatório.")?;

        let language = language.trim();
        if !SUPPORTED_LANGUAGES.contains(&language) {
            return Err(AppError::validation(format!(
                "Idioma não suportado. Valores aceitos: {}",
                SUPPORTED_LANGUAGES.join(", ")
            )));
        }

        let mut user = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        user.language = language.to_string();
        self.repo.update(&user).await?;
        tracing::info!("🌐 Idioma do usuário {} alterado para '{}'.", user.id, user.language);

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let user = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        self.repo.delete(&user).await?;
        tracing::info!("🗑️ Usuário {} removido.", user.id);

        Ok(())
    }

    // Ordem fixa: o primeiro erro encontrado é o que volta.
    async fn validate_profile(
        &self,
        name: &str,
        email: &str,
        exclude_user_id: Option<String>,
    ) -> Result<(), AppError> {
        require_text(name, "O nome do usuário é obrigatório.")?;
        require_text(email, "O email do usuário é obrigatório.")?;
        require_email(email)?;

        if self.repo.email_exists(email.trim(), exclude_user_id).await? {
            return Err(AppError::validation("Já existe um usuário com este email."));
        }

        let name_len = name.trim().chars().count();
        if name_len < NAME_MIN_CHARS {
            return Err(AppError::validation("O nome deve ter pelo menos 2 caracteres."));
        }
        if name_len > NAME_MAX_CHARS {
            return Err(AppError::validation("O nome não pode ter mais de 100 caracteres."));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::user_repo::MockUserRepository;

    fn existing_user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: "Felipe".to_string(),
            email: "felipe@test.com".to_string(),
            language: "pt".to_string(),
            created_at: Utc::now(),
        }
    }

    fn payload(name: &str, email: &str) -> CreateUserPayload {
        CreateUserPayload {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn create_with_empty_owner_is_unauthorized_and_never_persists() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().never();
        repo.expect_add().never();

        let service = UserService::new(Arc::new(repo));
        let result = service.create_or_get("", payload("Felipe", "felipe@test.com"), "pt").await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn create_returns_existing_user_untouched() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .times(1)
            .returning(|id| Ok(Some(existing_user(id))));
        repo.expect_add().never();

        let service = UserService::new(Arc::new(repo));
        let (user, created) = service
            .create_or_get("u1", payload("Outro Nome", "outro@test.com"), "en")
            .await
            .unwrap();

        assert!(!created);
        assert_eq!(user.name, "Felipe");
        assert_eq!(user.language, "pt");
    }

    #[tokio::test]
    async fn create_with_invalid_email_fails_and_never_persists() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_email_exists().never();
        repo.expect_add().never();

        let service = UserService::new(Arc::new(repo));
        let result = service.create_or_get("u1", payload("Felipe", "invalidEmail"), "pt").await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("inválido")),
            other => panic!("esperava Validation, veio {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_uses_supported_locale_and_falls_back_to_default() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_email_exists().returning(|_, _| Ok(false));
        repo.expect_add().times(2).returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repo));

        let (english, created) = service
            .create_or_get("u1", payload("Felipe", "felipe@test.com"), "en")
            .await
            .unwrap();
        assert!(created);
        assert_eq!(english.language, "en");

        let (fallback, _) = service
            .create_or_get("u2", payload("Ana", "ana@test.com"), "fr")
            .await
            .unwrap();
        assert_eq!(fallback.language, DEFAULT_LANGUAGE);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_email_exists().returning(|_, _| Ok(true));
        repo.expect_add().never();

        let service = UserService::new(Arc::new(repo));
        let result = service.create_or_get("u1", payload("Felipe", "felipe@test.com"), "pt").await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("Já existe")));
    }

    #[tokio::test]
    async fn create_rejects_short_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_email_exists().returning(|_, _| Ok(false));
        repo.expect_add().never();

        let service = UserService::new(Arc::new(repo));
        let result = service.create_or_get("u1", payload("F", "felipe@test.com"), "pt").await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("pelo menos 2")));
    }

    #[tokio::test]
    async fn update_excludes_the_user_itself_from_the_email_check() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(existing_user(id))));
        repo.expect_email_exists()
            .times(1)
            .returning(|_, exclude| Ok(exclude.as_deref() != Some("u1")));
        repo.expect_update()
            .times(1)
            .returning(|user| {
                assert_eq!(user.name, "Felipe Souza");
                Ok(())
            });

        let service = UserService::new(Arc::new(repo));
        let result = service
            .update(
                "u1",
                UpdateUserPayload {
                    name: "Felipe Souza".to_string(),
                    email: "felipe@test.com".to_string(),
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn update_with_invalid_email_fails_and_never_persists() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(existing_user(id))));
        repo.expect_email_exists().never();
        repo.expect_update().never();

        let service = UserService::new(Arc::new(repo));
        let result = service
            .update(
                "u1",
                UpdateUserPayload {
                    name: "Felipe".to_string(),
                    email: "invalidEmail".to_string(),
                },
            )
            .await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("inválido")),
            other => panic!("esperava Validation, veio {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = UserService::new(Arc::new(repo));
        let result = service.update("ghost", UpdateUserPayload::default()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = UserService::new(Arc::new(repo));

        assert!(matches!(service.delete("ghost").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_language_accepts_only_supported_codes() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .times(1)
            .returning(|id| Ok(Some(existing_user(id))));
        repo.expect_update()
            .times(1)
            .returning(|user| {
                assert_eq!(user.language, "en");
                Ok(())
            });

        let service = UserService::new(Arc::new(repo));

        assert!(service.update_language("u1", "en").await.is_ok());
        assert!(matches!(
            service.update_language("u1", "es").await,
            Err(AppError::Validation(msg)) if msg.contains("pt, en")
        ));
    }

    #[tokio::test]
    async fn get_current_with_empty_id_is_unauthorized() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().never();

        let service = UserService::new(Arc::new(repo));

        assert!(matches!(service.get_current("").await, Err(AppError::Unauthorized(_))));
    }
}
