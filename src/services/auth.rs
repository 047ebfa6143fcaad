// src/services/auth.rs

use std::sync::Arc;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;

use crate::common::error::AppError;

/// Claim legado usado como identificador quando não há `sub`.
pub const NAME_IDENTIFIER_CLAIM: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";

const LEEWAY_SECONDS: u64 = 300;

/// Extrai o id do usuário de um conjunto de claims já validado.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, claims: &Value) -> Result<String, AppError>;
}

/// Lê `sub`, com fallback para o claim `nameidentifier`.
pub struct SubjectClaimResolver;

impl IdentityResolver for SubjectClaimResolver {
    fn resolve(&self, claims: &Value) -> Result<String, AppError> {
        [claims.get("sub"), claims.get(NAME_IDENTIFIER_CLAIM)]
            .into_iter()
            .flatten()
            .find_map(non_empty_str)
            .ok_or_else(AppError::unauthenticated)
    }
}

/// Lê `user_metadata.sub`; `user_metadata` pode vir como objeto ou como JSON serializado em string.
pub struct UserMetadataResolver;

impl IdentityResolver for UserMetadataResolver {
    fn resolve(&self, claims: &Value) -> Result<String, AppError> {
        let metadata = match claims.get("user_metadata") {
            Some(Value::String(raw)) => {
                serde_json::from_str::<Value>(raw).map_err(|_| AppError::unauthenticated())?
            }
            Some(obj @ Value::Object(_)) => obj.clone(),
            _ => return Err(AppError::unauthenticated()),
        };

        metadata
            .get("sub")
            .and_then(non_empty_str)
            .ok_or_else(AppError::unauthenticated)
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Qual estratégia de extração o deploy usa (`JWT_USER_ID_CLAIM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityClaim {
    Subject,
    UserMetadata,
}

impl IdentityClaim {
    pub fn resolver(self) -> Arc<dyn IdentityResolver> {
        match self {
            IdentityClaim::Subject => Arc::new(SubjectClaimResolver),
            IdentityClaim::UserMetadata => Arc::new(UserMetadataResolver),
        }
    }
}

impl std::str::FromStr for IdentityClaim {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sub" => Ok(IdentityClaim::Subject),
            "user_metadata" => Ok(IdentityClaim::UserMetadata),
            other => Err(anyhow::anyhow!(
                "JWT_USER_ID_CLAIM inválido: '{}' (use 'sub' ou 'user_metadata')",
                other
            )),
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
    resolver: Arc<dyn IdentityResolver>,
}

impl AuthService {
    pub fn new(
        jwt_secret: &str,
        issuer: &str,
        audience: &str,
        resolver: Arc<dyn IdentityResolver>,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = LEEWAY_SECONDS;

        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
            resolver,
        }
    }

    /// Valida o token (assinatura, emissor, audiência, expiração) e devolve o id do usuário.
    pub fn resolve_user_id(&self, token: &str) -> Result<String, AppError> {
        let token_data = decode::<Value>(token, &self.decoding_key, &self.validation)?;
        self.resolver.resolve(&token_data.claims)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};

    pub const SECRET: &str = "segredo-de-teste";
    pub const ISSUER: &str = "https://auth.freelancer-hub.test/auth/v1";
    pub const AUDIENCE: &str = "authenticated";

    pub fn token_with(mut claims: Value) -> String {
        let defaults = json!({
            "iss": ISSUER,
            "aud": AUDIENCE,
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        });
        if let (Some(target), Some(source)) = (claims.as_object_mut(), defaults.as_object()) {
            for (key, value) in source {
                target.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
    }

    pub fn token_for(user_id: &str) -> String {
        token_with(json!({ "sub": user_id }))
    }
}
