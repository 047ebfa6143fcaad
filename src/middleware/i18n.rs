// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::models::user::{DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};

/// Idioma preferido do cliente, vindo do `Accept-Language`.
pub struct Locale(pub String);

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                // "pt-BR,en;q=0.8" -> primeiro idioma suportado, só a parte primária
                accept_language::parse(header_str)
                    .iter()
                    .map(|tag| tag.split('-').next().unwrap_or(tag).to_lowercase())
                    .find(|lang| SUPPORTED_LANGUAGES.contains(&lang.as_str()))
            })
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Ok(Locale(lang))
    }
}
