// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{common::error::AppError, config::AppState};

/// Id do usuário autenticado, resolvido a partir do token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

// Valida o bearer token e deixa o usuário disponível nos extensions da requisição
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Header ausente ou malformado dá no mesmo: 401
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(AppError::unauthenticated)?;

    let user_id = app_state.auth_service.resolve_user_id(bearer.token())?;

    request.extensions_mut().insert(AuthenticatedUser(user_id));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(AppError::unauthenticated)
    }
}
