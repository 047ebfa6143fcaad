// src/handlers/user.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{error::AppError, json::ApiJson},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::user::{CreateUserPayload, UpdateLanguagePayload, UpdateUserPayload, User},
};

// GET /api/User
#[utoipa::path(
    get,
    path = "/api/User",
    tag = "User",
    responses(
        (status = 200, description = "Lista de usuários", body = Vec<User>),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_service.list_all().await?;
    Ok(Json(users))
}

// GET /api/User/me
#[utoipa::path(
    get,
    path = "/api/User/me",
    tag = "User",
    responses(
        (status = 200, description = "Perfil do usuário autenticado", body = User),
        (status = 404, description = "Perfil ainda não criado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state.user_service.get_current(&user.0).await?;
    Ok(Json(profile))
}

// GET /api/User/{id}
#[utoipa::path(
    get,
    path = "/api/User/{id}",
    tag = "User",
    params(("id" = String, Path, description = "ID do usuário no provedor de identidade")),
    responses(
        (status = 200, description = "Usuário encontrado", body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .user_service
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Usuário não encontrado."))?;

    Ok(Json(user))
}

// POST /api/User
#[utoipa::path(
    post,
    path = "/api/User",
    tag = "User",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado no primeiro acesso", body = User),
        (status = 200, description = "Usuário já existia", body = User),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    locale: Locale,
    ApiJson(payload): ApiJson<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (profile, created) = app_state
        .user_service
        .create_or_get(&user.0, payload, &locale.0)
        .await?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(profile)))
}

// PUT /api/User/{id}
#[utoipa::path(
    put,
    path = "/api/User/{id}",
    tag = "User",
    request_body = UpdateUserPayload,
    params(("id" = String, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário atualizado"),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_service.update(&id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// PATCH /api/User/{id}/language
#[utoipa::path(
    patch,
    path = "/api/User/{id}/language",
    tag = "User",
    request_body = UpdateLanguagePayload,
    params(("id" = String, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Idioma atualizado"),
        (status = 400, description = "Idioma não suportado"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_language(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateLanguagePayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .user_service
        .update_language(&id, &payload.language)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/User/{id}
#[utoipa::path(
    delete,
    path = "/api/User/{id}",
    tag = "User",
    params(("id" = String, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário removido"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
