// src/handlers/client.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{error::AppError, json::ApiJson},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::client::{Client, ClientPayload},
};

// GET /api/Client
#[utoipa::path(
    get,
    path = "/api/Client",
    tag = "Client",
    responses(
        (status = 200, description = "Clientes do usuário", body = Vec<Client>),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_service.list(&user.0).await?;
    Ok(Json(clients))
}

// GET /api/Client/{id}
#[utoipa::path(
    get,
    path = "/api/Client/{id}",
    tag = "Client",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state
        .client_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Cliente não encontrado."))?;

    Ok(Json(client))
}

// POST /api/Client
#[utoipa::path(
    post,
    path = "/api/Client",
    tag = "Client",
    request_body = ClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(payload): ApiJson<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state.client_service.create(&user.0, payload).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

// PUT /api/Client/{id}
#[utoipa::path(
    put,
    path = "/api/Client/{id}",
    tag = "Client",
    request_body = ClientPayload,
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente atualizado"),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/Client/{id}
#[utoipa::path(
    delete,
    path = "/api/Client/{id}",
    tag = "Client",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
