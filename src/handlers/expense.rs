// src/handlers/expense.rs

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
    models::finance::{Expense, ExpensePayload},
};

// GET /api/Expense
#[utoipa::path(
    get,
    path = "/api/Expense",
    tag = "Expense",
    responses((status = 200, description = "Despesas do usuário", body = Vec<Expense>)),
    security(("api_jwt" = []))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let expenses = app_state.expense_service.list(&user.0).await?;
    Ok(Json(expenses))
}

// GET /api/Expense/{id}
#[utoipa::path(
    get,
    path = "/api/Expense/{id}",
    tag = "Expense",
    params(("id" = Uuid, Path, description = "ID da despesa")),
    responses(
        (status = 200, description = "Despesa encontrada", body = Expense),
        (status = 404, description = "Despesa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_expense(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let expense = app_state
        .expense_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Despesa não encontrada."))?;

    Ok(Json(expense))
}

// POST /api/Expense
#[utoipa::path(
    post,
    path = "/api/Expense",
    tag = "Expense",
    request_body = ExpensePayload,
    responses(
        (status = 201, description = "Despesa registrada", body = Expense),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(payload): ApiJson<ExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    let expense = app_state.expense_service.create(&user.0, payload).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

// PUT /api/Expense/{id}
#[utoipa::path(
    put,
    path = "/api/Expense/{id}",
    tag = "Expense",
    request_body = ExpensePayload,
    params(("id" = Uuid, Path, description = "ID da despesa")),
    responses(
        (status = 204, description = "Despesa atualizada"),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Despesa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_expense(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<ExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state.expense_service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/Expense/{id}
#[utoipa::path(
    delete,
    path = "/api/Expense/{id}",
    tag = "Expense",
    params(("id" = Uuid, Path, description = "ID da despesa")),
    responses(
        (status = 204, description = "Despesa removida"),
        (status = 404, description = "Despesa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_expense(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.expense_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
