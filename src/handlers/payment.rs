// src/handlers/payment.rs

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
    models::finance::{CreatePaymentPayload, Payment, UpdatePaymentPayload},
};

// GET /api/Payment
#[utoipa::path(
    get,
    path = "/api/Payment",
    tag = "Payment",
    responses((status = 200, description = "Pagamentos do usuário", body = Vec<Payment>)),
    security(("api_jwt" = []))
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state.payment_service.list(&user.0).await?;
    Ok(Json(payments))
}

// GET /api/Payment/invoice/{invoiceId}
#[utoipa::path(
    get,
    path = "/api/Payment/invoice/{invoiceId}",
    tag = "Payment",
    params(("invoiceId" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Pagamentos da fatura", body = Vec<Payment>),
        (status = 400, description = "Fatura não pertence ao usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_by_invoice(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(invoice_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state
        .payment_service
        .list_by_invoice(&user.0, invoice_id)
        .await?;
    Ok(Json(payments))
}

// GET /api/Payment/{id}
#[utoipa::path(
    get,
    path = "/api/Payment/{id}",
    tag = "Payment",
    params(("id" = Uuid, Path, description = "ID do pagamento")),
    responses(
        (status = 200, description = "Pagamento encontrado", body = Payment),
        (status = 404, description = "Pagamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payment = app_state
        .payment_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Pagamento não encontrado."))?;

    Ok(Json(payment))
}

// POST /api/Payment
#[utoipa::path(
    post,
    path = "/api/Payment",
    tag = "Payment",
    request_body = CreatePaymentPayload,
    responses(
        (status = 201, description = "Pagamento registrado", body = Payment),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(payload): ApiJson<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let payment = app_state.payment_service.create(&user.0, payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

// PUT /api/Payment/{id}
#[utoipa::path(
    put,
    path = "/api/Payment/{id}",
    tag = "Payment",
    request_body = UpdatePaymentPayload,
    params(("id" = Uuid, Path, description = "ID do pagamento")),
    responses(
        (status = 204, description = "Pagamento atualizado"),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Pagamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state.payment_service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/Payment/{id}
#[utoipa::path(
    delete,
    path = "/api/Payment/{id}",
    tag = "Payment",
    params(("id" = Uuid, Path, description = "ID do pagamento")),
    responses(
        (status = 204, description = "Pagamento removido"),
        (status = 404, description = "Pagamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.payment_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
