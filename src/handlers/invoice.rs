// src/handlers/invoice.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{error::AppError, json::ApiJson},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::finance::{CreateInvoicePayload, Invoice, UpdateInvoicePayload},
};

// GET /api/Invoice
#[utoipa::path(
    get,
    path = "/api/Invoice",
    tag = "Invoice",
    responses((status = 200, description = "Faturas do usuário", body = Vec<Invoice>)),
    security(("api_jwt" = []))
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.invoice_service.list(&user.0).await?;
    Ok(Json(invoices))
}

// GET /api/Invoice/{id}
#[utoipa::path(
    get,
    path = "/api/Invoice/{id}",
    tag = "Invoice",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura encontrada", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .invoice_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Fatura não encontrada."))?;

    Ok(Json(invoice))
}

// GET /api/Invoice/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/Invoice/{id}/pdf",
    tag = "Invoice",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "PDF da fatura", content_type = "application/pdf"),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn invoice_pdf(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pdf_bytes = app_state.document_service.generate_invoice_pdf(id).await?;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"fatura_{}.pdf\"", id),
        ),
    ];

    Ok((headers, pdf_bytes))
}

// POST /api/Invoice
#[utoipa::path(
    post,
    path = "/api/Invoice",
    tag = "Invoice",
    request_body = CreateInvoicePayload,
    responses(
        (status = 201, description = "Fatura emitida", body = Invoice),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(payload): ApiJson<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.invoice_service.create(&user.0, payload).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

// PUT /api/Invoice/{id}
#[utoipa::path(
    put,
    path = "/api/Invoice/{id}",
    tag = "Invoice",
    request_body = UpdateInvoicePayload,
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 204, description = "Fatura atualizada"),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state.invoice_service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/Invoice/{id}
#[utoipa::path(
    delete,
    path = "/api/Invoice/{id}",
    tag = "Invoice",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 204, description = "Fatura removida"),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.invoice_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
