// src/handlers/project.rs

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{error::AppError, json::ApiJson},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        file::{FileUploadForm, StoredFile},
        project::{ProjectHoursSummary, ProjectPayload, ProjectResponse, UpdateProjectHoursPayload},
    },
};

// =============================================================================
//  CRUD
// =============================================================================

// GET /api/Project
#[utoipa::path(
    get,
    path = "/api/Project",
    tag = "Project",
    responses(
        (status = 200, description = "Projetos do usuário", body = Vec<ProjectResponse>),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_projects(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let projects = app_state.project_service.list(&user.0).await?;
    let response: Vec<ProjectResponse> = projects.into_iter().map(ProjectResponse::from).collect();
    Ok(Json(response))
}

// GET /api/Project/{id}
#[utoipa::path(
    get,
    path = "/api/Project/{id}",
    tag = "Project",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Projeto encontrado", body = ProjectResponse),
        (status = 404, description = "Projeto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_project(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state
        .project_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Projeto não encontrado."))?;

    Ok(Json(ProjectResponse::from(project)))
}

// POST /api/Project
#[utoipa::path(
    post,
    path = "/api/Project",
    tag = "Project",
    request_body = ProjectPayload,
    responses(
        (status = 201, description = "Projeto criado", body = ProjectResponse),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_project(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(payload): ApiJson<ProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state.project_service.create(&user.0, payload).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

// PUT /api/Project/{id}
#[utoipa::path(
    put,
    path = "/api/Project/{id}",
    tag = "Project",
    request_body = ProjectPayload,
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 204, description = "Projeto atualizado"),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Projeto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_project(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<ProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state.project_service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/Project/{id}
#[utoipa::path(
    delete,
    path = "/api/Project/{id}",
    tag = "Project",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 204, description = "Projeto removido"),
        (status = 404, description = "Projeto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_project(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    // Anexos primeiro: a cascata do banco não apaga os blobs
    app_state.file_service.delete_all_for_project(id).await?;
    app_state.project_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  HORAS E VALOR-HORA
// =============================================================================

// PUT /api/Project/{id}/hours
#[utoipa::path(
    put,
    path = "/api/Project/{id}/hours",
    tag = "Project",
    request_body = UpdateProjectHoursPayload,
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Resumo recalculado", body = ProjectHoursSummary),
        (status = 404, description = "Projeto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_hours(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateProjectHoursPayload>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.project_service.update_hours(id, payload).await?;
    Ok(Json(summary))
}

// GET /api/Project/{id}/hours-summary
#[utoipa::path(
    get,
    path = "/api/Project/{id}/hours-summary",
    tag = "Project",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Horas, valor-hora e total ganho", body = ProjectHoursSummary),
        (status = 404, description = "Projeto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn hours_summary(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.project_service.hours_summary(id).await?;
    Ok(Json(summary))
}

// =============================================================================
//  ANEXOS
// =============================================================================

// POST /api/Project/{id}/files
#[utoipa::path(
    post,
    path = "/api/Project/{id}/files",
    tag = "Project",
    request_body(content = FileUploadForm, content_type = "multipart/form-data"),
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 201, description = "Arquivo anexado", body = StoredFile),
        (status = 400, description = "Nenhum arquivo enviado"),
        (status = 404, description = "Projeto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_file(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::validation(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(e.body_text()))?
    {
        // Campos de texto do formulário são ignorados
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let file = app_state
            .file_service
            .upload(id, &file_name, bytes.to_vec(), content_type)
            .await?;

        return Ok((StatusCode::CREATED, Json(file)));
    }

    Err(AppError::validation("Nenhum arquivo foi enviado."))
}

// GET /api/Project/{id}/files
#[utoipa::path(
    get,
    path = "/api/Project/{id}/files",
    tag = "Project",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Anexos do projeto", body = Vec<StoredFile>),
        (status = 404, description = "Projeto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_files(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let files = app_state.file_service.list(id).await?;
    Ok(Json(files))
}

// GET /api/Project/{id}/files/{fileId}/download
#[utoipa::path(
    get,
    path = "/api/Project/{id}/files/{fileId}/download",
    tag = "Project",
    params(
        ("id" = Uuid, Path, description = "ID do projeto"),
        ("fileId" = Uuid, Path, description = "ID do arquivo")
    ),
    responses(
        (status = 200, description = "Conteúdo do arquivo", content_type = "application/octet-stream"),
        (status = 404, description = "Arquivo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn download_file(
    State(app_state): State<AppState>,
    Path((id, file_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let (file, bytes) = app_state.file_service.download(id, file_id).await?;

    let disposition = format!(
        "attachment; filename=\"{}{}\"",
        file.file_name.replace('"', ""),
        file.file_extension
    );
    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, bytes))
}

// DELETE /api/Project/{id}/files/{fileId}
#[utoipa::path(
    delete,
    path = "/api/Project/{id}/files/{fileId}",
    tag = "Project",
    params(
        ("id" = Uuid, Path, description = "ID do projeto"),
        ("fileId" = Uuid, Path, description = "ID do arquivo")
    ),
    responses(
        (status = 204, description = "Arquivo removido"),
        (status = 404, description = "Arquivo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_file(
    State(app_state): State<AppState>,
    Path((id, file_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state.file_service.delete(id, file_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
