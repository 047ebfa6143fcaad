// src/handlers/task_item.rs

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
    models::task_item::{CreateTaskItemPayload, TaskItem, UpdateTaskItemPayload},
};

// GET /api/TaskItem
#[utoipa::path(
    get,
    path = "/api/TaskItem",
    tag = "TaskItem",
    responses((status = 200, description = "Tarefas de todos os projetos do usuário", body = Vec<TaskItem>)),
    security(("api_jwt" = []))
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let tasks = app_state.task_item_service.list(&user.0).await?;
    Ok(Json(tasks))
}

// GET /api/TaskItem/project/{projectId}
#[utoipa::path(
    get,
    path = "/api/TaskItem/project/{projectId}",
    tag = "TaskItem",
    params(("projectId" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Tarefas do projeto", body = Vec<TaskItem>),
        (status = 400, description = "Projeto não pertence ao usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_by_project(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tasks = app_state
        .task_item_service
        .list_by_project(&user.0, project_id)
        .await?;
    Ok(Json(tasks))
}

// GET /api/TaskItem/{id}
#[utoipa::path(
    get,
    path = "/api/TaskItem/{id}",
    tag = "TaskItem",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Tarefa encontrada", body = TaskItem),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_task(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let task = app_state
        .task_item_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Tarefa não encontrada."))?;

    Ok(Json(task))
}

// POST /api/TaskItem
#[utoipa::path(
    post,
    path = "/api/TaskItem",
    tag = "TaskItem",
    request_body = CreateTaskItemPayload,
    responses(
        (status = 201, description = "Tarefa criada", body = TaskItem),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(payload): ApiJson<CreateTaskItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let task = app_state.task_item_service.create(&user.0, payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

// PUT /api/TaskItem/{id}
#[utoipa::path(
    put,
    path = "/api/TaskItem/{id}",
    tag = "TaskItem",
    request_body = UpdateTaskItemPayload,
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 204, description = "Tarefa atualizada"),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_task(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateTaskItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state.task_item_service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/TaskItem/{id}
#[utoipa::path(
    delete,
    path = "/api/TaskItem/{id}",
    tag = "TaskItem",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 204, description = "Tarefa removida"),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_task(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.task_item_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
