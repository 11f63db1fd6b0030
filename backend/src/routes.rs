use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use tasklist_model::{CreateTaskRequest, DeleteConfirmation, Health, Task, UpdateTaskRequest};

use crate::error::ApiError;
use crate::service::TaskService;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn get_tasks(State(service): State<TaskService>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(service.list().await?))
}

pub async fn get_task(
    Path(id): Path<String>,
    State(service): State<TaskService>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(service.get(&id).await?))
}

pub async fn create_task(
    State(service): State<TaskService>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(payload) = payload?;
    let task = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    Path(id): Path<String>,
    State(service): State<TaskService>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(payload) = payload?;
    Ok(Json(service.update(&id, payload).await?))
}

pub async fn delete_task(
    Path(id): Path<String>,
    State(service): State<TaskService>,
) -> Result<Json<DeleteConfirmation>, ApiError> {
    service.delete(&id).await?;
    Ok(Json(DeleteConfirmation::deleted()))
}
