use std::sync::Arc;

use tasklist_model::{
    sort_newest_first, validate_create, validate_update, CreateTaskRequest, InvalidTaskId, Task,
    TaskId, UpdateTaskRequest, ValidationError,
};
use thiserror::Error;

use crate::store::{StoreError, TaskRepository};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("task {0} not found")]
    NotFound(TaskId),
    #[error(transparent)]
    InvalidId(#[from] InvalidTaskId),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Validated CRUD over a [`TaskRepository`].
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<Task>, TaskError> {
        let mut tasks = self.repository.all().await?;
        sort_newest_first(&mut tasks);
        Ok(tasks)
    }

    pub async fn get(&self, raw_id: &str) -> Result<Task, TaskError> {
        let id = parse_id(raw_id)?;
        self.repository
            .find(&id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    pub async fn create(&self, input: CreateTaskRequest) -> Result<Task, TaskError> {
        let task = Task::new(validate_create(input)?);
        self.repository.insert(&task).await?;
        tracing::info!(id = %task.id, "task created");
        Ok(task)
    }

    /// Load, patch, re-validate the whole document, then save.
    pub async fn update(&self, raw_id: &str, input: UpdateTaskRequest) -> Result<Task, TaskError> {
        let mut task = self.get(raw_id).await?;
        task.apply(validate_update(input)?);
        task.validate()?;

        if !self.repository.save(&task).await? {
            return Err(TaskError::NotFound(task.id));
        }
        tracing::info!(id = %task.id, completed = task.completed, "task updated");
        Ok(task)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), TaskError> {
        let id = parse_id(raw_id)?;
        if !self.repository.remove(&id).await? {
            return Err(TaskError::NotFound(id));
        }
        tracing::info!(%id, "task deleted");
        Ok(())
    }
}

fn parse_id(raw: &str) -> Result<TaskId, InvalidTaskId> {
    let id = TaskId::new(raw);
    id.to_uuid()?;
    Ok(id)
}
