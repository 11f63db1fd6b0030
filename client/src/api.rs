use std::fmt;

use async_trait::async_trait;
use tasklist_model::{CreateTaskRequest, DeleteConfirmation, Task, TaskId, UpdateTaskRequest};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single failed attempt against the task endpoints. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} request failed: {reason}")]
pub struct RequestError {
    pub operation: Operation,
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
    pub reason: String,
}

impl RequestError {
    pub fn transport(operation: Operation, reason: impl Into<String>) -> Self {
        Self {
            operation,
            status: None,
            reason: reason.into(),
        }
    }

    pub fn rejected(operation: Operation, status: u16, reason: impl Into<String>) -> Self {
        Self {
            operation,
            status: Some(status),
            reason: reason.into(),
        }
    }
}

/// The task endpoint set, as seen from a client.
///
/// Futures are not `Send`: the browser implementation runs on the page's
/// single thread.
#[async_trait(?Send)]
pub trait TaskApi {
    async fn list(&self) -> Result<Vec<Task>, RequestError>;

    async fn get(&self, id: &TaskId) -> Result<Task, RequestError>;

    async fn create(&self, input: &CreateTaskRequest) -> Result<Task, RequestError>;

    async fn update(&self, id: &TaskId, updates: &UpdateTaskRequest)
        -> Result<Task, RequestError>;

    async fn delete(&self, id: &TaskId) -> Result<DeleteConfirmation, RequestError>;
}
