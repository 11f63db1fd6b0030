mod memory;
mod redis;

pub use self::memory::InMemoryTaskRepository;
pub use self::redis::RedisTaskRepository;

use async_trait::async_trait;
use tasklist_model::{Task, TaskId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis: {0}")]
    Redis(#[from] ::redis::RedisError),
    #[error("corrupt task document: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable home of task documents. Every write has completed once the
/// returned future resolves.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks, in insertion order.
    async fn all(&self) -> Result<Vec<Task>, StoreError>;

    async fn find(&self, id: &TaskId) -> Result<Option<Task>, StoreError>;

    async fn insert(&self, task: &Task) -> Result<(), StoreError>;

    /// Overwrites an existing document. Returns `false` if it vanished.
    async fn save(&self, task: &Task) -> Result<bool, StoreError>;

    async fn remove(&self, id: &TaskId) -> Result<bool, StoreError>;
}
