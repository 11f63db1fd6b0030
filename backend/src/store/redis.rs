//! Redis-backed task repository.
//!
//! Key layout:
//!
//! - `task:{id}` holds the JSON document
//! - `tasks:seq` is the insertion counter
//! - `tasks:index` is a sorted set of ids scored by insertion sequence

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tasklist_model::{Task, TaskId};

use super::{StoreError, TaskRepository};

const TASK_KEY_PREFIX: &str = "task:";
const SEQUENCE_KEY: &str = "tasks:seq";
const INDEX_KEY: &str = "tasks:index";

fn task_key(id: &TaskId) -> String {
    format!("{TASK_KEY_PREFIX}{id}")
}

#[derive(Clone)]
pub struct RedisTaskRepository {
    conn: ConnectionManager,
}

impl RedisTaskRepository {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl TaskRepository for RedisTaskRepository {
    async fn all(&self) -> Result<Vec<Task>, StoreError> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.zrange(INDEX_KEY, 0, -1).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| format!("{TASK_KEY_PREFIX}{id}")).collect();
        let documents: Vec<Option<String>> = conn.mget(&keys).await?;

        let mut tasks = Vec::with_capacity(documents.len());
        for json in documents.into_iter().flatten() {
            tasks.push(serde_json::from_str::<Task>(&json)?);
        }
        Ok(tasks)
    }

    async fn find(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        let mut conn = self.conn.clone();
        let json: Option<String> = conn.get(task_key(id)).await?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        let json = serde_json::to_string(task)?;
        let mut conn = self.conn.clone();

        let sequence: i64 = conn.incr(SEQUENCE_KEY, 1).await?;
        let _: () = redis::pipe()
            .atomic()
            .set(task_key(&task.id), json)
            .ignore()
            .zadd(INDEX_KEY, task.id.as_str(), sequence)
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn save(&self, task: &Task) -> Result<bool, StoreError> {
        let json = serde_json::to_string(task)?;
        let mut conn = self.conn.clone();

        // XX: only overwrite a document that still exists.
        let written: Option<String> = redis::cmd("SET")
            .arg(task_key(&task.id))
            .arg(json)
            .arg("XX")
            .query_async(&mut conn)
            .await?;
        Ok(written.is_some())
    }

    async fn remove(&self, id: &TaskId) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let (deleted,): (usize,) = redis::pipe()
            .atomic()
            .del(task_key(id))
            .zrem(INDEX_KEY, id.as_str())
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(deleted > 0)
    }
}
