use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tasklist_model::{CreateTaskRequest, DeleteConfirmation, Task, TaskId, UpdateTaskRequest};

use crate::api::{Operation, RequestError, TaskApi};

/// HTTP client for `/api/tasks`. Works natively and, through `fetch`, in the
/// browser.
#[derive(Debug, Clone)]
pub struct RemoteTaskClient {
    base_url: String,
    http: Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl RemoteTaskClient {
    /// `base_url` must be absolute, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    /// The id is pushed as one percent-encoded path segment.
    fn task_url(&self, operation: Operation, id: &TaskId) -> Result<Url, RequestError> {
        let mut url = Url::parse(&self.tasks_url())
            .map_err(|e| RequestError::transport(operation, e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| {
                RequestError::transport(operation, format!("{} cannot be a base", self.base_url))
            })?
            .push(id.as_str());
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, RequestError> {
        let response = request
            .send()
            .await
            .map_err(|e| RequestError::transport(operation, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status.to_string(),
            };
            tracing::warn!(%operation, status = status.as_u16(), %reason, "task request rejected");
            return Err(RequestError::rejected(operation, status.as_u16(), reason));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RequestError::rejected(operation, status.as_u16(), e.to_string()))
    }
}

#[async_trait(?Send)]
impl TaskApi for RemoteTaskClient {
    async fn list(&self) -> Result<Vec<Task>, RequestError> {
        self.send(Operation::List, self.http.get(self.tasks_url()))
            .await
    }

    async fn get(&self, id: &TaskId) -> Result<Task, RequestError> {
        let url = self.task_url(Operation::Get, id)?;
        self.send(Operation::Get, self.http.get(url))
            .await
    }

    async fn create(&self, input: &CreateTaskRequest) -> Result<Task, RequestError> {
        self.send(Operation::Create, self.http.post(self.tasks_url()).json(input))
            .await
    }

    async fn update(
        &self,
        id: &TaskId,
        updates: &UpdateTaskRequest,
    ) -> Result<Task, RequestError> {
        let url = self.task_url(Operation::Update, id)?;
        self.send(Operation::Update, self.http.put(url).json(updates))
            .await
    }

    async fn delete(&self, id: &TaskId) -> Result<DeleteConfirmation, RequestError> {
        let url = self.task_url(Operation::Delete, id)?;
        self.send(Operation::Delete, self.http.delete(url))
            .await
    }
}
