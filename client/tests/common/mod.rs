//! In-process stand-in for the task endpoints.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use tasklist_client::{Operation, RequestError, TaskApi};
use tasklist_model::{
    sort_newest_first, validate_create, validate_update, CreateTaskRequest, DeleteConfirmation,
    Task, TaskId, UpdateTaskRequest,
};

#[derive(Default)]
pub struct FakeApi {
    tasks: RefCell<Vec<Task>>,
    fail_next: Cell<Option<Operation>>,
    calls: RefCell<Vec<Operation>>,
}

impl FakeApi {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            ..Self::default()
        }
    }

    /// The next call of `operation` fails with a 500.
    pub fn fail_next(&self, operation: Operation) {
        self.fail_next.set(Some(operation));
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.calls.borrow().clone()
    }

    /// Server-side delete that bypasses the client, as another tab would.
    pub fn delete_behind_the_back(&self, id: &TaskId) {
        self.tasks.borrow_mut().retain(|t| &t.id != id);
    }

    pub fn stored(&self, id: &TaskId) -> Option<Task> {
        self.tasks.borrow().iter().find(|t| &t.id == id).cloned()
    }

    fn enter(&self, operation: Operation) -> Result<(), RequestError> {
        self.calls.borrow_mut().push(operation);
        if self.fail_next.get() == Some(operation) {
            self.fail_next.set(None);
            return Err(RequestError::rejected(operation, 500, "Server error"));
        }
        Ok(())
    }
}

fn not_found(operation: Operation) -> RequestError {
    RequestError::rejected(operation, 404, "Task not found")
}

#[async_trait(?Send)]
impl TaskApi for FakeApi {
    async fn list(&self) -> Result<Vec<Task>, RequestError> {
        self.enter(Operation::List)?;
        let mut tasks = self.tasks.borrow().clone();
        sort_newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn get(&self, id: &TaskId) -> Result<Task, RequestError> {
        self.enter(Operation::Get)?;
        self.stored(id).ok_or_else(|| not_found(Operation::Get))
    }

    async fn create(&self, input: &CreateTaskRequest) -> Result<Task, RequestError> {
        self.enter(Operation::Create)?;
        let fields = validate_create(input.clone())
            .map_err(|e| RequestError::rejected(Operation::Create, 400, e.to_string()))?;
        let task = Task::new(fields);
        self.tasks.borrow_mut().push(task.clone());
        Ok(task)
    }

    async fn update(
        &self,
        id: &TaskId,
        updates: &UpdateTaskRequest,
    ) -> Result<Task, RequestError> {
        self.enter(Operation::Update)?;
        let patch = validate_update(updates.clone())
            .map_err(|e| RequestError::rejected(Operation::Update, 400, e.to_string()))?;
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| not_found(Operation::Update))?;
        task.apply(patch);
        Ok(task.clone())
    }

    async fn delete(&self, id: &TaskId) -> Result<DeleteConfirmation, RequestError> {
        self.enter(Operation::Delete)?;
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|t| &t.id != id);
        if tasks.len() == before {
            return Err(not_found(Operation::Delete));
        }
        Ok(DeleteConfirmation::deleted())
    }
}

pub fn task(title: &str) -> Task {
    Task::new(validate_create(CreateTaskRequest::new(title)).unwrap())
}
