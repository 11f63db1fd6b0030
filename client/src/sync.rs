//! Client-side mirror of the server's task list.
//!
//! Writes are confirm-then-apply: a [`Mutation`] is sent, and only the
//! resolved [`Outcome`] ever touches the local sequence. Outcomes are applied
//! in resolution order, and each one rewrites at most the record it names, so
//! overlapping writes to different tasks cannot clobber one another.

use tasklist_model::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};
use thiserror::Error;

use crate::api::{RequestError, TaskApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Load,
    Add,
    Toggle,
    Edit,
    Remove,
}

impl Action {
    /// Banner text shown when this action fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Action::Load => "Failed to load tasks",
            Action::Add => "Failed to add task",
            Action::Toggle => "Failed to update task",
            Action::Edit => "Failed to edit task",
            Action::Remove => "Failed to delete task",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .action.failure_message())]
pub struct SyncError {
    pub action: Action,
    pub source: RequestError,
}

/// A write (or the initial read) waiting to be sent.
#[derive(Debug, Clone)]
pub enum Mutation {
    Load,
    Add(CreateTaskRequest),
    Toggle(Task),
    Edit(Task, UpdateTaskRequest),
    Remove(Task),
}

/// A resolved request, ready to be folded into a [`TaskCollection`].
#[derive(Debug, Clone)]
pub enum Outcome {
    Loaded(Result<Vec<Task>, RequestError>),
    Added(Result<Task, RequestError>),
    Updated {
        action: Action,
        target: TaskId,
        result: Result<Task, RequestError>,
    },
    Removed {
        target: TaskId,
        result: Result<(), RequestError>,
    },
}

impl Mutation {
    pub fn action(&self) -> Action {
        match self {
            Mutation::Load => Action::Load,
            Mutation::Add(_) => Action::Add,
            Mutation::Toggle(_) => Action::Toggle,
            Mutation::Edit(..) => Action::Edit,
            Mutation::Remove(_) => Action::Remove,
        }
    }

    /// The existing record this mutation writes to, if any.
    pub fn target(&self) -> Option<&TaskId> {
        match self {
            Mutation::Toggle(task) | Mutation::Edit(task, _) | Mutation::Remove(task) => {
                Some(&task.id)
            }
            Mutation::Load | Mutation::Add(_) => None,
        }
    }

    /// Performs the request. Exactly one attempt is made.
    pub async fn send<A: TaskApi + ?Sized>(self, api: &A) -> Outcome {
        match self {
            Mutation::Load => Outcome::Loaded(api.list().await),
            Mutation::Add(input) => Outcome::Added(api.create(&input).await),
            Mutation::Toggle(task) => {
                let updates = UpdateTaskRequest::completed(!task.completed);
                Outcome::Updated {
                    action: Action::Toggle,
                    result: api.update(&task.id, &updates).await,
                    target: task.id,
                }
            }
            Mutation::Edit(task, updates) => Outcome::Updated {
                action: Action::Edit,
                result: api.update(&task.id, &updates).await,
                target: task.id,
            },
            Mutation::Remove(task) => Outcome::Removed {
                result: api.delete(&task.id).await.map(|_| ()),
                target: task.id,
            },
        }
    }
}

impl Outcome {
    pub fn target(&self) -> Option<&TaskId> {
        match self {
            Outcome::Updated { target, .. } | Outcome::Removed { target, .. } => Some(target),
            Outcome::Loaded(_) | Outcome::Added(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Outcome::Loaded(Err(_))
                | Outcome::Added(Err(_))
                | Outcome::Updated { result: Err(_), .. }
                | Outcome::Removed { result: Err(_), .. }
        )
    }
}

/// Last server-confirmed task list, plus a loading flag and an error slot.
#[derive(Debug, Clone, Default)]
pub struct TaskCollection {
    tasks: Vec<Task>,
    loading: bool,
    error: Option<SyncError>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&SyncError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Folds a resolved request into the local state. Returns `true` when the
    /// task sequence itself changed.
    pub fn apply(&mut self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Loaded(Ok(tasks)) => {
                tracing::debug!(count = tasks.len(), "tasks loaded");
                self.loading = false;
                self.error = None;
                self.tasks = tasks;
                true
            }
            Outcome::Loaded(Err(source)) => {
                self.loading = false;
                self.fail(Action::Load, source)
            }
            Outcome::Added(Ok(task)) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                } else {
                    self.tasks.insert(0, task);
                }
                true
            }
            Outcome::Added(Err(source)) => self.fail(Action::Add, source),
            Outcome::Updated {
                result: Ok(task), ..
            } => match self.tasks.iter_mut().find(|t| t.id == task.id) {
                Some(slot) => {
                    *slot = task;
                    true
                }
                None => {
                    tracing::debug!(id = %task.id, "update resolved for a task no longer listed");
                    false
                }
            },
            Outcome::Updated {
                action,
                result: Err(source),
                ..
            } => self.fail(action, source),
            Outcome::Removed {
                target,
                result: Ok(()),
            } => {
                let before = self.tasks.len();
                self.tasks.retain(|t| t.id != target);
                self.tasks.len() != before
            }
            Outcome::Removed {
                result: Err(source),
                ..
            } => self.fail(Action::Remove, source),
        }
    }

    fn fail(&mut self, action: Action, source: RequestError) -> bool {
        tracing::warn!(?action, error = %source, "task sync failed");
        self.error = Some(SyncError { action, source });
        false
    }

    pub async fn initial_load<A: TaskApi + ?Sized>(&mut self, api: &A) {
        self.begin_load();
        let outcome = Mutation::Load.send(api).await;
        self.apply(outcome);
    }

    pub async fn add<A: TaskApi + ?Sized>(&mut self, api: &A, input: CreateTaskRequest) {
        let outcome = Mutation::Add(input).send(api).await;
        self.apply(outcome);
    }

    pub async fn toggle<A: TaskApi + ?Sized>(&mut self, api: &A, task: &Task) {
        let outcome = Mutation::Toggle(task.clone()).send(api).await;
        self.apply(outcome);
    }

    pub async fn edit<A: TaskApi + ?Sized>(
        &mut self,
        api: &A,
        task: &Task,
        updates: UpdateTaskRequest,
    ) {
        let outcome = Mutation::Edit(task.clone(), updates).send(api).await;
        self.apply(outcome);
    }

    pub async fn remove<A: TaskApi + ?Sized>(&mut self, api: &A, task: &Task) {
        let outcome = Mutation::Remove(task.clone()).send(api).await;
        self.apply(outcome);
    }
}
