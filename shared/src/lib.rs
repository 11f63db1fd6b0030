//! Task record shared by the server and the browser client.

mod id;
mod task;
mod validate;

pub use id::{InvalidTaskId, TaskId};
pub use task::{
    sort_newest_first, CreateTaskRequest, DeleteConfirmation, Health, Task, UpdateTaskRequest,
};
pub use validate::{validate_create, validate_update, NewTask, TaskPatch, ValidationError};
