//! Client side of the task list: HTTP transport, the local task cache and the
//! inline-edit state machine. Nothing here touches the DOM, so the same code
//! runs in the browser and under native tests.

mod api;
mod edit;
mod remote;
mod sync;

pub use api::{Operation, RequestError, TaskApi};
pub use edit::{EditCoordinator, EditGesture, EditSlot};
pub use remote::RemoteTaskClient;
pub use sync::{Action, Mutation, Outcome, SyncError, TaskCollection};
