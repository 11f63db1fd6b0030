use tasklist_model::{Task, TaskId, UpdateTaskRequest};

use crate::sync::TaskCollection;

/// The single inline-edit slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSlot {
    #[default]
    Idle,
    Editing {
        task_id: TaskId,
        draft: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditGesture {
    Commit,
    Cancel,
}

impl EditGesture {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(EditGesture::Commit),
            "Escape" | "Esc" => Some(EditGesture::Cancel),
            _ => None,
        }
    }
}

/// Owns the edit slot. At most one task is being edited at a time, and every
/// transition checks that the caller names the task currently in the slot.
#[derive(Debug, Clone, Default)]
pub struct EditCoordinator {
    slot: EditSlot,
}

impl EditCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self) -> &EditSlot {
        &self.slot
    }

    pub fn is_idle(&self) -> bool {
        self.slot == EditSlot::Idle
    }

    pub fn is_editing(&self, id: &TaskId) -> bool {
        matches!(&self.slot, EditSlot::Editing { task_id, .. } if task_id == id)
    }

    pub fn draft(&self, id: &TaskId) -> Option<&str> {
        match &self.slot {
            EditSlot::Editing { task_id, draft } if task_id == id => Some(draft),
            _ => None,
        }
    }

    /// Starts editing `task`, dropping any unsaved draft for another task.
    pub fn begin_edit(&mut self, task: &Task) {
        if let EditSlot::Editing { task_id, .. } = &self.slot {
            if task_id != &task.id {
                tracing::debug!(discarded = %task_id, "edit draft discarded");
            }
        }
        self.slot = EditSlot::Editing {
            task_id: task.id.clone(),
            draft: task.title.clone(),
        };
    }

    /// Ignored unless `id` is the task being edited.
    pub fn update_draft(&mut self, id: &TaskId, value: impl Into<String>) -> bool {
        match &mut self.slot {
            EditSlot::Editing { task_id, draft } if task_id == id => {
                *draft = value.into();
                true
            }
            _ => false,
        }
    }

    /// Leaves edit mode for `task` and returns the title change to send, if
    /// the trimmed draft is non-empty and differs from the current title.
    ///
    /// The slot is released before the request resolves, so a later
    /// [`begin_edit`](Self::begin_edit) is never undone by this commit.
    pub fn commit_edit(&mut self, task: &Task) -> Option<UpdateTaskRequest> {
        if !self.is_editing(&task.id) {
            return None;
        }
        let EditSlot::Editing { draft, .. } = std::mem::take(&mut self.slot) else {
            return None;
        };

        let title = draft.trim();
        if title.is_empty() || title == task.title {
            return None;
        }
        Some(UpdateTaskRequest::title(title))
    }

    pub fn cancel_edit(&mut self, task: &Task) -> bool {
        if self.is_editing(&task.id) {
            self.slot = EditSlot::Idle;
            true
        } else {
            false
        }
    }

    /// Routes a key press from the edit field. Returns the update to send
    /// when the key committed a change.
    pub fn handle_key(&mut self, task: &Task, key: &str) -> Option<UpdateTaskRequest> {
        match EditGesture::from_key(key)? {
            EditGesture::Commit => self.commit_edit(task),
            EditGesture::Cancel => {
                self.cancel_edit(task);
                None
            }
        }
    }

    /// Drops the slot if the task under edit is no longer in `tasks`.
    pub fn reconcile(&mut self, tasks: &TaskCollection) -> bool {
        match &self.slot {
            EditSlot::Editing { task_id, .. } if !tasks.contains(task_id) => {
                tracing::debug!(id = %task_id, "edited task vanished, leaving edit mode");
                self.slot = EditSlot::Idle;
                true
            }
            _ => false,
        }
    }
}
