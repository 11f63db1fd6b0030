use thiserror::Error;

use crate::task::{CreateTaskRequest, UpdateTaskRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title cannot be empty")]
    TitleEmpty,
}

/// Normalized fields of a record about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Normalized subset of fields to overwrite on an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

pub fn validate_create(input: CreateTaskRequest) -> Result<NewTask, ValidationError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(NewTask {
        title: title.to_string(),
        description: input
            .description
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
        completed: input.completed.unwrap_or(false),
    })
}

pub fn validate_update(input: UpdateTaskRequest) -> Result<TaskPatch, ValidationError> {
    let title = match input.title {
        Some(title) => {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::TitleEmpty);
            }
            Some(trimmed.to_string())
        }
        None => None,
    };
    Ok(TaskPatch {
        title,
        description: input.description.map(|d| d.trim().to_string()),
        completed: input.completed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn create_rejects_blank_titles(#[case] title: &str) {
        assert_eq!(
            validate_create(CreateTaskRequest::new(title)),
            Err(ValidationError::TitleRequired)
        );
    }

    #[test]
    fn create_normalizes_defaults() {
        let task = validate_create(CreateTaskRequest::new("  Buy milk ")).unwrap();
        assert_eq!(
            task,
            NewTask {
                title: "Buy milk".into(),
                description: String::new(),
                completed: false,
            }
        );

        let task = validate_create(CreateTaskRequest {
            title: "Write report".into(),
            description: Some("  quarterly  ".into()),
            completed: Some(true),
        })
        .unwrap();
        assert_eq!(task.description, "quarterly");
        assert!(task.completed);
    }

    #[rstest]
    #[case("")]
    #[case("    ")]
    fn update_rejects_blank_title(#[case] title: &str) {
        assert_eq!(
            validate_update(UpdateTaskRequest::title(title)),
            Err(ValidationError::TitleEmpty)
        );
    }

    #[test]
    fn update_keeps_absent_fields_absent_and_applies_empty_description() {
        let patch = validate_update(UpdateTaskRequest {
            description: Some(String::new()),
            ..UpdateTaskRequest::default()
        })
        .unwrap();
        assert_eq!(
            patch,
            TaskPatch {
                title: None,
                description: Some(String::new()),
                completed: None,
            }
        );
    }
}
