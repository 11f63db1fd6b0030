use proptest::prelude::*;
use tasklist_model::{
    validate_create, validate_update, CreateTaskRequest, Task, TaskId, UpdateTaskRequest,
};
use uuid::Uuid;

fn stored(title: &str, description: &str, completed: bool) -> Task {
    let mut task = Task::new(validate_create(CreateTaskRequest::new(title)).unwrap());
    task.description = description.to_string();
    task.completed = completed;
    task
}

proptest! {
    #[test]
    fn every_spelling_of_an_id_is_equal(bytes in any::<[u8; 16]>(), upper in any::<bool>()) {
        let uuid = Uuid::from_bytes(bytes);
        let text = if upper { uuid.to_string().to_uppercase() } else { uuid.to_string() };

        let native: TaskId = serde_json::from_value(serde_json::json!({ "$oid": text.clone() })).unwrap();
        let raw: TaskId = serde_json::from_value(serde_json::json!(text)).unwrap();

        prop_assert_eq!(&TaskId::from(uuid), &native);
        prop_assert_eq!(&native, &raw);
        prop_assert_eq!(raw.to_uuid().unwrap(), uuid);
    }

    #[test]
    fn toggling_completion_preserves_text_fields(
        title in "[a-zA-Z][a-zA-Z ]{0,20}",
        description in "[a-z ]{0,30}",
        completed in any::<bool>(),
    ) {
        let mut task = stored(&title, &description, completed);
        let before = task.clone();

        task.apply(validate_update(UpdateTaskRequest::completed(!completed)).unwrap());

        prop_assert_eq!(&task.title, &before.title);
        prop_assert_eq!(&task.description, &before.description);
        prop_assert_eq!(task.completed, !completed);
        prop_assert_eq!(task.created_at, before.created_at);
    }

    #[test]
    fn retitling_preserves_completion(new_title in "[a-zA-Z]{1,20}", completed in any::<bool>()) {
        let mut task = stored("Original", "notes", completed);

        task.apply(validate_update(UpdateTaskRequest::title(new_title.clone())).unwrap());

        prop_assert_eq!(&task.title, &new_title);
        prop_assert_eq!(task.completed, completed);
        prop_assert_eq!(task.description.as_str(), "notes");
    }
}
