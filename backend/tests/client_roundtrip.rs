//! Serves the router on an ephemeral port and drives it through the same
//! client stack the browser uses.

use std::sync::Arc;

use tasklist_client::{EditCoordinator, Operation, RemoteTaskClient, TaskApi, TaskCollection};
use tasklist_model::{CreateTaskRequest, TaskId, UpdateTaskRequest};
use tasklist_server::store::InMemoryTaskRepository;
use tokio::net::TcpListener;

async fn serve() -> RemoteTaskClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = tasklist_server::api(Arc::new(InMemoryTaskRepository::new()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    RemoteTaskClient::new(format!("http://{addr}/"))
}

#[tokio::test]
async fn collection_follows_server_through_a_session() {
    let api = serve().await;
    let mut tasks = TaskCollection::new();
    let mut editor = EditCoordinator::new();

    tasks.initial_load(&api).await;
    assert!(tasks.is_empty());
    assert!(tasks.error().is_none());

    tasks.add(&api, CreateTaskRequest::new("Buy milk")).await;
    tasks
        .add(&api, CreateTaskRequest::new("Walk dog").with_description("  evening "))
        .await;
    assert_eq!(tasks.tasks()[0].title, "Walk dog");
    assert_eq!(tasks.tasks()[0].description, "evening");

    let milk = tasks.tasks()[1].clone();
    tasks.toggle(&api, &milk).await;
    assert!(tasks.get(&milk.id).unwrap().completed);

    editor.begin_edit(&milk);
    editor.update_draft(&milk.id, "Buy oat milk");
    let updates = editor.commit_edit(&milk).unwrap();
    tasks.edit(&api, &milk, updates).await;
    let renamed = tasks.get(&milk.id).unwrap();
    assert_eq!(renamed.title, "Buy oat milk");
    assert!(renamed.completed);

    let mut fresh = TaskCollection::new();
    fresh.initial_load(&api).await;
    assert_eq!(fresh.tasks(), tasks.tasks());

    tasks.remove(&api, &milk).await;
    assert_eq!(tasks.len(), 1);
    let err = api.get(&milk.id).await.unwrap_err();
    assert_eq!(err.operation, Operation::Get);
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn server_rejections_surface_as_request_errors() {
    let api = serve().await;

    let err = api.create(&CreateTaskRequest::new("   ")).await.unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(err.reason, "Title is required");

    let created = api.create(&CreateTaskRequest::new("Keep")).await.unwrap();
    let err = api
        .update(&created.id, &UpdateTaskRequest::title(" "))
        .await
        .unwrap_err();
    assert_eq!(err.operation, Operation::Update);
    assert_eq!(err.reason, "Title cannot be empty");

    let err = api.delete(&TaskId::new("bogus")).await.unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(err.reason, "Invalid task ID");

    // Reserved characters stay inside the id segment.
    let err = api.get(&TaskId::new("a/b#c")).await.unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(err.reason, "Invalid task ID");

        let confirmation = api.delete(&created.id).await.unwrap();
    assert_eq!(confirmation.message, "Task deleted");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = RemoteTaskClient::new(format!("http://{addr}"));
    let mut tasks = TaskCollection::new();
    tasks.initial_load(&api).await;

    let error = tasks.error().unwrap();
    assert_eq!(error.to_string(), "Failed to load tasks");
    assert_eq!(error.source.status, None);
    assert_eq!(error.source.operation, Operation::List);
}
