//! HTTP task store: validated CRUD over Redis (or memory) behind a JSON API.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::service::TaskService;
use crate::store::TaskRepository;

/// API routes only, with permissive CORS.
pub fn api(repository: Arc<dyn TaskRepository>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/tasks", get(routes::get_tasks).post(routes::create_task))
        .route(
            "/api/tasks/:id",
            get(routes::get_task)
                .put(routes::update_task)
                .delete(routes::delete_task),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(TaskService::new(repository))
}

/// API routes plus the built browser client served from `static_dir`.
pub fn app(repository: Arc<dyn TaskRepository>, static_dir: impl AsRef<Path>) -> Router {
    api(repository).fallback_service(
        ServeDir::new(static_dir.as_ref()).append_index_html_on_directories(true),
    )
}
