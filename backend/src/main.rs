use std::sync::Arc;

use anyhow::Context;
use tasklist_server::config::{Config, StoreKind};
use tasklist_server::store::{InMemoryTaskRepository, RedisTaskRepository, TaskRepository};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let repository: Arc<dyn TaskRepository> = match config.store {
        StoreKind::Redis => {
            let repository = RedisTaskRepository::connect(&config.redis_url)
                .await
                .with_context(|| format!("failed to connect to Redis at {}", config.redis_url))?;
            tracing::info!(url = %config.redis_url, "connected to Redis");
            Arc::new(repository)
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory task store; data is lost on exit");
            Arc::new(InMemoryTaskRepository::new())
        }
    };

    let app = tasklist_server::app(repository, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    tracing::info!(addr = %config.addr, static_dir = %config.static_dir.display(), "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
