use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Redis,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub redis_url: String,
    pub store: StoreKind,
    pub static_dir: PathBuf,
}

impl Config {
    /// Reads `HOST`, `PORT`, `REDIS_URL`, `TASK_STORE` and `STATIC_DIR`,
    /// after loading a `.env` file if one is present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = var_or("HOST", "0.0.0.0");
        let port = var_or("PORT", "3000");
        let addr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("invalid listen address {host}:{port}"))?;

        let store = match var_or("TASK_STORE", "redis").to_ascii_lowercase().as_str() {
            "redis" => StoreKind::Redis,
            "memory" => StoreKind::Memory,
            other => anyhow::bail!("TASK_STORE must be 'redis' or 'memory', got '{other}'"),
        };

        Ok(Self {
            addr,
            redis_url: var_or("REDIS_URL", "redis://127.0.0.1:6379"),
            store,
            static_dir: PathBuf::from(var_or("STATIC_DIR", "frontend/dist")),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
