//! `sortd serve` — load config, start logging, and run the HTTP server.

use std::sync::Arc;

use anyhow::{Context, Result};
use sortd_batch::BatchEngine;
use sortd_observability::init_tracing;
use sortd_server::{bind, create_router, serve, shutdown_signal, AppState, ServerConfig};
use tracing::{error, info};

/// Flag values that take precedence over file and environment config.
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub workers: Option<usize>,
}

impl Overrides {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(workers) = self.workers {
            config.batch.workers = workers;
        }
    }
}

pub async fn run(config_path: Option<&str>, overrides: Overrides) -> Result<()> {
    let mut config = match config_path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("load config '{path}'"))?,
        None => ServerConfig::from_env().context("load config from environment")?,
    };
    overrides.apply(&mut config);

    init_tracing(&config.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting sortd server");

    let engine = BatchEngine::new(&config.batch).context("start batch worker pool")?;
    let state = AppState::new(Arc::new(engine));
    let router = create_router(state, config.server.body_limit_bytes);

    let addr = config.socket_addr()?;
    let listener = match bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Error starting the server: {e}");
            return Err(e.into());
        }
    };

    serve(listener, router, shutdown_signal()).await?;
    Ok(())
}
