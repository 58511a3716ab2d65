pub mod color;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod measurements;
pub mod sessions;
pub mod settings;

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use config::AppConfig;
use db::Database;
use measurements::{IngestionService, MeasurementStore, QueryService};
use sessions::SessionRegistry;
use settings::SettingsStore;

#[derive(Clone)]
pub struct AppState {
    pub ingestion: IngestionService,
    pub query: QueryService,
    pub sessions: SessionRegistry,
    pub settings: Arc<SettingsStore>,
}

impl AppState {
    pub fn new(db: Database, settings: SettingsStore, config: &AppConfig) -> Self {
        let store = MeasurementStore::new(db);
        Self {
            ingestion: IngestionService::new(store.clone()),
            query: QueryService::new(store),
            sessions: SessionRegistry::new(config.window_capacity, config.session_idle_ttl),
            settings: Arc::new(settings),
        }
    }
}

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("ColorSense starting up...");

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let shutdown = CancellationToken::new();
    runtime.block_on(async move {
        let token = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(err) => error!("Failed to listen for shutdown signal: {err}"),
            }
            token.cancel();
        });

        serve(config, shutdown).await
    })
}

/// Open storage, bind and serve until `shutdown` is cancelled.
pub async fn serve(config: AppConfig, shutdown: CancellationToken) -> Result<()> {
    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!("failed to create data directory {}", config.data_dir.display())
    })?;

    let database = Database::new(config.database_path())?;
    let settings = SettingsStore::new(config.settings_path())?;
    let state = AppState::new(database, settings, &config);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Server running on http://{address}");

    axum::serve(listener, http::router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}
