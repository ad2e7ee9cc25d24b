//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use stillcut_core::Config;
use stillcut_storage::LocalBlobStore;

/// Validate config, start logging, then build state and router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry();

    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!(
        storage_dir = %config.storage_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        "Configuration loaded and validated successfully"
    );

    build_app(config).await
}

/// State and router without touching the global subscriber.
pub async fn build_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let store = LocalBlobStore::new(&config.storage_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to open storage directory {}",
                config.storage_dir.display()
            )
        })?;

    let state = Arc::new(AppState::new(&config, Arc::new(store)));
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
