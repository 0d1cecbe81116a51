//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use psiagram_core::Config;
use psiagram_detection::{LabelDetector, RekognitionDetector};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on invalid settings
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment(), config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let storage = storage::setup_storage(&config).await?;

    let detector: Arc<dyn LabelDetector> =
        Arc::new(RekognitionDetector::new(config.aws_region()).await);
    tracing::info!(region = %config.aws_region(), "Label detection client initialized");

    let state = Arc::new(AppState::new(config.clone(), storage, detector));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
