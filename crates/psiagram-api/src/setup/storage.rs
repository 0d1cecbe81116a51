//! Storage setup and initialization

use anyhow::Result;
use psiagram_core::Config;
use psiagram_storage::{create_storage, Storage, StorageError};
use std::sync::Arc;

/// Build the content store client. A missing bucket is not fatal: the server
/// starts and the pipeline endpoints report a misconfiguration per request.
pub async fn setup_storage(config: &Config) -> Result<Option<Arc<dyn Storage>>> {
    tracing::info!("Initializing storage...");
    match create_storage(config).await {
        Ok(storage) => {
            tracing::info!(
                bucket = %storage.bucket(),
                region = %config.aws_region(),
                endpoint = ?config.s3_endpoint(),
                "Storage initialized successfully"
            );
            Ok(Some(storage))
        }
        Err(StorageError::ConfigError(msg)) if config.s3_bucket().is_none() => {
            tracing::warn!(reason = %msg, "Storage disabled, upload endpoints will answer 500");
            Ok(None)
        }
        Err(e) => Err(anyhow::anyhow!("Failed to initialize storage: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psiagram_core::config::PipelineConfig;

    #[tokio::test]
    async fn test_missing_bucket_disables_storage() {
        let config = Config::new(PipelineConfig::default());
        assert!(setup_storage(&config).await.unwrap().is_none());
    }
}
