use crate::{S3Storage, Storage, StorageError, StorageResult};
use psiagram_core::Config;
use std::sync::Arc;

/// Create the content store from configuration.
///
/// Fails with `ConfigError` when no bucket is configured; callers decide whether that
/// is fatal or should surface per request.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let bucket = config
        .s3_bucket()
        .map(String::from)
        .ok_or_else(|| StorageError::ConfigError("AWS_S3_BUCKET_NAME not configured".to_string()))?;
    let region = config.aws_region().to_string();
    let endpoint = config.s3_endpoint().map(String::from);

    let storage = S3Storage::new(bucket, region, endpoint).await;
    Ok(Arc::new(storage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use psiagram_core::config::PipelineConfig;

    #[tokio::test]
    async fn test_missing_bucket_is_config_error() {
        let config = Config::new(PipelineConfig::default());
        match create_storage(&config).await {
            Err(StorageError::ConfigError(msg)) => assert!(msg.contains("AWS_S3_BUCKET_NAME")),
            Err(other) => panic!("Expected ConfigError, got {:?}", other),
            Ok(_) => panic!("Expected ConfigError, got storage"),
        }
    }
}
