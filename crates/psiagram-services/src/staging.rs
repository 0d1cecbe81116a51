//! Upload Staging Initiator
//!
//! Hands out a time-limited presigned PUT URL for a fresh key in the staging
//! namespace. Nothing is written to the content store here; the client performs
//! the upload itself using the returned URL.

use psiagram_core::models::InitiateUploadResponse;
use psiagram_core::{AppError, Config};
use psiagram_storage::keys::generate_staging_key;
use psiagram_storage::Storage;
use std::sync::Arc;
use std::time::Duration;

use crate::validation::{require_field, validate_filename};

/// Presigned write URL together with the staging key it is scoped to.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedUploadTicket {
    pub upload_url: String,
    pub file_key: String,
}

impl From<StagedUploadTicket> for InitiateUploadResponse {
    fn from(ticket: StagedUploadTicket) -> Self {
        InitiateUploadResponse {
            upload_url: ticket.upload_url,
            file_key: ticket.file_key,
        }
    }
}

#[derive(Clone)]
pub struct UploadStagingService {
    storage: Option<Arc<dyn Storage>>,
    expires_in: Duration,
}

impl UploadStagingService {
    /// `storage` is `None` when no bucket is configured; `initiate` then reports a
    /// server misconfiguration instead of failing at startup.
    pub fn new(storage: Option<Arc<dyn Storage>>, config: &Config) -> Self {
        Self {
            storage,
            expires_in: Duration::from_secs(config.upload_url_expiry_secs()),
        }
    }

    #[tracing::instrument(skip(self), fields(operation = "initiate_upload"))]
    pub async fn initiate(
        &self,
        filename: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<StagedUploadTicket, AppError> {
        let filename = require_field(filename, "filename")?;
        let content_type = require_field(content_type, "content_type")?;
        validate_filename(filename)?;

        let storage = self.storage.as_ref().ok_or_else(|| {
            AppError::ServerMisconfiguration("S3 bucket name not configured".to_string())
        })?;

        let file_key = generate_staging_key(filename);
        let upload_url = storage
            .presigned_put_url(&file_key, content_type, self.expires_in)
            .await
            .map_err(|e| AppError::Storage(format!("Error generating URL: {}", e)))?;

        tracing::debug!(file_key = %file_key, "Upload staged");

        Ok(StagedUploadTicket {
            upload_url,
            file_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockStorage, StorageCall};
    use psiagram_core::config::PipelineConfig;

    fn service(storage: &Arc<MockStorage>) -> UploadStagingService {
        let storage: Arc<dyn Storage> = storage.clone();
        UploadStagingService::new(Some(storage), &Config::new(PipelineConfig::default()))
    }

    #[tokio::test]
    async fn test_initiate_returns_key_and_url_for_key() {
        let storage = Arc::new(MockStorage::new());
        let ticket = service(&storage)
            .initiate(Some("cute.png"), Some("image/png"))
            .await
            .unwrap();

        assert!(ticket.file_key.starts_with("uploads/"));
        assert!(ticket.file_key.ends_with("_cute.png"));
        assert!(ticket.upload_url.contains(&ticket.file_key));
        assert_eq!(
            storage.calls(),
            vec![StorageCall::Presign {
                key: ticket.file_key.clone(),
                content_type: "image/png".to_string(),
                expires_in_secs: 3600,
            }]
        );
    }

    #[tokio::test]
    async fn test_filename_and_content_type_are_not_trimmed() {
        let storage = Arc::new(MockStorage::new());
        let ticket = service(&storage)
            .initiate(Some(" cute.png"), Some("image/png "))
            .await
            .unwrap();

        assert!(ticket.file_key.ends_with("_ cute.png"), "key: {}", ticket.file_key);
        assert!(matches!(
            &storage.calls()[0],
            StorageCall::Presign { content_type, .. } if content_type == "image/png "
        ));
    }

    #[tokio::test]
    async fn test_identical_requests_get_distinct_keys() {
        let storage = Arc::new(MockStorage::new());
        let service = service(&storage);

        let first = service.initiate(Some("dog.jpg"), Some("image/jpeg")).await.unwrap();
        let second = service.initiate(Some("dog.jpg"), Some("image/jpeg")).await.unwrap();

        assert_ne!(first.file_key, second.file_key);
    }

    #[tokio::test]
    async fn test_missing_fields_fail_before_presigning() {
        let storage = Arc::new(MockStorage::new());
        let service = service(&storage);

        let missing_name = service.initiate(None, Some("image/png")).await;
        let missing_type = service.initiate(Some("cute.png"), None).await;
        let blank_type = service.initiate(Some("cute.png"), Some(" ")).await;

        for result in [missing_name, missing_type, blank_type] {
            assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        }
        assert!(storage.calls().is_empty());
    }

    #[tokio::test]
    async fn test_path_like_filename_is_rejected() {
        let storage = Arc::new(MockStorage::new());
        let result = service(&storage)
            .initiate(Some("../posts/cute.png"), Some("image/png"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert!(storage.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_bucket_is_misconfiguration() {
        let service = UploadStagingService::new(None, &Config::new(PipelineConfig::default()));

        let result = service.initiate(Some("cute.png"), Some("image/png")).await;

        assert!(matches!(result, Err(AppError::ServerMisconfiguration(_))));
    }

    #[tokio::test]
    async fn test_invalid_input_wins_over_missing_bucket() {
        let service = UploadStagingService::new(None, &Config::new(PipelineConfig::default()));

        let result = service.initiate(None, Some("image/png")).await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_presign_failure_is_storage_error() {
        let storage = Arc::new(MockStorage::new());
        storage.fail_presign("signing key unavailable");

        let result = service(&storage)
            .initiate(Some("cute.png"), Some("image/png"))
            .await;

        match result {
            Err(AppError::Storage(msg)) => {
                assert!(msg.starts_with("Error generating URL:"), "msg: {}", msg);
                assert!(msg.contains("signing key unavailable"));
            }
            other => panic!("Expected Storage error, got {:?}", other),
        }
    }
}
