//! Content Relocator
//!
//! Promotes a staged upload to its permanent key with move semantics: copy to the
//! destination, then delete the staging object. A failed delete after a successful
//! copy leaves the object in both places and is not rolled back.

use chrono::{NaiveDate, Utc};
use psiagram_core::models::AssetKind;
use psiagram_core::AppError;
use psiagram_storage::keys::{destination_key, is_staging_key, validate_key};
use psiagram_storage::{Storage, StorageError};
use std::sync::Arc;

/// Permanent location of a relocated upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocatedAsset {
    pub key: String,
    pub url: String,
}

#[derive(Clone)]
pub struct RelocationService {
    storage: Option<Arc<dyn Storage>>,
}

impl RelocationService {
    pub fn new(storage: Option<Arc<dyn Storage>>) -> Self {
        Self { storage }
    }

    /// Relocate using today's UTC date for dated namespaces.
    pub async fn relocate(
        &self,
        staging_key: &str,
        kind: AssetKind,
    ) -> Result<RelocatedAsset, AppError> {
        self.relocate_on(staging_key, kind, Utc::now().date_naive())
            .await
    }

    #[tracing::instrument(skip(self), fields(operation = "relocate_upload"))]
    pub async fn relocate_on(
        &self,
        staging_key: &str,
        kind: AssetKind,
        date: NaiveDate,
    ) -> Result<RelocatedAsset, AppError> {
        validate_key(staging_key).map_err(|e| AppError::InvalidRequest(e.to_string()))?;
        if !is_staging_key(staging_key) {
            return Err(AppError::InvalidRequest(format!(
                "Key is not a staged upload: {}",
                staging_key
            )));
        }

        let storage = self.storage.as_ref().ok_or_else(|| {
            AppError::ServerMisconfiguration("S3 bucket name not configured".to_string())
        })?;

        let new_key = destination_key(&kind.destination_prefix(date), staging_key);

        let url = storage
            .copy(staging_key, &new_key)
            .await
            .map_err(|e| match e {
                StorageError::NotFound(key) => {
                    tracing::warn!(staging_key = %key, "Staged upload missing at relocation");
                    AppError::Relocation(format!("Staged upload not found: {}", key))
                }
                other => AppError::Relocation(other.to_string()),
            })?;

        if let Err(e) = storage.delete(staging_key).await {
            tracing::warn!(
                error = %e,
                staging_key = %staging_key,
                new_key = %new_key,
                "Staging object left behind after copy"
            );
            return Err(AppError::Relocation(e.to_string()));
        }

        tracing::info!(
            staging_key = %staging_key,
            new_key = %new_key,
            "Upload relocated"
        );

        Ok(RelocatedAsset { key: new_key, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockStorage, StorageCall};

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn service(storage: &Arc<MockStorage>) -> RelocationService {
        let storage: Arc<dyn Storage> = storage.clone();
        RelocationService::new(Some(storage))
    }

    #[tokio::test]
    async fn test_post_relocation_copies_then_deletes_source() {
        let storage = Arc::new(MockStorage::new());
        storage.put_object("uploads/abc_dog.jpg");

        let asset = service(&storage)
            .relocate_on("uploads/abc_dog.jpg", AssetKind::Post, june_first())
            .await
            .unwrap();

        assert_eq!(asset.key, "posts/2024/06/01/abc_dog.jpg");
        assert_eq!(asset.url, storage.public_url("posts/2024/06/01/abc_dog.jpg"));
        assert_eq!(
            storage.calls(),
            vec![
                StorageCall::Copy {
                    from: "uploads/abc_dog.jpg".to_string(),
                    to: "posts/2024/06/01/abc_dog.jpg".to_string(),
                },
                StorageCall::Delete {
                    key: "uploads/abc_dog.jpg".to_string(),
                },
            ]
        );
        assert!(!storage.has_object("uploads/abc_dog.jpg"));
        assert!(storage.has_object("posts/2024/06/01/abc_dog.jpg"));
    }

    #[tokio::test]
    async fn test_avatar_relocation_uses_undated_namespace() {
        let storage = Arc::new(MockStorage::new());
        storage.put_object("uploads/abc_me.png");

        let asset = service(&storage)
            .relocate("uploads/abc_me.png", AssetKind::Avatar)
            .await
            .unwrap();

        assert_eq!(asset.key, "avatars/abc_me.png");
    }

    #[tokio::test]
    async fn test_non_staging_key_is_invalid_request() {
        let storage = Arc::new(MockStorage::new());
        let service = service(&storage);

        for key in ["posts/2024/06/01/abc_dog.jpg", "uploads/", "uploads/../secret"] {
            let result = service.relocate_on(key, AssetKind::Post, june_first()).await;
            assert!(
                matches!(result, Err(AppError::InvalidRequest(_))),
                "key {} should be rejected",
                key
            );
        }
        assert!(storage.calls().is_empty());
    }

    #[tokio::test]
    async fn test_copy_failure_skips_delete() {
        let storage = Arc::new(MockStorage::new());
        storage.put_object("uploads/abc_dog.jpg");
        storage.fail_copy("slow down");

        let result = service(&storage)
            .relocate_on("uploads/abc_dog.jpg", AssetKind::Post, june_first())
            .await;

        assert!(matches!(result, Err(AppError::Relocation(msg)) if msg.contains("slow down")));
        assert!(storage.delete_calls().is_empty());
        assert!(storage.has_object("uploads/abc_dog.jpg"));
    }

    #[tokio::test]
    async fn test_missing_source_is_relocation_error() {
        let storage = Arc::new(MockStorage::new());

        let result = service(&storage)
            .relocate_on("uploads/abc_dog.jpg", AssetKind::Post, june_first())
            .await;

        match result {
            Err(AppError::Relocation(msg)) => {
                assert_eq!(msg, "Staged upload not found: uploads/abc_dog.jpg")
            }
            other => panic!("Expected Relocation error, got {:?}", other),
        }
        assert!(storage.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_duplicate() {
        let storage = Arc::new(MockStorage::new());
        storage.put_object("uploads/abc_dog.jpg");
        storage.fail_delete("access denied");

        let result = service(&storage)
            .relocate_on("uploads/abc_dog.jpg", AssetKind::GroupPicture, june_first())
            .await;

        assert!(matches!(result, Err(AppError::Relocation(msg)) if msg.contains("access denied")));
        assert!(storage.has_object("uploads/abc_dog.jpg"));
        assert!(storage.has_object("group_pictures/abc_dog.jpg"));
    }
}
