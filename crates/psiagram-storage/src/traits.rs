//! Storage abstraction trait
//!
//! This module defines the Storage trait that content store backends implement.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Presign failed: {0}")]
    PresignFailed(String),

    #[error("Copy failed: {0}")]
    CopyFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Content store operations needed by the upload pipeline.
///
/// Implementations are shared read-only across request handlers, so they must be
/// `Send + Sync` and hold no per-request state.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Bucket the store writes to.
    fn bucket(&self) -> &str;

    /// Generate a presigned PUT URL for a direct client upload to `storage_key`.
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Copy an object between keys. Returns the public URL of the destination.
    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<String>;

    /// Delete an object by key.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Publicly addressable URL of an object key.
    fn public_url(&self, storage_key: &str) -> String;
}
