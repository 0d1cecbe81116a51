//! Psiagram Storage Library
//!
//! Content store abstraction for the upload pipeline and its S3 implementation.
//!
//! # Key format
//!
//! - **Staging**: `uploads/{uuid}_{filename}`, written by clients through a presigned URL
//! - **Permanent**: `{namespace}/{uuid}_{filename}`, e.g. `posts/2024/06/01/...` or `avatars/...`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized in the
//! `keys` module so every caller builds the same layout.

pub mod factory;
pub mod keys;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
