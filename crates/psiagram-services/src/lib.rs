//! Psiagram Services Layer
//!
//! The upload moderation pipeline: staging new uploads behind a presigned URL,
//! adjudicating staged images by their detected labels, and relocating staged
//! objects into their permanent namespace. HTTP handling stays in psiagram-api.

pub mod adjudication;
pub mod posts;
pub mod relocation;
pub mod staging;
pub mod validation;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use adjudication::AdjudicationService;
pub use posts::PostComposer;
pub use relocation::{RelocatedAsset, RelocationService};
pub use staging::{StagedUploadTicket, UploadStagingService};

pub use psiagram_detection::{DetectionRequest, LabelDetector, RekognitionDetector};
pub use psiagram_storage::{create_storage, S3Storage, Storage, StorageError};
