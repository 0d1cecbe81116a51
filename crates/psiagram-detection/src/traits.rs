//! Label detection abstraction

use async_trait::async_trait;
use psiagram_core::models::Label;
use thiserror::Error;

/// Detection errors
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The service rejected the request or could not read the object.
    #[error("{0}")]
    Service(String),

    #[error("Detection transport error: {0}")]
    Transport(String),
}

pub type DetectionResult<T> = Result<T, DetectionError>;

/// An object-store reference plus the limits applied by the detection service.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRequest {
    pub bucket: String,
    pub key: String,
    /// At most this many labels are returned
    pub max_labels: i32,
    /// Labels below this confidence percentage are dropped by the service
    pub min_confidence: f32,
}

/// Classifies the contents of an image stored in the content store.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Labels for the referenced object, in the order the service returned them.
    async fn detect_labels(&self, request: &DetectionRequest) -> DetectionResult<Vec<Label>>;
}
