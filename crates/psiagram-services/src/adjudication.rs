//! Label Detection & Adjudication
//!
//! Runs a staged image through the label detection service and accepts it only
//! when the required label is among the results. Rejected uploads are removed
//! from the staging area.

use psiagram_core::models::{Adjudication, Label, ModerationStatus};
use psiagram_core::{AppError, Config};
use psiagram_detection::{DetectionRequest, LabelDetector};
use psiagram_storage::keys::{is_staging_key, validate_key};
use psiagram_storage::Storage;
use std::sync::Arc;

use crate::validation::require_field;

#[derive(Clone)]
pub struct AdjudicationService {
    storage: Option<Arc<dyn Storage>>,
    detector: Arc<dyn LabelDetector>,
    required_label: String,
    max_labels: i32,
    min_confidence: f32,
}

impl AdjudicationService {
    pub fn new(
        storage: Option<Arc<dyn Storage>>,
        detector: Arc<dyn LabelDetector>,
        config: &Config,
    ) -> Self {
        Self {
            storage,
            detector,
            required_label: config.required_label().to_string(),
            max_labels: config.detection_max_labels(),
            min_confidence: config.detection_min_confidence(),
        }
    }

    /// Label an upload must carry to be approved
    pub fn required_label(&self) -> &str {
        &self.required_label
    }

    /// Exact, case-sensitive name match. Confidence is already bounded by the
    /// floor sent with the detection request.
    pub fn is_acceptable(&self, labels: &[Label]) -> bool {
        labels.iter().any(|label| label.name == self.required_label)
    }

    /// Adjudicate the staged object at `file_key`.
    ///
    /// A rejected upload is deleted exactly once before returning. Detection and
    /// storage failures surface as [`AppError::Processing`]; when detection fails
    /// nothing is deleted.
    #[tracing::instrument(skip(self), fields(operation = "adjudicate_upload"))]
    pub async fn adjudicate(&self, file_key: Option<&str>) -> Result<Adjudication, AppError> {
        let file_key = require_field(file_key, "file_key")?;
        validate_key(file_key).map_err(|e| AppError::InvalidRequest(e.to_string()))?;
        // Only staged uploads may be adjudicated; a rejection deletes the object.
        if !is_staging_key(file_key) {
            return Err(AppError::InvalidRequest(format!(
                "Key is not a staged upload: {}",
                file_key
            )));
        }

        let storage = self.storage.as_ref().ok_or_else(|| {
            AppError::ServerMisconfiguration("S3 bucket name not configured".to_string())
        })?;

        let request = DetectionRequest {
            bucket: storage.bucket().to_string(),
            key: file_key.to_string(),
            max_labels: self.max_labels,
            min_confidence: self.min_confidence,
        };

        let labels = self
            .detector
            .detect_labels(&request)
            .await
            .map_err(|e| AppError::Processing(e.to_string()))?;

        if self.is_acceptable(&labels) {
            tracing::info!(
                file_key = %file_key,
                labels_count = labels.len(),
                "Upload approved"
            );
            return Ok(Adjudication {
                status: ModerationStatus::Approved,
                labels,
            });
        }

        storage
            .delete(file_key)
            .await
            .map_err(|e| AppError::Processing(e.to_string()))?;

        tracing::info!(
            file_key = %file_key,
            required_label = %self.required_label,
            labels_count = labels.len(),
            "Upload rejected and removed from staging"
        );

        Ok(Adjudication {
            status: ModerationStatus::Rejected,
            labels,
        })
    }
}
