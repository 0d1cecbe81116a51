//! AWS Rekognition label detection

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_rekognition::error::{DisplayErrorContext, SdkError};
use aws_sdk_rekognition::types::{Image, S3Object};
use aws_sdk_rekognition::Client as RekognitionClient;
use psiagram_core::models::Label;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::traits::{DetectionError, DetectionRequest, DetectionResult, LabelDetector};

/// Rekognition-backed detector. The client is built once and reused for every request.
#[derive(Clone)]
pub struct RekognitionDetector {
    client: RekognitionClient,
    region: String,
}

impl Debug for RekognitionDetector {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RekognitionDetector")
            .field("region", &self.region)
            .finish()
    }
}

impl RekognitionDetector {
    /// Create a detector for the given region, loading credentials from the default chain.
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;

        Self::from_client(RekognitionClient::new(&config), region)
    }

    pub fn from_client(client: RekognitionClient, region: &str) -> Self {
        Self {
            client,
            region: region.to_string(),
        }
    }
}

/// Convert SDK labels, keeping service order and skipping unnamed entries.
pub(crate) fn convert_labels(labels: &[aws_sdk_rekognition::types::Label]) -> Vec<Label> {
    labels
        .iter()
        .filter_map(|label| {
            let name = label.name()?;
            Some(Label::new(name, label.confidence().unwrap_or(0.0)))
        })
        .collect()
}

fn map_sdk_error<E, R>(err: SdkError<E, R>) -> DetectionError
where
    E: std::error::Error + 'static,
    R: Debug,
{
    match err {
        SdkError::ServiceError(service) => {
            DetectionError::Service(DisplayErrorContext(service.err()).to_string())
        }
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            DetectionError::Transport(DisplayErrorContext(&err).to_string())
        }
        other => DetectionError::Service(DisplayErrorContext(&other).to_string()),
    }
}

#[async_trait]
impl LabelDetector for RekognitionDetector {
    async fn detect_labels(&self, request: &DetectionRequest) -> DetectionResult<Vec<Label>> {
        let start = std::time::Instant::now();

        let image = Image::builder()
            .s3_object(
                S3Object::builder()
                    .bucket(&request.bucket)
                    .name(&request.key)
                    .build(),
            )
            .build();

        let response = self
            .client
            .detect_labels()
            .image(image)
            .max_labels(request.max_labels)
            .min_confidence(request.min_confidence)
            .send()
            .await
            .map_err(|e| {
                let err = map_sdk_error(e);
                tracing::error!(
                    error = %err,
                    bucket = %request.bucket,
                    key = %request.key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Rekognition label detection failed"
                );
                err
            })?;

        let labels = convert_labels(response.labels());

        tracing::info!(
            bucket = %request.bucket,
            key = %request.key,
            labels_count = labels.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Rekognition label detection completed"
        );

        Ok(labels)
    }
}
