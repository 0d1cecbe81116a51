//! LabelDetector double returning canned labels

use super::MockStorage;
use async_trait::async_trait;
use psiagram_core::models::Label;
use psiagram_detection::{DetectionError, DetectionRequest, DetectionResult, LabelDetector};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockLabelDetector {
    labels: Arc<Mutex<Vec<Label>>>,
    failure: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<DetectionRequest>>>,
    source: Option<MockStorage>,
}

impl MockLabelDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(labels: Vec<Label>) -> Self {
        let detector = Self::new();
        detector.set_labels(labels);
        detector
    }

    /// A detector whose every call fails with a transport error
    pub fn failing(message: &str) -> Self {
        let detector = Self::new();
        detector.fail(message);
        detector
    }

    /// Make every following call fail with a transport error
    pub fn fail(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Read images from `storage`: a key with no object fails like Rekognition does
    /// when it cannot fetch the S3 object.
    pub fn reading_from(mut self, storage: &MockStorage) -> Self {
        self.source = Some(storage.clone());
        self
    }

    pub fn set_labels(&self, labels: Vec<Label>) {
        *self.labels.lock().unwrap() = labels;
    }

    pub fn requests(&self) -> Vec<DetectionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LabelDetector for MockLabelDetector {
    async fn detect_labels(&self, request: &DetectionRequest) -> DetectionResult<Vec<Label>> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(DetectionError::Transport(message));
        }
        if let Some(storage) = &self.source {
            if !storage.has_object(&request.key) {
                return Err(DetectionError::Service(format!(
                    "InvalidS3ObjectException: Unable to get object metadata from S3. \
                     Check object key, region and/or access permissions. ({}/{})",
                    request.bucket, request.key
                )));
            }
        }
        Ok(self.labels.lock().unwrap().clone())
    }
}
