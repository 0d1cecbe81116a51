//! Pipeline constants shared by the storage, detection and service crates.

/// Namespace holding uploads that have not been relocated yet.
pub const STAGING_PREFIX: &str = "uploads/";

/// Lifetime of a presigned upload URL.
pub const DEFAULT_UPLOAD_URL_EXPIRY_SECS: u64 = 3600;

/// Longest lifetime S3 accepts for a SigV4 presigned URL (7 days).
pub const MAX_UPLOAD_URL_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

/// Upper bound on labels requested from the detection service.
pub const DEFAULT_MAX_LABELS: i32 = 10;

/// Largest `MaxLabels` Rekognition DetectLabels accepts.
pub const MAX_DETECTION_LABELS: i32 = 1000;

/// Confidence floor (percent) applied by the detection service.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 70.0;

/// Label that must be present for an upload to be approved.
pub const DEFAULT_REQUIRED_LABEL: &str = "Dog";

pub const DEFAULT_REGION: &str = "eu-central-1";

pub const DEFAULT_PORT: u16 = 8000;

pub const DEFAULT_MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
