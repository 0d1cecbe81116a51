use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AssetKind, Label, ModerationStatus};

/// Request to stage a new upload.
///
/// Fields are optional at the wire level so that a missing value is reported
/// as an invalid request rather than a deserialization failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct InitiateUploadRequest {
    /// Original filename, kept as the suffix of the staging key
    #[serde(default)]
    pub filename: Option<String>,
    /// MIME type the client will upload with
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Presigned write URL and the staging key it targets.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InitiateUploadResponse {
    pub upload_url: String,
    pub file_key: String,
}

/// Request to adjudicate a staged upload.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UploadCompleteRequest {
    #[serde(default)]
    pub file_key: Option<String>,
}

/// Adjudication result returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadCompleteResponse {
    pub status: ModerationStatus,
    pub message: String,
    pub labels: Vec<Label>,
}

/// Request to promote a staged upload to its permanent location.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RelocateRequest {
    #[serde(default)]
    pub file_key: Option<String>,
    pub kind: AssetKind,
}

/// Permanent key and public URL of a relocated upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RelocateResponse {
    pub key: String,
    pub url: String,
}
