//! Staging and adjudication endpoints

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use psiagram_core::models::{
    Adjudication, InitiateUploadRequest, InitiateUploadResponse, UploadCompleteRequest,
    UploadCompleteResponse,
};
use std::sync::Arc;

/// Generate a presigned URL for uploading an image into the staging area
#[utoipa::path(
    post,
    path = "/api/v1/rekognition/initiate-upload/",
    tag = "uploads",
    request_body = InitiateUploadRequest,
    responses(
        (status = 200, description = "Presigned URL generated", body = InitiateUploadResponse),
        (status = 400, description = "Missing filename or content type", body = ErrorResponse),
        (status = 500, description = "Bucket not configured or URL generation failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "initiate_upload"))]
pub async fn initiate_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<InitiateUploadRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let ticket = state
        .staging
        .initiate(request.filename.as_deref(), request.content_type.as_deref())
        .await?;

    Ok(Json(InitiateUploadResponse::from(ticket)))
}

/// Run label detection on a staged upload and accept or reject it
///
/// Approved uploads answer 200; rejected uploads answer 400 with the same body
/// shape and have already been removed from the staging area.
#[utoipa::path(
    post,
    path = "/api/v1/rekognition/upload-complete/",
    tag = "uploads",
    request_body = UploadCompleteRequest,
    responses(
        (status = 200, description = "Upload approved", body = UploadCompleteResponse),
        (status = 400, description = "Upload rejected, or file_key missing", body = UploadCompleteResponse),
        (status = 500, description = "Detection service or storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "upload_complete"))]
pub async fn upload_complete(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<UploadCompleteRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let adjudication = state
        .adjudication
        .adjudicate(request.file_key.as_deref())
        .await?;

    let status = if adjudication.is_approved() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    let body = verdict_response(adjudication, state.adjudication.required_label());

    Ok((status, Json(body)))
}

fn verdict_response(adjudication: Adjudication, required_label: &str) -> UploadCompleteResponse {
    let subject = required_label.to_lowercase();
    let message = if adjudication.is_approved() {
        format!("Cute {}! Photo accepted.", subject)
    } else {
        format!("No {} detected :( Photo rejected.", subject)
    };

    UploadCompleteResponse {
        status: adjudication.status,
        message,
        labels: adjudication.labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psiagram_core::models::{Label, ModerationStatus};

    #[test]
    fn test_verdict_messages() {
        let approved = verdict_response(
            Adjudication {
                status: ModerationStatus::Approved,
                labels: vec![Label::new("Dog", 92.1)],
            },
            "Dog",
        );
        assert_eq!(approved.message, "Cute dog! Photo accepted.");
        assert_eq!(approved.labels.len(), 1);

        let rejected = verdict_response(
            Adjudication {
                status: ModerationStatus::Rejected,
                labels: vec![],
            },
            "Dog",
        );
        assert_eq!(rejected.message, "No dog detected :( Photo rejected.");
        assert_eq!(rejected.status, ModerationStatus::Rejected);
    }
}
