use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use psiagram_core::models::{RelocateRequest, RelocateResponse};
use psiagram_services::validation::require_field;
use std::sync::Arc;

/// Move a staged upload to the permanent namespace for its kind
#[utoipa::path(
    post,
    path = "/api/v1/uploads/relocate/",
    tag = "uploads",
    request_body = RelocateRequest,
    responses(
        (status = 200, description = "Upload relocated", body = RelocateResponse),
        (status = 400, description = "Invalid key, or copy/delete failed", body = ErrorResponse),
        (status = 500, description = "Bucket not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "relocate_upload", kind = %request.kind))]
pub async fn relocate_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RelocateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let file_key = require_field(request.file_key.as_deref(), "file_key")?;

    let asset = state.relocation.relocate(file_key, request.kind).await?;

    Ok(Json(RelocateResponse {
        key: asset.key,
        url: asset.url,
    }))
}
