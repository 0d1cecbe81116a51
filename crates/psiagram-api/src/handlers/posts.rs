use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use psiagram_core::models::{CreatePostRequest, Post};
use std::sync::Arc;

/// Create a post from a staged image
///
/// The image is relocated to `posts/<year>/<month>/<day>/`. The post is returned
/// with status `approved`; storing it is left to the caller.
#[utoipa::path(
    post,
    path = "/api/v1/posts/",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Missing s3_key or relocation failed", body = ErrorResponse),
        (status = 500, description = "Bucket not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "create_post", author = %request.author))]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let post = state.posts.compose(request).await?;

    Ok((StatusCode::CREATED, Json(post)))
}
