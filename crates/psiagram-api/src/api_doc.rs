//! OpenAPI documentation, served at `/api/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use psiagram_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Psiagram API",
        version = "0.1.0",
        description = "Upload moderation pipeline for a pet social network: stage images behind presigned URLs, adjudicate them with label detection, and relocate them into their permanent namespace. All endpoints are versioned under /api/v1/."
    ),
    paths(
        handlers::uploads::initiate_upload,
        handlers::uploads::upload_complete,
        handlers::relocation::relocate_upload,
        handlers::posts::create_post,
    ),
    components(schemas(
        models::InitiateUploadRequest,
        models::InitiateUploadResponse,
        models::UploadCompleteRequest,
        models::UploadCompleteResponse,
        models::RelocateRequest,
        models::RelocateResponse,
        models::CreatePostRequest,
        models::Post,
        models::Label,
        models::ModerationStatus,
        models::AssetKind,
        error::ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Staging, adjudication and relocation of uploaded images"),
        (name = "posts", description = "Posts built from staged images"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_pipeline_paths() {
        let spec = ApiDoc::openapi();
        for path in [
            "/api/v1/rekognition/initiate-upload/",
            "/api/v1/rekognition/upload-complete/",
            "/api/v1/uploads/relocate/",
            "/api/v1/posts/",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
