use crate::api_doc::ApiDoc;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;

#[derive(Serialize)]
pub struct HealthCheckResponse {
    pub status: &'static str,
    pub storage: &'static str,
}

/// Liveness probe. Reports whether a bucket is configured without calling the store.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let storage = if state.storage_configured {
        "configured"
    } else {
        "not_configured"
    };
    (
        StatusCode::OK,
        Json(HealthCheckResponse {
            status: "healthy",
            storage,
        }),
    )
}

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
