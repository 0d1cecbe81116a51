//! Test helpers: build AppState and router around in-memory doubles.
//!
//! Run from workspace root: `cargo test -p psiagram-api`.

#![allow(dead_code)]

use axum_test::TestServer;
use psiagram_api::constants;
use psiagram_api::setup::routes;
use psiagram_api::state::AppState;
use psiagram_core::config::PipelineConfig;
use psiagram_core::models::Label;
use psiagram_core::Config;
use psiagram_detection::LabelDetector;
use psiagram_services::test_helpers::{MockLabelDetector, MockStorage};
use psiagram_storage::Storage;
use std::sync::Arc;

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus handles on the doubles behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MockStorage>,
    pub detector: Arc<MockLabelDetector>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Stage an upload through the API and simulate the client PUT.
    pub async fn stage(&self, filename: &str, content_type: &str) -> String {
        let response = self
            .server
            .post(&api_path("/rekognition/initiate-upload/"))
            .json(&serde_json::json!({ "filename": filename, "content_type": content_type }))
            .await;
        assert_eq!(response.status_code(), 200);

        let body: serde_json::Value = response.json();
        let file_key = body["file_key"]
            .as_str()
            .expect("file_key in response")
            .to_string();
        self.storage.put_object(&file_key);
        file_key
    }
}

fn build_app(storage: Option<Arc<MockStorage>>, labels: Vec<Label>) -> TestApp {
    let config = Config::new(PipelineConfig::default());
    let mock_storage = storage.clone().unwrap_or_default();
    let detector = Arc::new(MockLabelDetector::with_labels(labels).reading_from(&mock_storage));

    let state = Arc::new(AppState::new(
        config.clone(),
        storage.map(|s| s as Arc<dyn Storage>),
        detector.clone() as Arc<dyn LabelDetector>,
    ));
    let app = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage: mock_storage,
        detector,
    }
}

/// Setup test app with a configured bucket and the given detection result.
pub fn setup_test_app(labels: Vec<Label>) -> TestApp {
    build_app(Some(Arc::new(MockStorage::new())), labels)
}

/// Setup test app as if no bucket were configured.
pub fn setup_unconfigured_app() -> TestApp {
    build_app(None, vec![])
}
