//! Test helpers for pipeline unit and integration tests
//!
//! Recording doubles for the content store and the label detection service, so
//! the pipeline can be exercised without network access.

pub mod mock_detector;
pub mod mock_storage;

pub use mock_detector::MockLabelDetector;
pub use mock_storage::{MockStorage, StorageCall};
