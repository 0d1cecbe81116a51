//! Psiagram Detection Library
//!
//! Label detection for staged uploads. The [`LabelDetector`] trait is what the
//! adjudication step depends on; [`RekognitionDetector`] is the AWS implementation.

pub mod rekognition;
pub mod traits;

pub use rekognition::RekognitionDetector;
pub use traits::{DetectionError, DetectionRequest, DetectionResult, LabelDetector};
