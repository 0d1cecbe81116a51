//! Psiagram Core Library
//!
//! This crate provides the configuration, error types, constants and domain models
//! shared by the upload pipeline crates and the HTTP API.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
