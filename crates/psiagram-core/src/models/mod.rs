//! Data models for the upload pipeline
//!
//! Request/response bodies for the HTTP surface plus the domain types that
//! flow between the staging, adjudication and relocation steps.

mod asset;
mod moderation;
mod post;
mod upload;

pub use asset::AssetKind;
pub use moderation::{Adjudication, Label, ModerationStatus};
pub use post::{CreatePostRequest, Post};
pub use upload::{
    InitiateUploadRequest, InitiateUploadResponse, RelocateRequest, RelocateResponse,
    UploadCompleteRequest, UploadCompleteResponse,
};
