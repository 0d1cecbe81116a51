//! Post composition from a staged upload.

use chrono::{NaiveDate, Utc};
use psiagram_core::models::{AssetKind, CreatePostRequest, Post};
use psiagram_core::AppError;

use crate::relocation::RelocationService;
use crate::validation::require_field;

/// Builds posts whose image is promoted out of the staging area.
///
/// Posts start out `approved`: adjudication is a separate step and is not
/// required before a staged image is published.
#[derive(Clone)]
pub struct PostComposer {
    relocation: RelocationService,
}

impl PostComposer {
    pub fn new(relocation: RelocationService) -> Self {
        Self { relocation }
    }

    pub async fn compose(&self, request: CreatePostRequest) -> Result<Post, AppError> {
        self.compose_on(request, Utc::now().date_naive()).await
    }

    #[tracing::instrument(skip(self, request), fields(operation = "compose_post", author = %request.author))]
    pub async fn compose_on(
        &self,
        request: CreatePostRequest,
        date: NaiveDate,
    ) -> Result<Post, AppError> {
        let staging_key = require_field(request.s3_key.as_deref(), "s3_key")?;

        let asset = self
            .relocation
            .relocate_on(staging_key, AssetKind::Post, date)
            .await?;

        let caption = request.caption.filter(|c| !c.trim().is_empty());
        let post = Post::new(
            request.author,
            asset.key,
            asset.url,
            caption,
            request.group,
            request.tagged_pets,
        );

        tracing::info!(post_id = %post.id, image = %post.image, "Post composed");
        Ok(post)
    }
}
