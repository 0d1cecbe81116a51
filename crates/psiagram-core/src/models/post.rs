use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Adjudication, Label, ModerationStatus};

/// Request to create a post from a previously staged upload.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    /// Author of the post
    pub author: Uuid,
    /// Staging key returned by the initiate-upload endpoint
    #[serde(default)]
    pub s3_key: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    /// Group the post is published in
    #[serde(default)]
    pub group: Option<Uuid>,
    #[serde(default)]
    pub tagged_pets: Vec<Uuid>,
}

/// A user post. `image` holds the permanent content-store key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: Uuid,
    pub author: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Uuid>,
    pub image: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub tagged_pets: Vec<Uuid>,
    pub verification_status: ModerationStatus,
    /// Raw labels from the detection service, when the image was adjudicated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rekognition_labels: Option<Vec<Label>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// New post for an already relocated image, approved by default.
    pub fn new(
        author: Uuid,
        image: String,
        image_url: String,
        caption: Option<String>,
        group: Option<Uuid>,
        tagged_pets: Vec<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author,
            group,
            image,
            image_url,
            caption,
            tagged_pets,
            verification_status: ModerationStatus::default(),
            rekognition_labels: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record an adjudication outcome on the post.
    pub fn apply_adjudication(&mut self, adjudication: &Adjudication) {
        self.verification_status = adjudication.status;
        self.rekognition_labels = Some(adjudication.labels.clone());
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post::new(
            Uuid::new_v4(),
            "posts/2024/06/01/abc_dog.jpg".to_string(),
            "https://bucket.s3.eu-central-1.amazonaws.com/posts/2024/06/01/abc_dog.jpg".to_string(),
            Some("Walk in the park".to_string()),
            None,
            vec![],
        )
    }

    #[test]
    fn test_new_post_is_approved_without_labels() {
        let post = sample_post();
        assert_eq!(post.verification_status, ModerationStatus::Approved);
        assert!(post.rekognition_labels.is_none());

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["verification_status"], "approved");
        assert!(json.get("rekognition_labels").is_none());
        assert!(json.get("group").is_none());
    }

    #[test]
    fn test_apply_adjudication_records_status_and_labels() {
        let mut post = sample_post();
        let adjudication = Adjudication {
            status: ModerationStatus::Rejected,
            labels: vec![Label::new("Cat", 88.0)],
        };

        post.apply_adjudication(&adjudication);

        assert_eq!(post.verification_status, ModerationStatus::Rejected);
        assert_eq!(
            post.rekognition_labels.as_deref(),
            Some(&[Label::new("Cat", 88.0)][..])
        );
        assert!(post.updated_at >= post.created_at);
    }
}
