use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Kind of entity a staged upload is promoted for; decides the permanent namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Post images, partitioned by day: `posts/<year>/<month>/<day>/`
    Post,
    /// Profile avatars: `avatars/`
    Avatar,
    /// Group pictures: `group_pictures/`
    GroupPicture,
    /// Pet profile pictures: `pet_profiles/`
    PetProfile,
}

impl AssetKind {
    /// Destination namespace (with trailing slash) for an object relocated on `date`.
    pub fn destination_prefix(&self, date: NaiveDate) -> String {
        match self {
            AssetKind::Post => format!("posts/{}/", date.format("%Y/%m/%d")),
            AssetKind::Avatar => "avatars/".to_string(),
            AssetKind::GroupPicture => "group_pictures/".to_string(),
            AssetKind::PetProfile => "pet_profiles/".to_string(),
        }
    }
}

impl Display for AssetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AssetKind::Post => write!(f, "post"),
            AssetKind::Avatar => write!(f, "avatar"),
            AssetKind::GroupPicture => write!(f, "group_picture"),
            AssetKind::PetProfile => write!(f, "pet_profile"),
        }
    }
}
