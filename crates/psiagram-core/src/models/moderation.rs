use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// A classification tag returned by the detection service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Label {
    /// Label name, e.g. "Dog"
    pub name: String,
    /// Confidence percentage (0-100)
    pub confidence: f32,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Moderation state of an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    #[default]
    Approved,
    Rejected,
}

impl Display for ModerationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ModerationStatus::Pending => write!(f, "pending"),
            ModerationStatus::Approved => write!(f, "approved"),
            ModerationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Outcome of running a staged upload through label detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjudication {
    pub status: ModerationStatus,
    /// Labels in the order the detection service returned them
    pub labels: Vec<Label>,
}

impl Adjudication {
    pub fn is_approved(&self) -> bool {
        self.status == ModerationStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(ModerationStatus::Rejected).unwrap();
        assert_eq!(json, serde_json::json!("rejected"));
        assert_eq!(ModerationStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn test_default_status_is_approved() {
        assert_eq!(ModerationStatus::default(), ModerationStatus::Approved);
    }
}
