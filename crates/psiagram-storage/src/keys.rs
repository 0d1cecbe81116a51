//! Shared key generation for the staging and permanent namespaces.

use psiagram_core::constants::STAGING_PREFIX;
use uuid::Uuid;

use crate::traits::{StorageError, StorageResult};

/// Generate a unique staging key: `uploads/{uuid}_{filename}`.
///
/// The random identifier keeps two uploads of the same filename apart, so no
/// coordination between concurrent requests is needed.
pub fn generate_staging_key(filename: &str) -> String {
    format!("{}{}_{}", STAGING_PREFIX, Uuid::new_v4(), filename)
}

/// Whether `key` lives in the staging namespace (and names an object, not the prefix itself).
pub fn is_staging_key(key: &str) -> bool {
    key.strip_prefix(STAGING_PREFIX)
        .is_some_and(|rest| !rest.is_empty())
}

/// Last path segment of a key.
pub fn base_filename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Permanent key for a staged object: the staging prefix is replaced by `destination_prefix`
/// and only the base filename is retained.
pub fn destination_key(destination_prefix: &str, staging_key: &str) -> String {
    format!(
        "{}/{}",
        destination_prefix.trim_end_matches('/'),
        base_filename(staging_key)
    )
}

/// Reject keys that could escape the bucket layout.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key is empty".to_string()));
    }
    if key.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "key must not start with '/': {}",
            key
        )));
    }
    if key.split('/').any(|segment| segment == "..") {
        return Err(StorageError::InvalidKey(format!(
            "key must not contain '..': {}",
            key
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_key_layout() {
        let key = generate_staging_key("cute.png");
        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with("_cute.png"));

        let id = key
            .strip_prefix("uploads/")
            .and_then(|rest| rest.strip_suffix("_cute.png"))
            .unwrap();
        assert!(Uuid::parse_str(id).is_ok(), "expected uuid, got {}", id);
    }

    #[test]
    fn test_staging_keys_are_unique() {
        assert_ne!(
            generate_staging_key("dog.jpg"),
            generate_staging_key("dog.jpg")
        );
    }

    #[test]
    fn test_is_staging_key() {
        assert!(is_staging_key("uploads/abc_dog.jpg"));
        assert!(!is_staging_key("uploads/"));
        assert!(!is_staging_key("posts/2024/06/01/abc_dog.jpg"));
        assert!(!is_staging_key("uploadsabc.jpg"));
    }

    #[test]
    fn test_destination_key_keeps_base_filename() {
        assert_eq!(
            destination_key("posts/2024/06/01/", "uploads/abc_dog.jpg"),
            "posts/2024/06/01/abc_dog.jpg"
        );
        assert_eq!(
            destination_key("avatars", "uploads/nested/abc_dog.jpg"),
            "avatars/abc_dog.jpg"
        );
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("uploads/abc_dog.jpg").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/uploads/abc.jpg").is_err());
        assert!(validate_key("uploads/../secrets").is_err());
    }
}
