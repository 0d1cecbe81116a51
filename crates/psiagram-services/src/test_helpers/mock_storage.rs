//! In-memory Storage double that records every call in order

use async_trait::async_trait;
use psiagram_storage::{Storage, StorageError, StorageResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const MOCK_BUCKET: &str = "psiagram-test";

/// A call received by [`MockStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    Presign {
        key: String,
        content_type: String,
        expires_in_secs: u64,
    },
    Copy {
        from: String,
        to: String,
    },
    Delete {
        key: String,
    },
}

#[derive(Default)]
struct Failures {
    presign: Option<String>,
    copy: Option<String>,
    delete: Option<String>,
}

/// Mock storage keeping object keys in memory.
///
/// Objects must be added with [`MockStorage::put_object`] before they can be copied.
/// Each operation can be primed to fail with a message.
#[derive(Clone, Default)]
pub struct MockStorage {
    objects: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<StorageCall>>>,
    failures: Arc<Mutex<Failures>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a client upload through a presigned URL
    pub fn put_object(&self, key: &str) {
        self.objects.lock().unwrap().insert(key.to_string());
    }

    pub fn has_object(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains(key)
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<StorageCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StorageCall::Delete { key } => Some(key),
                _ => None,
            })
            .collect()
    }

    pub fn fail_presign(&self, message: &str) {
        self.failures.lock().unwrap().presign = Some(message.to_string());
    }

    pub fn fail_copy(&self, message: &str) {
        self.failures.lock().unwrap().copy = Some(message.to_string());
    }

    pub fn fail_delete(&self, message: &str) {
        self.failures.lock().unwrap().delete = Some(message.to_string());
    }

    fn record(&self, call: StorageCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Storage for MockStorage {
    fn bucket(&self) -> &str {
        MOCK_BUCKET
    }

    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.record(StorageCall::Presign {
            key: storage_key.to_string(),
            content_type: content_type.to_string(),
            expires_in_secs: expires_in.as_secs(),
        });
        if let Some(message) = self.failures.lock().unwrap().presign.clone() {
            return Err(StorageError::PresignFailed(message));
        }
        Ok(format!(
            "https://{}.s3.eu-central-1.amazonaws.com/{}?X-Amz-Expires={}",
            MOCK_BUCKET,
            storage_key,
            expires_in.as_secs()
        ))
    }

    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<String> {
        self.record(StorageCall::Copy {
            from: from_key.to_string(),
            to: to_key.to_string(),
        });
        if let Some(message) = self.failures.lock().unwrap().copy.clone() {
            return Err(StorageError::CopyFailed(message));
        }

        let mut objects = self.objects.lock().unwrap();
        if !objects.contains(from_key) {
            return Err(StorageError::NotFound(from_key.to_string()));
        }
        objects.insert(to_key.to_string());
        Ok(self.public_url(to_key))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.record(StorageCall::Delete {
            key: storage_key.to_string(),
        });
        if let Some(message) = self.failures.lock().unwrap().delete.clone() {
            return Err(StorageError::DeleteFailed(message));
        }
        // S3 deletes of missing keys succeed
        self.objects.lock().unwrap().remove(storage_key);
        Ok(())
    }

    fn public_url(&self, storage_key: &str) -> String {
        psiagram_storage::s3::object_url(MOCK_BUCKET, "eu-central-1", None, storage_key)
    }
}
