//! In-memory object store used in tests.

use crate::store::{ObjectStore, ObjectSummary, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory [`ObjectStore`] with failure injection.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), (Vec<u8>, DateTime<Utc>)>>,
    failing_keys: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes with the current timestamp.
    pub fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
        self.put_at(bucket, key, bytes, Utc::now());
    }

    /// Store raw bytes with an explicit `last_modified` timestamp.
    pub fn put_at(&self, bucket: &str, key: &str, bytes: Vec<u8>, last_modified: DateTime<Utc>) {
        self.objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert((bucket.to_string(), key.to_string()), (bytes, last_modified));
    }

    /// Store a JSON payload.
    pub fn put_json(&self, bucket: &str, key: &str, value: &serde_json::Value) {
        self.put(bucket, key, value.to_string().into_bytes());
    }

    /// Make every fetch of `key` fail with a network-style error.
    pub fn fail_on(&self, key: &str) {
        self.failing_keys
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string());
    }

    fn is_failing(&self, key: &str) -> bool {
        self.failing_keys
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(key)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        if self.is_failing(key) {
            return Err(StoreError::Fetch {
                key: key.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&(bucket.to_string(), key.to_string()))
            .map(|(bytes, _)| bytes.clone())
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn get_signed_url(&self, bucket: &str, key: &str, ttl: Duration) -> StoreResult<String> {
        if self.is_failing(key) {
            return Err(StoreError::Fetch {
                key: key.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        Ok(format!(
            "https://{bucket}.example.com/{key}?expires={}",
            ttl.as_secs()
        ))
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> StoreResult<Vec<ObjectSummary>> {
        Ok(self
            .objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|((b, k), _)| b == bucket && k.starts_with(prefix))
            .map(|((_, k), (_, last_modified))| ObjectSummary {
                key: k.clone(),
                last_modified: *last_modified,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        store.put("bucket", "a/b.json", b"{}".to_vec());

        let bytes = store.get_object("bucket", "a/b.json").await.unwrap();
        assert_eq!(bytes, b"{}");
    }

    #[tokio::test]
    async fn test_memory_store_not_found() {
        let store = MemoryStore::new();
        let err = store.get_object("bucket", "missing").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_memory_store_failure_injection() {
        let store = MemoryStore::new();
        store.put("bucket", "flaky.json", b"{}".to_vec());
        store.fail_on("flaky.json");

        let err = store.get_object("bucket", "flaky.json").await.unwrap_err();
        assert!(matches!(err, StoreError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_signed_url_embeds_ttl() {
        let store = MemoryStore::new();
        let url = store
            .get_signed_url("bucket", "a/b.docx", Duration::from_secs(900))
            .await
            .unwrap();
        assert!(url.contains("a/b.docx"));
        assert!(url.contains("expires=900"));
    }
}
