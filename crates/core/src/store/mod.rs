//! Object-store client abstraction.
//!
//! The engine never owns a wire format; it consumes whatever the pipeline
//! wrote to object storage. This module defines the narrow contract the
//! engine needs — fetch by bucket+key, time-limited access links, and
//! prefix listing — behind a trait so tests run against [`MemoryStore`].

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Errors from object-store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The object does not exist.
    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Network or permission failure while fetching.
    #[error("Failed to fetch {key}: {reason}")]
    Fetch { key: String, reason: String },

    /// The object exists but is not valid JSON.
    #[error("Failed to decode {key} as JSON: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

/// Type alias for Result with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// One entry from a prefix listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub last_modified: DateTime<Utc>,
}

/// Minimal object-store contract consumed by the engine.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's bytes.
    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>>;

    /// Mint a time-limited access link for a user-initiated download.
    async fn get_signed_url(&self, bucket: &str, key: &str, ttl: Duration) -> StoreResult<String>;

    /// List objects under a prefix. No ordering guarantee; callers sort.
    async fn list_objects(&self, bucket: &str, prefix: &str) -> StoreResult<Vec<ObjectSummary>>;

    /// Fetch and decode an object as JSON.
    async fn get_json(&self, bucket: &str, key: &str) -> StoreResult<serde_json::Value> {
        let bytes = self.get_object(bucket, key).await?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
    }
}

/// The newest object under `prefix`, by `last_modified` descending.
///
/// Used to pick the most recent artifact in a user/category namespace when
/// a run log is not available to point at an exact key.
pub async fn latest_object(
    store: &dyn ObjectStore,
    bucket: &str,
    prefix: &str,
) -> StoreResult<Option<ObjectSummary>> {
    let mut objects = store.list_objects(bucket, prefix).await?;
    objects.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    Ok(objects.into_iter().next())
}
