//! In-memory blob store.
//!
//! [`InMemoryBlobStore`] keeps every object as [`Bytes`] in a [`DashMap`]
//! keyed by `(bucket, key)`. It never fails a `put`; a `get` for an absent
//! key returns [`StoreError::NotFound`].

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::{debug, trace};

use crate::BlobStore;
use crate::error::StoreError;

/// Composite key identifying a stored object: `(bucket, key)`.
type StorageKey = (String, String);

/// Thread-safe in-memory object storage.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    objects: DashMap<StorageKey, Bytes>,
}

impl InMemoryBlobStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: DashMap::new(),
        }
    }

    /// Number of stored objects across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether an object exists under `(bucket, key)`.
    #[must_use]
    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .contains_key(&(bucket.to_owned(), key.to_owned()))
    }

    /// Remove all objects.
    pub fn reset(&self) {
        self.objects.clear();
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, bucket: &str, key: &str, data: Bytes) -> Result<(), StoreError> {
        trace!(bucket, key, size = data.len(), "storing object in memory");
        self.objects
            .insert((bucket.to_owned(), key.to_owned()), data);
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        let entry = self
            .objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .map(|v| v.value().clone());

        entry.ok_or_else(|| {
            debug!(bucket, key, "object not found in memory store");
            StoreError::NotFound {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
            }
        })
    }
}
