//! Blob store abstraction for xmlvault.
//!
//! The HTTP layer only needs two operations from object storage: store a byte
//! sequence under `(bucket, key)` and fetch it back. [`BlobStore`] captures
//! exactly that. Two backends are provided:
//!
//! - [`S3BlobStore`]: any S3-compatible service (MinIO, AWS) through `aws-sdk-s3`.
//! - [`InMemoryBlobStore`]: a concurrent map, for tests and local development.
//!
//! Buckets are never created or managed here; they are assumed to exist.

mod error;
mod memory;
mod s3;

use async_trait::async_trait;
use bytes::Bytes;

pub use error::StoreError;
pub use memory::InMemoryBlobStore;
pub use s3::{S3BlobStore, S3StoreConfig};

/// An opaque key-value store of byte sequences addressed by `(bucket, key)`.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Store `data` under `key` in `bucket`, replacing any previous object.
    async fn put(&self, bucket: &str, key: &str, data: Bytes) -> Result<(), StoreError>;

    /// Fetch the full contents of the object stored under `key` in `bucket`.
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError>;
}

#[async_trait]
impl<T: BlobStore + ?Sized> BlobStore for std::sync::Arc<T> {
    async fn put(&self, bucket: &str, key: &str, data: Bytes) -> Result<(), StoreError> {
        (**self).put(bucket, key, data).await
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        (**self).get(bucket, key).await
    }
}
