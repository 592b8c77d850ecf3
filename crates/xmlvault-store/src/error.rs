//! Blob store error types.

/// Errors returned by a [`BlobStore`](crate::BlobStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No object exists under the requested key.
    #[error("no such object: {bucket}/{key}")]
    NotFound {
        /// The bucket that was searched.
        bucket: String,
        /// The key that was not found.
        key: String,
    },

    /// The object exists but its body could not be read to the end.
    #[error("failed to read object body for {key}: {message}")]
    BodyRead {
        /// The key being read.
        key: String,
        /// Description of the failure.
        message: String,
    },

    /// Any other backend failure: access denied, network, service errors.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The backend could not be constructed from its configuration.
    #[error("invalid storage configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Whether this error means the object does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
