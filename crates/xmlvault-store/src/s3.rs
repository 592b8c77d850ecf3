//! S3-compatible blob store backed by `aws-sdk-s3`.
//!
//! Targets MinIO-style deployments: static credentials, an explicit endpoint,
//! and path-style addressing so bucket names never need DNS entries.

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::BlobStore;
use crate::error::StoreError;

/// Connection settings for [`S3BlobStore`].
#[derive(Clone)]
pub struct S3StoreConfig {
    /// Endpoint URL, e.g. `http://localhost:9000`.
    pub endpoint: String,
    /// Static access key.
    pub access_key: String,
    /// Static secret key.
    pub secret_key: String,
    /// Signing region.
    pub region: String,
}

impl std::fmt::Debug for S3StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"...")
            .field("region", &self.region)
            .finish()
    }
}

/// Blob store talking to an S3-compatible service.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
}

impl S3BlobStore {
    /// Build a client for the given endpoint.
    ///
    /// No request is sent; an unreachable endpoint only surfaces on the first
    /// `put` or `get`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if the endpoint is not an
    /// absolute `http`/`https` URL or the credentials are empty.
    pub fn new(config: &S3StoreConfig) -> Result<Self, StoreError> {
        validate_endpoint(&config.endpoint)?;
        if config.access_key.is_empty() || config.secret_key.is_empty() {
            return Err(StoreError::InvalidConfig(
                "access key and secret key must not be empty".to_owned(),
            ));
        }

        let creds = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "xmlvault-static",
        );

        let sdk_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(creds)
            .endpoint_url(config.endpoint.clone())
            .force_path_style(true)
            .build();

        Ok(Self::from_client(aws_sdk_s3::Client::from_conf(sdk_config)))
    }

    /// Wrap an already configured SDK client.
    #[must_use]
    pub fn from_client(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, bucket: &str, key: &str, data: Bytes) -> Result<(), StoreError> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_length(i64::try_from(size).unwrap_or(i64::MAX))
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                warn!(bucket, key, error = %DisplayErrorContext(&e), "put_object failed");
                StoreError::Backend(DisplayErrorContext(&e).to_string())
            })?;

        debug!(bucket, key, size, "stored object");
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(GetObjectError::is_no_such_key) {
                    return StoreError::NotFound {
                        bucket: bucket.to_owned(),
                        key: key.to_owned(),
                    };
                }
                warn!(bucket, key, error = %DisplayErrorContext(&e), "get_object failed");
                StoreError::Backend(DisplayErrorContext(&e).to_string())
            })?;

        let data = output.body.collect().await.map_err(|e| StoreError::BodyRead {
            key: key.to_owned(),
            message: e.to_string(),
        })?;

        Ok(data.into_bytes())
    }
}

/// Check that an endpoint is an absolute `http` or `https` URL.
fn validate_endpoint(endpoint: &str) -> Result<(), StoreError> {
    let uri: http::Uri = endpoint
        .parse()
        .map_err(|e| StoreError::InvalidConfig(format!("invalid endpoint {endpoint}: {e}")))?;

    match (uri.scheme_str(), uri.authority()) {
        (Some("http" | "https"), Some(_)) => Ok(()),
        _ => Err(StoreError::InvalidConfig(format!(
            "endpoint must be an absolute http(s) URL: {endpoint}"
        ))),
    }
}
