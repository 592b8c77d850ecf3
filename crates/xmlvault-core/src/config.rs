//! Service configuration.
//!
//! Provides [`VaultConfig`]. Values are loaded from environment variables via
//! [`VaultConfig::from_env`]; every field except the TLS file paths has a
//! default suitable for a local MinIO deployment.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{VaultError, VaultResult};

/// Environment variable naming the TLS certificate chain.
pub const CERT_FILE_ENV: &str = "CERT_FILE";

/// Environment variable naming the TLS private key.
pub const KEY_FILE_ENV: &str = "KEY_FILE";

/// Which variant of the upload service to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    /// Store uploads in the object store and serve them back over HTTPS.
    #[default]
    Persist,
    /// Only check that uploads are well-formed XML, over plain HTTP.
    Validate,
}

impl ServiceMode {
    /// The mode name as accepted by `VAULT_MODE`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Persist => "persist",
            Self::Validate => "validate",
        }
    }
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceMode {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "persist" => Ok(Self::Persist),
            "validate" => Ok(Self::Validate),
            _ => Err(VaultError::UnknownMode(s.to_owned())),
        }
    }
}

/// xmlvault service configuration.
///
/// # Examples
///
/// ```
/// use xmlvault_core::{ServiceMode, VaultConfig};
///
/// let config = VaultConfig::default();
/// assert_eq!(config.gateway_listen, "0.0.0.0:8000");
/// assert_eq!(config.mode, ServiceMode::Persist);
/// assert_eq!(config.bucket, "bucket1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct VaultConfig {
    /// Bind address (e.g. `"0.0.0.0:8000"`).
    #[builder(default = String::from("0.0.0.0:8000"))]
    pub gateway_listen: String,

    /// Service variant.
    #[builder(default)]
    pub mode: ServiceMode,

    /// Bucket holding every uploaded object. Must already exist.
    #[builder(default = String::from("bucket1"))]
    pub bucket: String,

    /// Object storage endpoint URL.
    #[builder(default = String::from("http://localhost:9000"))]
    pub storage_endpoint: String,

    /// Static access key for the object store.
    #[builder(default = String::from("minioadmin"))]
    pub storage_access_key: String,

    /// Static secret key for the object store.
    #[serde(skip_serializing, default)]
    #[builder(default = String::from("minioadmin"))]
    pub storage_secret_key: String,

    /// Signing region for the object store.
    #[builder(default = String::from("us-east-1"))]
    pub storage_region: String,

    /// PEM certificate chain for HTTPS.
    #[builder(default)]
    pub cert_file: Option<PathBuf>,

    /// PEM private key for HTTPS.
    #[builder(default)]
    pub key_file: Option<PathBuf>,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            gateway_listen: String::from("0.0.0.0:8000"),
            mode: ServiceMode::Persist,
            bucket: String::from("bucket1"),
            storage_endpoint: String::from("http://localhost:9000"),
            storage_access_key: String::from("minioadmin"),
            storage_secret_key: String::from("minioadmin"),
            storage_region: String::from("us-east-1"),
            cert_file: None,
            key_file: None,
            log_level: String::from("info"),
        }
    }
}

impl VaultConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:8000` |
    /// | `VAULT_MODE` | `persist` |
    /// | `VAULT_BUCKET` | `bucket1` |
    /// | `STORAGE_ENDPOINT` | `http://localhost:9000` |
    /// | `STORAGE_ACCESS_KEY` | `minioadmin` |
    /// | `STORAGE_SECRET_KEY` | `minioadmin` |
    /// | `STORAGE_REGION` | `us-east-1` |
    /// | `CERT_FILE` | *(unset)* |
    /// | `KEY_FILE` | *(unset)* |
    /// | `LOG_LEVEL` | `info` |
    pub fn from_env() -> VaultResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> VaultResult<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(v) = var("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Some(v) = var("VAULT_MODE") {
            config.mode = v.parse()?;
        }
        if let Some(v) = var("VAULT_BUCKET") {
            config.bucket = v;
        }
        if let Some(v) = var("STORAGE_ENDPOINT") {
            config.storage_endpoint = v;
        }
        if let Some(v) = var("STORAGE_ACCESS_KEY") {
            config.storage_access_key = v;
        }
        if let Some(v) = var("STORAGE_SECRET_KEY") {
            config.storage_secret_key = v;
        }
        if let Some(v) = var("STORAGE_REGION") {
            config.storage_region = v;
        }
        config.cert_file = var(CERT_FILE_ENV).map(PathBuf::from);
        config.key_file = var(KEY_FILE_ENV).map(PathBuf::from);
        if let Some(v) = var("LOG_LEVEL") {
            config.log_level = v;
        }

        Ok(config)
    }

    /// The certificate and key paths required for HTTPS.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::MissingEnv`] naming the first missing variable.
    pub fn tls_files(&self) -> VaultResult<(PathBuf, PathBuf)> {
        let cert = self
            .cert_file
            .clone()
            .ok_or(VaultError::MissingEnv(CERT_FILE_ENV))?;
        let key = self
            .key_file
            .clone()
            .ok_or(VaultError::MissingEnv(KEY_FILE_ENV))?;
        Ok((cert, key))
    }
}
