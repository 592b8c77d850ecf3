//! Error types for the xmlvault core.

/// Core error type for xmlvault startup and configuration.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// A required environment variable is not set or is empty.
    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),

    /// The service mode string is not recognized.
    #[error("unknown service mode: {0} (expected `persist` or `validate`)")]
    UnknownMode(String),
}

/// Convenience result type for xmlvault core operations.
pub type VaultResult<T> = Result<T, VaultError>;
