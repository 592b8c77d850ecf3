//! Core types, configuration, and key generation for xmlvault.
//!
//! This crate provides the building blocks shared by the HTTP layer and the
//! server binary: environment-driven configuration, the startup error type,
//! and the process-local object key generator.

pub mod config;
mod error;
mod keys;

pub use config::{ServiceMode, VaultConfig};
pub use error::{VaultError, VaultResult};
pub use keys::{KEY_PREFIX, ObjectKey, ObjectKeyGenerator};
