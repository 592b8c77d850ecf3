//! TLS termination.
//!
//! Loads a PEM certificate chain and private key into a rustls
//! [`ServerConfig`] backed by the ring crypto provider. The provider is
//! passed explicitly, so no process-wide default needs to be installed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustls::ServerConfig;
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::TlsAcceptor;

/// ALPN protocols offered to clients, most preferred first.
const ALPN_PROTOCOLS: [&[u8]; 2] = [b"h2", b"http/1.1"];

/// Failure to build the TLS configuration.
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    /// The certificate file could not be read or parsed.
    #[error("failed to load certificate from {path}: {source}")]
    Certificate {
        /// Path of the certificate file.
        path: PathBuf,
        /// Underlying PEM error.
        source: rustls::pki_types::pem::Error,
    },

    /// The certificate file contained no certificates.
    #[error("no certificates found in {0}")]
    EmptyCertificateChain(PathBuf),

    /// The private key file could not be read or parsed.
    #[error("failed to load private key from {path}: {source}")]
    PrivateKey {
        /// Path of the key file.
        path: PathBuf,
        /// Underlying PEM error.
        source: rustls::pki_types::pem::Error,
    },

    /// rustls rejected the certificate/key pair.
    #[error("invalid TLS configuration: {0}")]
    Config(#[from] rustls::Error),
}

/// Build a [`TlsAcceptor`] from PEM files.
///
/// # Errors
///
/// Returns [`TlsError`] if either file is unreadable, the chain is empty,
/// or the key does not match the certificate.
pub fn load_tls_acceptor(cert_file: &Path, key_file: &Path) -> Result<TlsAcceptor, TlsError> {
    let config = load_server_config(cert_file, key_file)?;
    Ok(TlsAcceptor::from(Arc::new(config)))
}

/// Build the rustls [`ServerConfig`] from PEM files.
///
/// # Errors
///
/// See [`load_tls_acceptor`].
pub fn load_server_config(cert_file: &Path, key_file: &Path) -> Result<ServerConfig, TlsError> {
    let certs = load_certs(cert_file)?;
    let key = PrivateKeyDer::from_pem_file(key_file).map_err(|source| TlsError::PrivateKey {
        path: key_file.to_path_buf(),
        source,
    })?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    config.alpn_protocols = ALPN_PROTOCOLS.iter().map(|p| p.to_vec()).collect();

    Ok(config)
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let to_err = |source| TlsError::Certificate {
        path: path.to_path_buf(),
        source,
    };

    let certs = CertificateDer::pem_file_iter(path)
        .map_err(to_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_err)?;

    if certs.is_empty() {
        return Err(TlsError::EmptyCertificateChain(path.to_path_buf()));
    }
    Ok(certs)
}
