//! xmlvault server - accepts XML documents over HTTP and stores them in S3.
//!
//! Two variants share one binary, selected by `VAULT_MODE`:
//!
//! - `persist` (default): HTTPS on `GATEWAY_LISTEN`; `/upload` stores the
//!   body in `VAULT_BUCKET` under a fresh `xmlobject/N` key and `/read`
//!   serves it back. `CERT_FILE` and `KEY_FILE` are required.
//! - `validate`: plain HTTP; `/upload` only checks that the body decodes as
//!   an XML payload.
//!
//! # Usage
//!
//! ```text
//! CERT_FILE=cert.pem KEY_FILE=key.pem xmlvault-server
//! VAULT_MODE=validate xmlvault-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:8000` | Bind address |
//! | `VAULT_MODE` | `persist` | `persist` or `validate` |
//! | `VAULT_BUCKET` | `bucket1` | Target bucket |
//! | `STORAGE_ENDPOINT` | `http://localhost:9000` | S3-compatible endpoint |
//! | `STORAGE_ACCESS_KEY` | `minioadmin` | Static access key |
//! | `STORAGE_SECRET_KEY` | `minioadmin` | Static secret key |
//! | `STORAGE_REGION` | `us-east-1` | Signing region |
//! | `CERT_FILE` | *(unset)* | PEM certificate chain (persist mode) |
//! | `KEY_FILE` | *(unset)* | PEM private key (persist mode) |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xmlvault_core::{ServiceMode, VaultConfig};
use xmlvault_http::{
    PersistingHandler, SHUTDOWN_GRACE, Transport, ValidatingHandler, VaultHandler,
    VaultHttpService, load_tls_acceptor, serve, shutdown_signal,
};
use xmlvault_store::{S3BlobStore, S3StoreConfig};

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the store connection settings from the application config.
fn store_config(config: &VaultConfig) -> S3StoreConfig {
    S3StoreConfig {
        endpoint: config.storage_endpoint.clone(),
        access_key: config.storage_access_key.clone(),
        secret_key: config.storage_secret_key.clone(),
        region: config.storage_region.clone(),
    }
}

/// Resolve the transport for a mode: TLS for persist, plain for validate.
fn build_transport(config: &VaultConfig) -> Result<Transport> {
    match config.mode {
        ServiceMode::Persist => {
            let (cert_file, key_file) = config.tls_files()?;
            let acceptor = load_tls_acceptor(&cert_file, &key_file).with_context(|| {
                format!(
                    "failed to load TLS material from {} and {}",
                    cert_file.display(),
                    key_file.display()
                )
            })?;
            Ok(Transport::Tls(acceptor))
        }
        ServiceMode::Validate => Ok(Transport::Plain),
    }
}

/// Bind and serve until a shutdown signal arrives.
async fn run<H: VaultHandler>(
    addr: SocketAddr,
    transport: Transport,
    handler: H,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, ?transport, "listening for connections");

    let signal = tokio::spawn(shutdown_signal());
    let shutdown = async move {
        // A failed join means the signal task was cancelled; shut down either way.
        let _ = signal.await;
    };

    serve(
        listener,
        transport,
        VaultHttpService::new(handler),
        shutdown,
        SHUTDOWN_GRACE,
    )
    .await;

    info!("server exited");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = VaultConfig::from_env().context("failed to load configuration")?;

    init_tracing(&config.log_level)?;

    info!(
        gateway_listen = %config.gateway_listen,
        mode = %config.mode,
        bucket = %config.bucket,
        storage_endpoint = %config.storage_endpoint,
        version = VERSION,
        "starting xmlvault server",
    );

    let addr: SocketAddr = config
        .gateway_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.gateway_listen))?;

    let transport = build_transport(&config)?;

    match config.mode {
        ServiceMode::Persist => {
            let store = S3BlobStore::new(&store_config(&config))
                .context("failed to create object store client")?;
            run(addr, transport, PersistingHandler::new(store, config.bucket.clone())).await
        }
        ServiceMode::Validate => run(addr, transport, ValidatingHandler).await,
    }
}
