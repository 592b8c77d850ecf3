//! End-to-end tests for the xmlvault server.
//!
//! Each test spawns an in-process server on an ephemeral port and talks to it
//! over real sockets with `reqwest`. The in-memory store stands in for S3, so
//! these run under a plain `cargo test`.
//!
//! Tests against a real MinIO at `localhost:9000` are marked `#[ignore]`:
//! ```text
//! cargo test -p xmlvault-integration -- --ignored
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Once};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use xmlvault_http::{
    PersistingHandler, Transport, ValidatingHandler, VaultHandler, VaultHttpService, serve,
};
use xmlvault_store::InMemoryBlobStore;

static INIT: Once = Once::new();

/// A well-formed upload payload.
pub const SAMPLE_PAYLOAD: &str = "<xmlPayload><UserFrom>alice</UserFrom><UserTo>bob</UserTo><Message>hello</Message></xmlPayload>";

/// Bucket used by the in-process persisting server.
pub const TEST_BUCKET: &str = "bucket1";

/// Initialize tracing and the process-wide rustls provider (once).
fn init() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// A server running on a background task.
#[derive(Debug)]
pub struct TestServer {
    /// Bound address.
    pub addr: SocketAddr,
    scheme: &'static str,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Absolute URL for a path (and query) on this server.
    #[must_use]
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}://{}{path_and_query}", self.scheme, self.addr)
    }

    /// Trigger shutdown and wait for the accept loop to return.
    ///
    /// # Panics
    ///
    /// Panics if the server task panicked.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.expect("server task panicked");
    }
}

/// Spawn a server for `handler` on `127.0.0.1:0`.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
pub async fn spawn_server<H: VaultHandler>(
    handler: H,
    transport: Transport,
    grace: Duration,
) -> TestServer {
    init();

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let scheme = match transport {
        Transport::Plain => "http",
        Transport::Tls(_) => "https",
    };
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(serve(
        listener,
        transport,
        VaultHttpService::new(handler),
        async move {
            let _ = rx.await;
        },
        grace,
    ));

    TestServer {
        addr,
        scheme,
        shutdown: Some(tx),
        handle,
    }
}

/// Spawn a persisting server over plain HTTP backed by `store`.
pub async fn spawn_persisting(store: Arc<InMemoryBlobStore>) -> TestServer {
    spawn_server(
        PersistingHandler::new(store, TEST_BUCKET),
        Transport::Plain,
        Duration::from_secs(5),
    )
    .await
}

/// Spawn a validating server over plain HTTP.
pub async fn spawn_validating() -> TestServer {
    spawn_server(ValidatingHandler, Transport::Plain, Duration::from_secs(5)).await
}

/// A plain HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn http_client() -> reqwest::Client {
    init();
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("build client")
}

/// POST `body` to `/upload` with the given content type.
///
/// # Panics
///
/// Panics if the request cannot be sent.
pub async fn upload(
    client: &reqwest::Client,
    server: &TestServer,
    content_type: &str,
    body: impl Into<reqwest::Body>,
) -> reqwest::Response {
    client
        .post(server.url("/upload"))
        .header("Content-Type", content_type)
        .body(body)
        .send()
        .await
        .expect("send upload")
}

mod test_read;
mod test_routing;
mod test_shutdown;
mod test_tls;
mod test_upload;
