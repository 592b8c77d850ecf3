//! Accept loop and graceful shutdown.
//!
//! [`serve`] accepts TCP connections, optionally terminates TLS, and hands
//! each connection to hyper's auto (HTTP/1 + HTTP/2) builder on its own
//! task. When the shutdown future resolves the listener stops accepting,
//! and in-flight connections get a bounded grace period to finish.

use std::future::Future;
use std::time::Duration;

use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{debug, error, info, warn};

use crate::dispatch::VaultHandler;
use crate::service::VaultHttpService;

/// Grace period for in-flight requests after a shutdown signal.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// How accepted connections are carried.
#[derive(Clone)]
pub enum Transport {
    /// Plain-text HTTP.
    Plain,
    /// HTTPS, terminated with the given acceptor.
    Tls(TlsAcceptor),
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => f.write_str("Plain"),
            Self::Tls(_) => f.write_str("Tls"),
        }
    }
}

/// Run the accept loop until `shutdown` resolves, then drain connections.
///
/// Accept and TLS handshake failures are logged and the connection is
/// dropped; they never stop the loop. Connections still open after `grace`
/// are abandoned.
pub async fn serve<H, F>(
    listener: TcpListener,
    transport: Transport,
    service: VaultHttpService<H>,
    shutdown: F,
    grace: Duration,
)
where
    H: VaultHandler,
    F: Future<Output = ()>,
{
    let graceful = GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                match &transport {
                    Transport::Plain => {
                        let conn = http.serve_connection(TokioIo::new(stream), svc);
                        let conn = graceful.watch(conn.into_owned());

                        tokio::spawn(async move {
                            if let Err(e) = conn.await {
                                error!(peer_addr = %peer_addr, error = %e, "connection error");
                            }
                        });
                    }
                    Transport::Tls(acceptor) => {
                        let acceptor = acceptor.clone();
                        let http = http.clone();
                        let watcher = graceful.watcher();

                        tokio::spawn(async move {
                            let tls_stream = match acceptor.accept(stream).await {
                                Ok(s) => s,
                                Err(e) => {
                                    warn!(peer_addr = %peer_addr, error = %e, "TLS handshake failed");
                                    return;
                                }
                            };

                            let conn = http.serve_connection(TokioIo::new(tls_stream), svc);
                            if let Err(e) = watcher.watch(conn.into_owned()).await {
                                error!(peer_addr = %peer_addr, error = %e, "connection error");
                            }
                        });
                    }
                }
                debug!(peer_addr = %peer_addr, "accepted connection");
            }

            () = &mut shutdown => {
                info!("received shutdown signal, draining connections");
                break;
            }
        }
    }

    // Stop accepting before draining.
    drop(listener);

    match tokio::time::timeout(grace, graceful.shutdown()).await {
        Ok(()) => info!("all connections drained"),
        Err(_) => warn!(grace_secs = grace.as_secs(), "grace period elapsed, abandoning open connections"),
    }
}

/// Resolve on the first interrupt or termination signal.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => debug!("received ctrl-c"),
        () = terminate => debug!("received SIGTERM"),
    }
}
