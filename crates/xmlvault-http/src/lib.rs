//! HTTP routing, validation, handlers, and hyper service for xmlvault.
//!
//! This crate provides the HTTP layer of the XML upload service. It handles:
//!
//! - **Routing** ([`router`]): Maps the request path to `/upload`, `/read`, or
//!   the not-found page. Matching is exact and method-independent.
//!
//! - **Request records** ([`request`]): Captures method, content type, query
//!   parameters, and body from raw HTTP parts.
//!
//! - **Validation** ([`validate`]): Method and content-type checks that run
//!   before the body is read.
//!
//! - **Dispatch** ([`dispatch`]): The [`VaultHandler`](dispatch::VaultHandler)
//!   trait and its two variants, persisting and validating.
//!
//! - **Service** ([`service`]): The [`VaultHttpService`](service::VaultHttpService)
//!   that implements hyper's `Service` trait.
//!
//! - **Responses** ([`response`]): Fixed-body builders over
//!   [`ResponseBody`](response::ResponseBody), a buffered `Full<Bytes>`.
//!
//! - **Server** ([`server`]): Accept loop with optional TLS ([`tls`]) and
//!   bounded graceful shutdown.
//!
//! # Architecture
//!
//! ```text
//! TCP accept (+ TLS handshake)
//!   -> VaultHttpService (hyper Service)
//!     -> Route resolution / not-found page
//!     -> Method + content-type validation
//!     -> Body collection (upload only)
//!     -> dispatch_route (VaultHandler trait)
//!     -> Common response headers (x-request-id, Server)
//!   <- HTTP Response
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use xmlvault_http::dispatch::ValidatingHandler;
//! use xmlvault_http::service::VaultHttpService;
//!
//! let service = VaultHttpService::new(ValidatingHandler);
//! // Pass `service` to `xmlvault_http::server::serve`.
//! ```

pub mod dispatch;
pub mod error;
pub mod request;
pub mod response;
pub mod router;
pub mod server;
pub mod service;
pub mod tls;
pub mod validate;

pub use dispatch::{PersistingHandler, ValidatingHandler, VaultHandler};
pub use error::ApiError;
pub use response::ResponseBody;
pub use router::Route;
pub use server::{SHUTDOWN_GRACE, Transport, serve, shutdown_signal};
pub use service::VaultHttpService;
pub use tls::{TlsError, load_tls_acceptor};
