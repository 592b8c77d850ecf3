//! The HTTP service implementing hyper's `Service` trait.
//!
//! [`VaultHttpService`] ties together routing, validation, body collection,
//! and dispatch:
//!
//! 1. Route resolution on the decoded path
//! 2. Not-found page for unknown paths and routes the variant does not serve
//! 3. Method and content-type validation
//! 4. Request body collection (upload only)
//! 5. Dispatch to the [`VaultHandler`]
//! 6. Common response headers (`x-request-id`, `Server`)

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::service::Service;
use tracing::{Instrument, debug, error, info_span};
use uuid::Uuid;

use crate::dispatch::{VaultHandler, dispatch_route};
use crate::error::ApiError;
use crate::request::{RequestRecord, decode_uri_component};
use crate::response::{ResponseBody, error_to_response, not_found_response};
use crate::router::Route;
use crate::validate::{validate_read, validate_upload};

/// Header carrying the per-request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Value of the `Server` response header.
pub const SERVER_NAME: &str = "xmlvault";

/// The xmlvault HTTP service.
///
/// # Type Parameters
///
/// - `H`: the service variant implementing [`VaultHandler`].
pub struct VaultHttpService<H: VaultHandler> {
    handler: Arc<H>,
}

impl<H: VaultHandler> VaultHttpService<H> {
    /// Create a new service around the given handler.
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// The wrapped handler.
    #[must_use]
    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }
}

impl<H: VaultHandler> Clone for VaultHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: VaultHandler> fmt::Debug for VaultHttpService<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultHttpService").finish_non_exhaustive()
    }
}

impl<H: VaultHandler> Service<http::Request<Incoming>> for VaultHttpService<H> {
    type Response = http::Response<ResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);

        Box::pin(async move { Ok(handle_request(req, handler.as_ref()).await) })
    }
}

/// Process one request end to end and attach the common headers.
///
/// Generic over the request body so it can be driven without a socket.
pub async fn handle_request<H, B>(
    req: http::Request<B>,
    handler: &H,
) -> http::Response<ResponseBody>
where
    H: VaultHandler + ?Sized,
    B: http_body::Body<Data = Bytes>,
    B::Error: fmt::Display,
{
    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("request", %request_id, method = %req.method(), path = %req.uri().path());

    let response = process_request(req, handler).instrument(span).await;
    add_common_headers(response, &request_id)
}

/// Route, validate, collect, and dispatch a request.
async fn process_request<H, B>(req: http::Request<B>, handler: &H) -> http::Response<ResponseBody>
where
    H: VaultHandler + ?Sized,
    B: http_body::Body<Data = Bytes>,
    B::Error: fmt::Display,
{
    // 1. Route on the decoded path.
    let route = Route::resolve(&decode_uri_component(req.uri().path()));

    // 2. Unknown paths and routes this variant does not serve.
    if route == Route::NotFound || !handler.serves(route) {
        debug!(%route, "serving not-found page");
        return not_found_response();
    }

    // 3. Validate before touching the body.
    let (parts, body) = req.into_parts();
    let record = RequestRecord::from_parts(&parts);
    let validation = match route {
        Route::Upload => validate_upload(&record),
        Route::Read => validate_read(&record),
        Route::NotFound => Ok(()),
    };
    if let Err(err) = validation {
        debug!(%route, error = %err, content_type = ?record.content_type, "request failed validation");
        return error_to_response(&err);
    }

    // 4. Only uploads carry a meaningful body.
    let record = if route == Route::Upload {
        match collect_body(body).await {
            Ok(bytes) => record.with_body(bytes),
            Err(err) => {
                error!(error = %err, "failed to collect request body");
                return error_to_response(&ApiError::body_read_failed());
            }
        }
    } else {
        record
    };

    // 5. Dispatch.
    dispatch_route(handler, route, record).await
}

/// Collect the full body into `Bytes`.
async fn collect_body<B>(body: B) -> Result<Bytes, B::Error>
where
    B: http_body::Body<Data = Bytes>,
{
    let collected = body.collect().await?;
    Ok(collected.to_bytes())
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<ResponseBody>,
    request_id: &str,
) -> http::Response<ResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::header::HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, hv);
    }
    headers.insert(
        http::header::SERVER,
        http::header::HeaderValue::from_static(SERVER_NAME),
    );

    response
}
