//! Endpoint handlers and dispatch.
//!
//! [`VaultHandler`] is the boundary between the HTTP plumbing in
//! [`service`](crate::service) and the behaviour of each service variant:
//!
//! - [`PersistingHandler`] stores uploads in a [`BlobStore`] under freshly
//!   minted keys and serves them back on `/read`.
//! - [`ValidatingHandler`] only checks that uploads decode as an
//!   [`XmlPayload`] and stores nothing.
//!
//! By the time a handler runs, the request has passed method and
//! content-type validation and its body has been fully buffered.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use xmlvault_core::ObjectKeyGenerator;
use xmlvault_store::{BlobStore, StoreError};
use xmlvault_xml::XmlPayload;

use crate::error::ApiError;
use crate::request::RequestRecord;
use crate::response::{
    ResponseBody, empty_response, error_to_response, not_found_response, object_response, text_response,
    with_xml_content_type,
};
use crate::router::Route;

/// Query parameter carrying the key to read.
pub const BUCKET_ID_PARAM: &str = "bucket_id";

/// Future returned by [`VaultHandler::handle`].
pub type HandlerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<http::Response<ResponseBody>, ApiError>> + Send + 'a>>;

/// Behaviour of one service variant.
pub trait VaultHandler: Send + Sync + 'static {
    /// Whether this variant serves `route`. Unserved routes get the not-found page.
    fn serves(&self, route: Route) -> bool;

    /// Handle a validated request whose body has been collected.
    fn handle(&self, route: Route, record: RequestRecord) -> HandlerFuture<'_>;
}

/// Dispatch a validated request and render the outcome.
///
/// Responses from the read endpoint always carry `Content-Type:
/// application/xml`, errors included.
pub async fn dispatch_route<H: VaultHandler + ?Sized>(
    handler: &H,
    route: Route,
    record: RequestRecord,
) -> http::Response<ResponseBody> {
    debug!(%route, body_len = record.body.len(), "dispatching request");

    let response = match handler.handle(route, record).await {
        Ok(response) => response,
        Err(err) => {
            debug!(%route, error = %err, "request rejected");
            error_to_response(&err)
        }
    };

    if route == Route::Read {
        with_xml_content_type(response)
    } else {
        response
    }
}

// ---------------------------------------------------------------------------
// Persisting variant
// ---------------------------------------------------------------------------

/// Stores uploads in a blob store and reads them back.
#[derive(Debug)]
pub struct PersistingHandler<S: BlobStore> {
    store: S,
    keys: Arc<ObjectKeyGenerator>,
    bucket: String,
}

impl<S: BlobStore> PersistingHandler<S> {
    /// Create a handler writing to `bucket` with its own key counter.
    #[must_use]
    pub fn new(store: S, bucket: impl Into<String>) -> Self {
        Self::with_keys(store, bucket, Arc::new(ObjectKeyGenerator::new()))
    }

    /// Create a handler with an injected key generator.
    #[must_use]
    pub fn with_keys(store: S, bucket: impl Into<String>, keys: Arc<ObjectKeyGenerator>) -> Self {
        Self {
            store,
            keys,
            bucket: bucket.into(),
        }
    }

    /// The bucket every object is written to.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(&self, record: RequestRecord) -> Result<http::Response<ResponseBody>, ApiError> {
        let key = self.keys.next_key();
        let size = record.body.len();

        if let Err(err) = self.store.put(&self.bucket, key.as_str(), record.body).await {
            error!(bucket = %self.bucket, %key, error = %err, "failed to upload object");
            return Err(ApiError::upload_failed());
        }

        info!(bucket = %self.bucket, %key, size, "stored upload");
        Ok(text_response(key.into_string()))
    }

    async fn read(&self, record: RequestRecord) -> Result<http::Response<ResponseBody>, ApiError> {
        let key = record
            .query_value(BUCKET_ID_PARAM)
            .filter(|v| !v.is_empty())
            .ok_or_else(ApiError::bucket_id_required)?;

        match self.store.get(&self.bucket, key).await {
            Ok(data) => {
                debug!(bucket = %self.bucket, key, size = data.len(), "read object");
                Ok(object_response(data))
            }
            Err(err @ StoreError::BodyRead { .. }) => {
                error!(bucket = %self.bucket, key, error = %err, "failed to read object");
                Err(ApiError::read_failed())
            }
            Err(err) if err.is_not_found() => {
                // Reported to the caller as a generic 500, like any other store failure.
                warn!(bucket = %self.bucket, key, "object not found");
                Err(ApiError::get_failed())
            }
            Err(err) => {
                error!(bucket = %self.bucket, key, error = %err, "failed to get object");
                Err(ApiError::get_failed())
            }
        }
    }
}

impl<S: BlobStore> VaultHandler for PersistingHandler<S> {
    fn serves(&self, route: Route) -> bool {
        matches!(route, Route::Upload | Route::Read)
    }

    fn handle(&self, route: Route, record: RequestRecord) -> HandlerFuture<'_> {
        Box::pin(async move {
            match route {
                Route::Upload => self.upload(record).await,
                Route::Read => self.read(record).await,
                Route::NotFound => Ok(not_found_response()),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Validating variant
// ---------------------------------------------------------------------------

/// Accepts uploads that decode as an [`XmlPayload`]; persists nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatingHandler;

impl ValidatingHandler {
    fn validate(record: &RequestRecord) -> Result<http::Response<ResponseBody>, ApiError> {
        match XmlPayload::decode(&record.body) {
            Ok(payload) => {
                info!(
                    user_from = %payload.user_from,
                    user_to = %payload.user_to,
                    "accepted xml payload"
                );
                Ok(empty_response())
            }
            Err(err) => {
                debug!(error = %err, "rejected malformed xml payload");
                Err(ApiError::malformed_payload())
            }
        }
    }
}

impl VaultHandler for ValidatingHandler {
    fn serves(&self, route: Route) -> bool {
        route == Route::Upload
    }

    fn handle(&self, route: Route, record: RequestRecord) -> HandlerFuture<'_> {
        Box::pin(async move {
            match route {
                Route::Upload => Self::validate(&record),
                Route::Read | Route::NotFound => Ok(not_found_response()),
            }
        })
    }
}
