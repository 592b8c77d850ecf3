//! Response construction.
//!
//! All bodies are fixed strings, minted keys, or stored object bytes. Plain
//! text responses are labelled `text/plain; charset=utf-8`; anything served
//! from the read endpoint is labelled `application/xml`.

use bytes::Bytes;
use http::StatusCode;
use http::header::{CONTENT_TYPE, HeaderValue};
use http_body_util::Full;

use crate::error::ApiError;

/// Body of every response. All bodies are fully buffered; an empty `Full`
/// reports end-of-stream immediately.
pub type ResponseBody = Full<Bytes>;

/// Body returned for every path that is not an endpoint.
pub const NOT_FOUND_BODY: &str = "<p>Oops, you walked the wrong path</p>";

/// Content type of plain-text responses.
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Content type of the not-found page.
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// Content type of every read endpoint response.
pub const CONTENT_TYPE_XML: &str = "application/xml";

/// Build a response, falling back to a bare 500 if the builder rejects it.
fn build(
    builder: http::response::Builder,
    body: ResponseBody,
) -> http::Response<ResponseBody> {
    builder.body(body).unwrap_or_else(|_| {
        let mut fallback = http::Response::new(ResponseBody::default());
        *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    })
}

/// The catch-all response for unknown paths.
///
/// Served with status 200 regardless of method.
#[must_use]
pub fn not_found_response() -> http::Response<ResponseBody> {
    build(
        http::Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, CONTENT_TYPE_HTML),
        ResponseBody::from(NOT_FOUND_BODY),
    )
}

/// A 200 response carrying a plain-text body, e.g. a minted object key.
#[must_use]
pub fn text_response(text: impl Into<String>) -> http::Response<ResponseBody> {
    build(
        http::Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, CONTENT_TYPE_TEXT),
        ResponseBody::new(Bytes::from(text.into())),
    )
}

/// A 200 response with no body.
#[must_use]
pub fn empty_response() -> http::Response<ResponseBody> {
    build(
        http::Response::builder().status(StatusCode::OK),
        ResponseBody::default(),
    )
}

/// A 200 response returning stored object bytes as XML.
///
/// The bytes are passed through untouched; they are not checked to be XML.
#[must_use]
pub fn object_response(data: Bytes) -> http::Response<ResponseBody> {
    build(
        http::Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, CONTENT_TYPE_XML),
        ResponseBody::new(data),
    )
}

/// Render an [`ApiError`] as a response.
#[must_use]
pub fn error_to_response(err: &ApiError) -> http::Response<ResponseBody> {
    match err.message {
        Some(message) => build(
            http::Response::builder()
                .status(err.status)
                .header(CONTENT_TYPE, CONTENT_TYPE_TEXT),
            ResponseBody::from(message),
        ),
        None => build(
            http::Response::builder().status(err.status),
            ResponseBody::default(),
        ),
    }
}

/// Force the `Content-Type` of a response to `application/xml`.
#[must_use]
pub fn with_xml_content_type(
    mut response: http::Response<ResponseBody>,
) -> http::Response<ResponseBody> {
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_XML));
    response
}
