//! The per-request record the validator and handlers work from.
//!
//! [`RequestRecord`] captures the parts of an HTTP request this service cares
//! about: the method, the declared content type, the decoded query parameters,
//! and (once collected) the raw body.

use bytes::Bytes;
use percent_encoding::percent_decode_str;

/// HTTP methods the service distinguishes between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// Any other method.
    Other(http::Method),
}

impl From<&http::Method> for RequestMethod {
    fn from(method: &http::Method) -> Self {
        if *method == http::Method::GET {
            Self::Get
        } else if *method == http::Method::POST {
            Self::Post
        } else {
            Self::Other(method.clone())
        }
    }
}

/// A request as seen by validation and dispatch.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    /// The request method.
    pub method: RequestMethod,
    /// The raw `Content-Type` header value, if present and valid UTF-8.
    pub content_type: Option<String>,
    /// Decoded query parameters in order of appearance.
    pub query_params: Vec<(String, String)>,
    /// The fully buffered request body; empty until collected.
    pub body: Bytes,
}

impl RequestRecord {
    /// Build a record from request parts, with an empty body.
    #[must_use]
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Self {
            method: RequestMethod::from(&parts.method),
            content_type,
            query_params: parse_query_params(parts.uri.query().unwrap_or("")),
            body: Bytes::new(),
        }
    }

    /// Attach the collected body.
    #[must_use]
    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    /// Get the first value of a query parameter by name.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query_params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Decode a percent-encoded URI component.
pub(crate) fn decode_uri_component(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Parse a form-encoded query string into key-value pairs, in order.
fn parse_query_params(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}
