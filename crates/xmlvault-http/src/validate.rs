//! Method and content-type checks for each endpoint.
//!
//! These are pure functions of the request record and run before the body
//! is read, so a rejected request never buffers its payload.

use crate::error::ApiError;
use crate::request::{RequestMethod, RequestRecord};

/// Content types accepted on upload. Matched exactly against the header value.
pub const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["text/xml", "application/xml"];

/// Check an upload request: `POST` with an XML content type.
///
/// The method is checked first, so a `GET` with a JSON content type is a 405.
pub fn validate_upload(record: &RequestRecord) -> Result<(), ApiError> {
    if record.method != RequestMethod::Post {
        return Err(ApiError::method_not_allowed());
    }

    match record.content_type.as_deref() {
        Some(ct) if ACCEPTED_CONTENT_TYPES.contains(&ct) => Ok(()),
        _ => Err(ApiError::unsupported_content_type()),
    }
}

/// Check a read request: `GET` only.
pub fn validate_read(record: &RequestRecord) -> Result<(), ApiError> {
    if record.method == RequestMethod::Get {
        Ok(())
    } else {
        Err(ApiError::method_not_allowed())
    }
}
