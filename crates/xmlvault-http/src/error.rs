//! Request-level failures and their HTTP rendering.
//!
//! Every rejection the service produces is an [`ApiError`]: a status code
//! plus an optional fixed plain-text message returned to the caller verbatim.
//! Internal detail (store errors, I/O errors) is logged where it happens and
//! never reaches the response body.

use http::StatusCode;

/// Message for a failed request body read.
pub const MSG_BODY_READ_FAILED: &str = "failed to read content from body";
/// Message for a failed object store write.
pub const MSG_UPLOAD_FAILED: &str = "failed to upload object";
/// Message for a read without a `bucket_id` parameter.
pub const MSG_BUCKET_ID_REQUIRED: &str = "bucket_id is required";
/// Message for a failed object store lookup.
pub const MSG_GET_FAILED: &str = "failed to get object";
/// Message for a failure while draining a fetched object.
pub const MSG_READ_FAILED: &str = "failed to read object";
/// Message for an upload body that is not well-formed XML.
pub const MSG_MALFORMED_PAYLOAD: &str = "failed to parse xml payload";

/// An HTTP-level rejection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{status}: {}", .message.unwrap_or(""))]
pub struct ApiError {
    /// Status code to return.
    pub status: StatusCode,
    /// Fixed message for the body; `None` produces an empty body.
    pub message: Option<&'static str>,
}

impl ApiError {
    /// Create an error with a status and message.
    #[must_use]
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message: Some(message),
        }
    }

    /// Create an error with an empty body.
    #[must_use]
    pub const fn bare(status: StatusCode) -> Self {
        Self {
            status,
            message: None,
        }
    }

    /// The request method is not allowed on this endpoint.
    #[must_use]
    pub const fn method_not_allowed() -> Self {
        Self::bare(StatusCode::METHOD_NOT_ALLOWED)
    }

    /// The declared content type is missing or not an accepted XML type.
    #[must_use]
    pub const fn unsupported_content_type() -> Self {
        Self::bare(StatusCode::BAD_REQUEST)
    }

    /// The request body could not be read.
    #[must_use]
    pub const fn body_read_failed() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_BODY_READ_FAILED)
    }

    /// The object store rejected a write.
    #[must_use]
    pub const fn upload_failed() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_UPLOAD_FAILED)
    }

    /// The read request has no usable `bucket_id`.
    #[must_use]
    pub const fn bucket_id_required() -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_BUCKET_ID_REQUIRED)
    }

    /// The object store lookup failed, whether missing or unavailable.
    #[must_use]
    pub const fn get_failed() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_GET_FAILED)
    }

    /// The fetched object could not be drained.
    #[must_use]
    pub const fn read_failed() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_READ_FAILED)
    }

    /// The upload body is not well-formed XML.
    #[must_use]
    pub const fn malformed_payload() -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_MALFORMED_PAYLOAD)
    }
}
