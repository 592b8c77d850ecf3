//! Request routing: maps a URL path to one of the service endpoints.
//!
//! Matching is exact on the decoded path; query strings never take part in
//! routing and the HTTP method is checked later by the validator.

use std::fmt;

/// Path of the upload endpoint.
pub const UPLOAD_PATH: &str = "/upload";

/// Path of the read endpoint.
pub const READ_PATH: &str = "/read";

/// The endpoint a request path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/upload`
    Upload,
    /// `/read`
    Read,
    /// Anything else.
    NotFound,
}

impl Route {
    /// Resolve a request path.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        match path {
            UPLOAD_PATH => Self::Upload,
            READ_PATH => Self::Read,
            _ => Self::NotFound,
        }
    }

    /// A short name for logging.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Read => "read",
            Self::NotFound => "not_found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
