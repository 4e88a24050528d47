//! Error types for the GeoNode REST client.

use thiserror::Error;

/// Error type covering every failure mode of a GeoNode API call.
#[derive(Error, Debug)]
pub enum GeonodeError {
    /// The server could not be reached at all (DNS failure, connection
    /// refused, TLS handshake failure, timeout).
    #[error(
        "connection error: could not reach the GeoNode API at {url} ({message}). \
         Check that the endpoint is up and that GEONODE_API_URL points at it"
    )]
    Connection { url: String, message: String },

    /// 401 or 403 from the server.
    #[error("unauthorized: the server rejected the Basic auth credentials (GEONODE_API_BASIC_AUTH)")]
    Unauthorized,

    /// 404 from the server. `path` is the request path, which names the
    /// resource and pk that were asked for.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// Any other non-2xx response. The server body is preserved verbatim
    /// for display.
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The response decoded fine but the envelope key the API contract
    /// promises is missing. Indicates a server/client version mismatch.
    #[error("protocol error: expected key '{key}' missing from {context} response")]
    Protocol { key: String, context: String },

    /// Bad caller input: malformed JSON field string or file, a pk spec
    /// that is not a number/list/range, missing sidecar files for a
    /// shapefile upload, or misuse of mutually exclusive arguments.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level error other than connectivity (e.g. body decode).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, GeonodeError>;

impl GeonodeError {
    /// Returns true if this is a "not found" error (404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeonodeError::NotFound { .. })
    }

    /// Returns true if this is an authentication/authorization error (401/403).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GeonodeError::Unauthorized)
    }

    /// Returns true if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, GeonodeError::Api { status, .. } if *status >= 500)
    }

    /// Returns true if the server was unreachable.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, GeonodeError::Connection { .. })
    }
}
