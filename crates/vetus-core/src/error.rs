//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (connection refused, reset, bad body).
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the response body when it had any text, otherwise
    /// `Request failed: <status>`.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-provided text or the generic fallback.
        message: String,
    },

    /// A base URL or endpoint could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Builds a server error from a status code and a (possibly empty) body.
    #[must_use]
    pub fn server(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("Request failed: {status}")
        } else {
            body.to_string()
        };
        Self::Server { status, message }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_uses_body_text() {
        let err = Error::server(404, "Thread not found");
        assert_eq!(err.to_string(), "Thread not found");
        assert!(matches!(err, Error::Server { status: 404, .. }));
    }

    #[test]
    fn server_error_falls_back_to_status() {
        let err = Error::server(502, "  \n");
        assert_eq!(err.to_string(), "Request failed: 502");
    }
}
