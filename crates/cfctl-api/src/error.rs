//! Error types for the API access layer.

use thiserror::Error;

/// Errors surfaced by the gateway and the resource repositories.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("transport error: {reason}")]
    Transport {
        /// The reason the request failed.
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("server error {status}: {description} ({error_code})")]
    Http {
        /// HTTP status code.
        status: u16,
        /// The cloud controller's error code, e.g. `CF-InvalidRequest`.
        error_code: String,
        /// Human-readable description from the server.
        description: String,
    },

    /// The response body did not match the expected shape.
    #[error("decoding error: {reason}")]
    Decoding {
        /// The reason decoding failed.
        reason: String,
    },

    /// A request body could not be serialized.
    #[error("encoding error: {reason}")]
    Encoding {
        /// The reason encoding failed.
        reason: String,
    },

    /// A filtered lookup matched nothing.
    #[error("{kind} '{key}' not found")]
    NotFound {
        /// Display name of the resource kind, e.g. `Quota`.
        kind: &'static str,
        /// The lookup key, e.g. the quota name.
        key: String,
    },
}

impl ApiError {
    /// Returns true for failures in the transport family (no response or
    /// a non-success status).
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Http { .. })
    }

    /// Returns true if this is a not-found lookup result.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decoding {
                reason: err.to_string(),
            }
        } else {
            Self::Transport {
                reason: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decoding {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
