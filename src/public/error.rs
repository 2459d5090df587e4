//! Error types for HTTP operations and public IP lookups.

use std::time::Duration;

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and connections dropped mid-response.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Why a public IP lookup failed.
///
/// The lookup is a single attempt; every variant is final for the call.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No complete response arrived within the configured timeout.
    #[error("Public IP service did not respond within {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The service could not be reached.
    #[error("Public IP service unreachable: {0}")]
    Network(#[source] HttpError),

    /// The service answered with a non-success status.
    #[error("Public IP service returned HTTP {status}")]
    Http {
        /// Status code of the response.
        status: http::StatusCode,
    },

    /// The service answered 2xx with an empty (or whitespace-only) body.
    #[error("Public IP service returned an empty response")]
    EmptyResponse,

    /// The configured service URL was rejected by the HTTP client.
    #[error("Invalid public IP service URL: {0}")]
    InvalidUrl(String),
}

impl LookupError {
    /// Converts a transport error, attributing timeouts to `timeout`.
    #[must_use]
    pub fn from_http(error: HttpError, timeout: Duration) -> Self {
        match error {
            HttpError::Timeout => Self::Timeout(timeout),
            HttpError::InvalidUrl(url) => Self::InvalidUrl(url),
            other => Self::Network(other),
        }
    }

    /// True when the host could not reach the service at all.
    ///
    /// Callers use this to tell "network unavailable" apart from
    /// "service error".
    #[must_use]
    pub const fn is_network_unavailable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Network(_))
    }

    /// True for timeouts.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Short machine-readable label, stable across releases.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Network(_) => "network",
            Self::Http { .. } => "http",
            Self::EmptyResponse => "empty_response",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }
}
