//! Error types for direction-trends.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

use crate::models::Direction;

/// Errors from a series data source.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by the upstream host (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response, or missing from a bulk answer)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed JSON with the wrong shape or out-of-domain values.
    #[error("Malformed series data: {message}")]
    Malformed {
        /// What was wrong with the payload
        message: String,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// Local file access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configured base URL could not be parsed or extended.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The source does not offer this operation.
    #[error("Operation not supported by this source: {operation}")]
    Unsupported {
        /// Operation name
        operation: &'static str,
    },
}

impl SourceError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a malformed data error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create an unsupported operation error.
    #[must_use]
    pub const fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Server { .. } => true,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns true if the source simply lacks the operation.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Data for one direction could not be loaded.
///
/// Recoverable: only the named direction is affected.
#[derive(thiserror::Error, Debug)]
#[error("data unavailable for '{direction}': {source}")]
pub struct DataUnavailable {
    /// Direction whose fetch failed.
    pub direction: Direction,
    /// Underlying source error.
    #[source]
    pub source: SourceError,
}

impl DataUnavailable {
    #[must_use]
    pub const fn new(direction: Direction, source: SourceError) -> Self {
        Self { direction, source }
    }

    /// Short reason without the direction prefix.
    #[must_use]
    pub fn reason(&self) -> String {
        self.source.to_string()
    }
}

/// A result arrived after its selection was superseded.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("result for generation {issued} superseded by generation {current}")]
pub struct Superseded {
    /// Generation the work was started under.
    pub issued: u64,
    /// Generation at commit time.
    pub current: u64,
}

/// Errors from tool execution and the HTTP surface.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from the data source
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// A single direction could not be loaded
    #[error("{0}")]
    Data(#[from] DataUnavailable),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A newer selection or refresh replaced this request
    #[error("Stale result: {0}")]
    Superseded(#[from] Superseded),

    /// Internal tool logic error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Resource not available
    #[error("Resource unavailable: {0}")]
    Unavailable(String),
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Convert to a user-friendly error message for MCP responses.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Source(SourceError::RateLimited { retry_after })
            | Self::Data(DataUnavailable {
                source: SourceError::RateLimited { retry_after }, ..
            }) => {
                format!("Data source is rate limiting requests. Please wait {:?}.", retry_after)
            }
            Self::Data(e) => {
                format!("No data for '{}' right now: {}", e.direction, e.reason())
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::Superseded(_) => {
                "A newer selection replaced this request; showing the latest instead.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
