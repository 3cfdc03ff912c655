//! Error types for the adapters module

use thiserror::Error;
use types::{Symbol, Venue};

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Main error type for adapter operations
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The request never produced a response
    #[error("Connection failed for venue {venue}: {reason}")]
    ConnectionFailed {
        /// The venue that failed to respond
        venue: Venue,
        /// Reason for the failure
        reason: String,
    },

    /// Request exceeded the configured timeout
    #[error("Connection timeout for venue {venue} after {timeout_ms}ms")]
    ConnectionTimeout {
        /// The venue that timed out
        venue: Venue,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Exchange answered with a non-success HTTP status
    #[error("Venue {venue} responded with HTTP {status}")]
    UpstreamStatus {
        /// The venue that returned the status
        venue: Venue,
        /// HTTP status code
        status: u16,
    },

    /// Exchange answered successfully but reported errors in the payload
    #[error("Venue {venue} rejected request: {errors}")]
    UpstreamRejected {
        /// The venue that rejected the request
        venue: Venue,
        /// Error messages reported by the venue
        errors: String,
    },

    /// Parse error from exchange data
    #[error("Parse error for venue {venue}: {message}")]
    ParseError {
        /// The venue that provided the unparseable data
        venue: Venue,
        /// Description of what failed to parse
        message: String,
    },

    /// Both the primary and the fallback source failed
    #[error("All candle sources failed for {symbol}: primary: {primary}; fallback: {fallback}")]
    AllSourcesFailed {
        /// Symbol that could not be fetched
        symbol: Symbol,
        /// Primary source failure
        primary: Box<AdapterError>,
        /// Fallback source failure
        fallback: Box<AdapterError>,
    },

    /// Configuration error in adapter settings
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AdapterError {
    pub(crate) fn parse(venue: Venue, message: impl Into<String>) -> Self {
        AdapterError::ParseError {
            venue,
            message: message.into(),
        }
    }

    /// Check if this error is transient and a later request may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            AdapterError::ConnectionFailed { .. } | AdapterError::ConnectionTimeout { .. } => true,
            AdapterError::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            AdapterError::AllSourcesFailed { primary, fallback, .. } => {
                primary.is_recoverable() || fallback.is_recoverable()
            }
            _ => false,
        }
    }
}
