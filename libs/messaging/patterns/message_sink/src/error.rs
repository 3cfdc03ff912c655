//! Notification delivery errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SinkError>;

#[derive(Debug, Clone, Error)]
pub enum SinkError {
    /// Credentials or endpoint are missing or malformed
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    /// The provider answered with a non-success status
    #[error("Provider rejected notification with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Notification too large: {size} chars exceeds limit of {limit}")]
    MessageTooLarge { size: usize, limit: usize },
}
