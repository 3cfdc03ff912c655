use crate::SinkError;

/// Longest body an SMS provider will accept (concatenated segments)
pub const MAX_NOTIFICATION_CHARS: usize = 1600;

/// A text notification ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub body: String,
}

impl Notification {
    /// Create a notification, validating its length
    pub fn new(body: impl Into<String>) -> Result<Self, SinkError> {
        let body = body.into();
        let size = body.chars().count();
        if size > MAX_NOTIFICATION_CHARS {
            return Err(SinkError::MessageTooLarge {
                size,
                limit: MAX_NOTIFICATION_CHARS,
            });
        }
        Ok(Self { body })
    }
}
