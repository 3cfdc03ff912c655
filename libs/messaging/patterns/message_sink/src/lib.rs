//! # Notification Sinks
//!
//! Alert delivery is abstracted behind [`NotificationSink`] so the alert
//! pipeline never knows which provider carries a message. The production sink
//! is [`SmsSink`], a Twilio-compatible form POST; tests use the sinks in
//! [`test_utils`].
//!
//! ```rust,no_run
//! use message_sink::{Notification, NotificationSink, SmsSink};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), message_sink::SinkError> {
//! let sink = SmsSink::new("https://api.twilio.com", Duration::from_secs(10))?;
//! sink.send(&Notification::new("BTC STRONG BUY!")?).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod message;
pub mod sinks;
pub mod test_utils;

use async_trait::async_trait;

pub use error::{Result, SinkError};
pub use message::{Notification, MAX_NOTIFICATION_CHARS};
pub use sinks::SmsSink;

/// A destination for alert notifications
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Deliver a single notification
    async fn send(&self, notification: &Notification) -> Result<()>;
}
