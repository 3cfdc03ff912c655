//! In-process sinks for exercising alert pipelines without a provider

use crate::{Notification, NotificationSink, Result, SinkError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// A sink that records every delivered body
#[derive(Debug, Default)]
pub struct RecordingSink {
    bodies: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bodies delivered so far, in send order
    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.bodies.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.lock().is_empty()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        self.bodies.lock().push(notification.body.clone());
        Ok(())
    }
}

/// A sink whose every send fails with a transport error
#[derive(Debug, Default)]
pub struct FailingSink {
    attempts: AtomicU64,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl NotificationSink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    async fn send(&self, _notification: &Notification) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Err(SinkError::Transport("connection refused".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.send(&Notification::new("one").unwrap()).await.unwrap();
        sink.send(&Notification::new("two").unwrap()).await.unwrap();
        assert_eq!(sink.bodies(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_failing_sink_counts_attempts() {
        let sink = FailingSink::new();
        assert!(sink.send(&Notification::new("x").unwrap()).await.is_err());
        assert_eq!(sink.attempts(), 1);
    }
}
