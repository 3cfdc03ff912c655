//! Concrete notification sinks

pub mod sms;

pub use sms::SmsSink;
