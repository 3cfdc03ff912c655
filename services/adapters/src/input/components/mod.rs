//! Reusable pieces shared by the exchange collectors

pub mod parsing_utils;

pub use parsing_utils::{decimal_at, timestamp_at};
