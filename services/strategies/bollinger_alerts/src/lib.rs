//! # Bollinger Alerts Strategy - Extreme Band Position Alerts
//!
//! ## Purpose
//!
//! Watches a fixed list of symbols on hourly candles and sends a notification
//! when the latest close sits at an extreme of its Bollinger Band: at or below
//! the buy threshold (STRONG BUY) or at or above the sell threshold (STRONG
//! SELL). Repeat alerts for the same symbol and action are held back for a
//! cooldown window.
//!
//! ## Integration Points
//!
//! - **Input Sources**: any [`adapter_service::CandleSource`], normally the
//!   Binance/Kraken fallback source (uncached, so every run sees fresh data)
//! - **Output Destinations**: any [`message_sink::NotificationSink`], normally SMS
//! - **Configuration**: [`bandwatch_config::StrategySettings`] via [`StrategyConfig`]
//!
//! ## Architecture Role
//!
//! ```text
//! CandleSource → [Indicator Engine] → [Signal Classifier] → [Alert Deduplicator] → NotificationSink
//!                  compute_band          classify             should_notify          format_alert
//!                  compute_position
//! ```
//!
//! [`AlertChecker::check_all`] fans the pipeline out over all symbols and
//! returns an [`AlertReport`] with one typed outcome per symbol.

pub mod config;
pub mod cooldown;
pub mod error;
pub mod indicators;
pub mod message;
pub mod signals;
pub mod strategy;

pub use config::StrategyConfig;
pub use cooldown::AlertDeduplicator;
pub use error::{Result, StrategyError};
pub use indicators::{compute_band, compute_position, Band, DEGENERATE_POSITION};
pub use message::{format_alert, format_position, format_price};
pub use signals::{classify, Signal, SignalAction, SignalThresholds};
pub use strategy::{AlertChecker, AlertRecord, AlertReport, Evaluation, SymbolCheck, SymbolOutcome};
