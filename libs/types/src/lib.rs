//! # Bandwatch Shared Types
//!
//! Domain types shared by every bandwatch service:
//!
//! - **Candles**: hourly OHLCV rows normalized to the primary exchange's tuple shape
//! - **Venues**: the exchanges candles can be sourced from
//! - **Symbols**: validated base-asset tickers that are safe to interpolate into URLs
//! - **Clocks**: injectable millisecond clocks for cooldown and cache windows
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{Candle, Symbol, closes};
//! use rust_decimal::Decimal;
//!
//! let symbol = Symbol::parse("btc").unwrap();
//! assert_eq!(symbol.binance_pair(), "BTCUSDT");
//!
//! let candle = Candle::new(
//!     1_700_000_000_000,
//!     Decimal::from(100),
//!     Decimal::from(110),
//!     Decimal::from(95),
//!     Decimal::from(105),
//!     Decimal::from(12),
//! );
//! assert_eq!(closes(&[candle]), vec![105.0]);
//! ```
//!
//! ## Precision
//!
//! Prices and volumes are kept as [`rust_decimal::Decimal`] so exchange decimal
//! strings round-trip to the data endpoint without float formatting drift.
//! Indicator math converts to `f64` at a single explicit boundary
//! ([`Candle::close_f64`]).

pub mod candle;
pub mod common;
pub mod time;
pub mod venue;

pub use candle::{closes, Candle};
pub use common::errors::ValidationError;
pub use common::identifiers::Symbol;
pub use time::{Clock, ManualClock, SystemClock};
pub use venue::Venue;

pub use rust_decimal::Decimal;
