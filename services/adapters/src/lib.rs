//! # Bandwatch Adapters - Exchange Candle Sources
//!
//! ## Purpose
//!
//! Fetches hourly OHLCV candles from public exchange REST APIs and normalizes
//! them into [`types::Candle`] rows. Binance is the primary source; Kraken is
//! the single fallback, its OHLC rows re-shaped to the Binance kline layout.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Binance `/api/v3/klines`, Kraken `/0/public/OHLC`
//! - **Consumers**: the data endpoint (through [`CandleCache`]) and the
//!   Bollinger alert checker (directly, always fresh)
//! - **Configuration**: [`bandwatch_config::ExchangeSettings`] for base URLs,
//!   interval, candle limit and the per-request timeout
//!
//! ## Architecture Role
//!
//! ```text
//! Binance REST ──┐
//!                ├─→ [FallbackCandleSource] ─→ [CandleCache] ─→ data endpoint
//! Kraken REST ───┘            │
//!                             └────────────────────────────────→ alert checker
//! ```
//!
//! ## Failure Policy
//!
//! - One request per source, bounded by the configured timeout
//! - Any primary failure (transport, status, parse) triggers the fallback
//! - No retries and no backoff beyond that single fallback
//! - Failures are never cached

pub mod cache;
pub mod error;
pub mod fallback;
pub mod input;
pub mod testing;

pub use cache::{CacheStats, CandleCache};
pub use error::{AdapterError, Result};
pub use fallback::FallbackCandleSource;
pub use input::collectors::{BinanceCandleSource, KrakenCandleSource};
pub use input::CandleSource;
