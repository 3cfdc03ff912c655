//! Venue-specific candle collectors

pub mod binance;
pub mod kraken;

pub use binance::BinanceCandleSource;
pub use kraken::KrakenCandleSource;
