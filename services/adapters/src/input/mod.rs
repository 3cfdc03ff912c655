//! Input adapters for collecting candles from exchange REST APIs

pub mod collectors;
pub mod components;
pub mod connection;

use crate::Result;
use async_trait::async_trait;
use types::{Candle, Symbol};

pub use connection::HttpConnection;

/// Core trait for all candle sources
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Source name for logs
    fn name(&self) -> &str;

    /// Fetch recent candles for a symbol, oldest first
    async fn fetch_candles(&self, symbol: &Symbol) -> Result<Vec<Candle>>;
}
