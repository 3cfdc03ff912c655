//! Primary-then-fallback candle source

use async_trait::async_trait;
use bandwatch_config::ExchangeSettings;
use std::sync::Arc;
use tracing::{debug, warn};
use types::{Candle, Symbol};

use crate::input::{CandleSource, HttpConnection};
use crate::{AdapterError, BinanceCandleSource, KrakenCandleSource, Result};

/// Tries the primary source once and, on any failure, the fallback once.
///
/// The error from a double failure carries both underlying causes.
#[derive(Clone)]
pub struct FallbackCandleSource {
    primary: Arc<dyn CandleSource>,
    fallback: Arc<dyn CandleSource>,
}

impl FallbackCandleSource {
    pub fn new(primary: Arc<dyn CandleSource>, fallback: Arc<dyn CandleSource>) -> Self {
        Self { primary, fallback }
    }

    /// Binance primary with Kraken fallback sharing one HTTP client
    pub fn from_settings(settings: &ExchangeSettings) -> Result<Self> {
        let connection = HttpConnection::new(settings.request_timeout())?;
        Ok(Self::new(
            Arc::new(BinanceCandleSource::from_settings(connection.clone(), settings)),
            Arc::new(KrakenCandleSource::from_settings(connection, settings)),
        ))
    }
}

impl std::fmt::Debug for FallbackCandleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackCandleSource")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

#[async_trait]
impl CandleSource for FallbackCandleSource {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn fetch_candles(&self, symbol: &Symbol) -> Result<Vec<Candle>> {
        let primary_error = match self.primary.fetch_candles(symbol).await {
            Ok(candles) => return Ok(candles),
            Err(e) => e,
        };

        warn!(
            "{} failed for {}: {}; trying {}",
            self.primary.name(),
            symbol,
            primary_error,
            self.fallback.name()
        );

        match self.fallback.fetch_candles(symbol).await {
            Ok(candles) => {
                debug!("{} served {} via fallback", self.fallback.name(), symbol);
                Ok(candles)
            }
            Err(fallback_error) => Err(AdapterError::AllSourcesFailed {
                symbol: symbol.clone(),
                primary: Box::new(primary_error),
                fallback: Box::new(fallback_error),
            }),
        }
    }
}
