//! Long-lived service state shared by every request

use adapter_service::{CandleCache, CandleSource, FallbackCandleSource};
use anyhow::{Context, Result};
use bandwatch_config::BandwatchConfig;
use bollinger_alerts_strategy::{AlertChecker, StrategyConfig};
use message_sink::{NotificationSink, SmsSink};
use std::sync::Arc;
use std::time::Instant;
use types::{Clock, Symbol, SystemClock};

pub const SERVICE_NAME: &str = "bandwatch";

/// Fetcher, cache and alert checker owned by one gateway instance
pub struct AppState {
    pub default_symbol: Symbol,
    pub enable_cors: bool,
    pub source: Arc<dyn CandleSource>,
    pub cache: CandleCache,
    pub checker: Arc<AlertChecker>,
    started: Instant,
}

impl AppState {
    pub fn new(
        config: &BandwatchConfig,
        source: Arc<dyn CandleSource>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let cache = CandleCache::new(config.cache.ttl(), clock.clone());
        let checker = AlertChecker::new(
            StrategyConfig::from(&config.strategy),
            source.clone(),
            sink,
            clock,
        )
        .context("Invalid strategy configuration")?;

        Ok(Self {
            default_symbol: config.strategy.default_symbol.clone(),
            enable_cors: config.server.enable_cors,
            source,
            cache,
            checker: Arc::new(checker),
            started: Instant::now(),
        })
    }

    /// Production wiring: Binance with Kraken fallback, SMS sink, wall clock
    pub fn from_config(config: &BandwatchConfig) -> Result<Self> {
        let source = FallbackCandleSource::from_settings(&config.exchanges)
            .context("Failed to create candle source")?;
        let sink = SmsSink::new(config.sms.api_base_url.clone(), config.exchanges.request_timeout())
            .context("Failed to create SMS sink")?;

        Self::new(config, Arc::new(source), Arc::new(sink), Arc::new(SystemClock))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
