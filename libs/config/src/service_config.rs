//! Service Configuration Module
//!
//! Loads [`BandwatchConfig`] from compiled defaults, an optional TOML file, and
//! `BANDWATCH_` prefixed environment variables, in that order of precedence.
//! Nested keys use a double underscore: `BANDWATCH_SERVER__PORT=9000`,
//! `BANDWATCH_STRATEGY__SYMBOLS=BTC,ETH`.

use crate::service;
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use types::Symbol;

/// Root configuration for all bandwatch services
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BandwatchConfig {
    pub server: ServerSettings,
    pub exchanges: ExchangeSettings,
    pub cache: CacheSettings,
    pub strategy: StrategySettings,
    pub sms: SmsSettings,
    pub logging: LoggingSettings,
}

/// HTTP gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_address: String,
    pub port: u16,
    /// Attach permissive CORS headers to the data endpoint
    pub enable_cors: bool,
    /// Run the alert check in the background every N seconds
    pub check_interval_secs: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: service::server::BIND_ADDRESS.to_string(),
            port: service::server::PORT,
            enable_cors: true,
            check_interval_secs: None,
        }
    }
}

/// Upstream exchange settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeSettings {
    pub binance_base_url: String,
    pub kraken_base_url: String,
    pub interval: String,
    pub kraken_interval_minutes: u32,
    pub candle_limit: u32,
    pub request_timeout_ms: u64,
}

impl ExchangeSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            binance_base_url: service::exchanges::BINANCE_BASE_URL.to_string(),
            kraken_base_url: service::exchanges::KRAKEN_BASE_URL.to_string(),
            interval: service::exchanges::INTERVAL.to_string(),
            kraken_interval_minutes: service::exchanges::KRAKEN_INTERVAL_MINUTES,
            candle_limit: service::exchanges::CANDLE_LIMIT,
            request_timeout_ms: service::exchanges::REQUEST_TIMEOUT_MS,
        }
    }
}

/// Result cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub ttl_secs: u64,
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: service::cache::TTL_SECS,
        }
    }
}

/// Bollinger alert strategy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySettings {
    /// Symbols checked on every alert run
    pub symbols: Vec<Symbol>,
    /// Symbol served by the data endpoint when none is requested
    pub default_symbol: Symbol,
    pub band_period: usize,
    pub band_width: f64,
    pub buy_threshold: f64,
    pub sell_threshold: f64,
    pub cooldown_secs: u64,
}

impl StrategySettings {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            symbols: service::strategy::SYMBOLS
                .iter()
                .filter_map(|s| Symbol::parse(s).ok())
                .collect(),
            default_symbol: Symbol::parse(service::strategy::DEFAULT_SYMBOL)
                .expect("default symbol is a valid ticker"),
            band_period: service::strategy::BAND_PERIOD,
            band_width: service::strategy::BAND_WIDTH,
            buy_threshold: service::strategy::BUY_THRESHOLD,
            sell_threshold: service::strategy::SELL_THRESHOLD,
            cooldown_secs: service::strategy::COOLDOWN_SECS,
        }
    }
}

/// SMS provider settings (credentials are secrets, see [`crate::secrets`])
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsSettings {
    pub api_base_url: String,
}

impl Default for SmsSettings {
    fn default() -> Self {
        Self {
            api_base_url: service::sms::API_BASE_URL.to_string(),
        }
    }
}

/// Logging settings, overridden by `RUST_LOG` when set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl BandwatchConfig {
    /// Load configuration from an optional file with process environment overrides.
    ///
    /// Without an explicit path, `BANDWATCH_CONFIG` and then
    /// `config/bandwatch.toml` are tried; a missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    /// Load with a caller-supplied environment source
    pub fn load_with_env(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

        if path.exists() {
            info!("Loading configuration file: {:?}", path);
        } else {
            debug!("Configuration file {:?} not found, using defaults", path);
        }

        let config: BandwatchConfig = Config::builder()
            .add_source(File::from(path.as_path()).required(false))
            .add_source(environment)
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Environment source for `BANDWATCH_SECTION__KEY` overrides
    pub fn environment() -> Environment {
        Environment::with_prefix(service::env::PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("strategy.symbols")
            .try_parsing(true)
    }

    /// Reject configurations the strategy cannot run with
    pub fn validate(&self) -> Result<()> {
        let strategy = &self.strategy;
        if strategy.symbols.is_empty() {
            bail!("strategy.symbols must list at least one symbol");
        }
        if strategy.band_period == 0 {
            bail!("strategy.band_period must be positive");
        }
        if !strategy.band_width.is_finite() || strategy.band_width <= 0.0 {
            bail!("strategy.band_width must be a positive number");
        }
        if strategy.buy_threshold >= strategy.sell_threshold {
            bail!(
                "strategy.buy_threshold ({}) must be below strategy.sell_threshold ({})",
                strategy.buy_threshold,
                strategy.sell_threshold
            );
        }
        if self.exchanges.request_timeout_ms == 0 {
            bail!("exchanges.request_timeout_ms must be positive");
        }
        if self.exchanges.candle_limit == 0 {
            bail!("exchanges.candle_limit must be positive");
        }
        Ok(())
    }
}

fn default_config_path() -> PathBuf {
    std::env::var(service::env::CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(service::env::DEFAULT_CONFIG_PATH))
}
