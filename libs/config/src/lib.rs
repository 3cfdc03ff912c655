//! # Bandwatch Configuration
//!
//! Centralized configuration for the bandwatch services.
//!
//! - **Defaults**: every section has compiled-in defaults ([`service`])
//! - **Layering**: optional TOML file, then `BANDWATCH_` environment overrides
//! - **Secrets**: SMS credentials resolved from the process environment at call time
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bandwatch_config::BandwatchConfig;
//!
//! let config = BandwatchConfig::load(None).unwrap();
//! println!("tracking {} symbols", config.strategy.symbols.len());
//! ```

pub mod secrets;
pub mod service;
pub mod service_config;

pub use secrets::{SecretError, SmsCredentials};
pub use service_config::{
    BandwatchConfig, CacheSettings, ExchangeSettings, LoggingSettings, ServerSettings,
    SmsSettings, StrategySettings,
};
