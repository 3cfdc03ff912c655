//! Strategy configuration

use bandwatch_config::StrategySettings;
use std::time::Duration;
use types::Symbol;

use crate::error::{Result, StrategyError};
use crate::signals::SignalThresholds;

#[derive(Debug, Clone)]
pub struct StrategyConfig {
    /// Symbols checked on every run
    pub symbols: Vec<Symbol>,

    /// Trailing window of closes the band is computed over
    pub band_period: usize,

    /// Standard deviations between the middle and each outer band
    pub band_width: f64,

    /// Position thresholds (percent) for the two strong signals
    pub thresholds: SignalThresholds,

    /// Minimum time between repeat alerts for the same symbol and action
    pub cooldown: Duration,
}

impl StrategyConfig {
    /// Check invariants the indicator math relies on
    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(StrategyError::Configuration {
                message: "no symbols to check".to_string(),
            });
        }
        if self.band_period == 0 {
            return Err(StrategyError::Configuration {
                message: "band period must be positive".to_string(),
            });
        }
        if !self.band_width.is_finite() || self.band_width <= 0.0 {
            return Err(StrategyError::Configuration {
                message: format!("band width {} must be a positive number", self.band_width),
            });
        }
        if self.thresholds.buy >= self.thresholds.sell {
            return Err(StrategyError::Configuration {
                message: format!(
                    "buy threshold {} must be below sell threshold {}",
                    self.thresholds.buy, self.thresholds.sell
                ),
            });
        }
        Ok(())
    }
}

impl From<&StrategySettings> for StrategyConfig {
    fn from(settings: &StrategySettings) -> Self {
        Self {
            symbols: settings.symbols.clone(),
            band_period: settings.band_period,
            band_width: settings.band_width,
            thresholds: SignalThresholds {
                buy: settings.buy_threshold,
                sell: settings.sell_threshold,
            },
            cooldown: settings.cooldown(),
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::from(&StrategySettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_settings() {
        let config = StrategyConfig::default();
        assert_eq!(config.symbols.len(), 4);
        assert_eq!(config.band_period, 20);
        assert_eq!(config.band_width, 2.0);
        assert_eq!(config.thresholds, SignalThresholds { buy: 5.0, sell: 95.0 });
        assert_eq!(config.cooldown, Duration::from_secs(3_600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = StrategyConfig {
            thresholds: SignalThresholds { buy: 60.0, sell: 40.0 },
            ..StrategyConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StrategyError::Configuration { .. })
        ));
    }
}
