//! Alert checking pipeline
//!
//! For every configured symbol, concurrently: fetch candles, compute the band
//! and the latest close's position in it, classify, apply the cooldown, then
//! format and send a notification. Each symbol ends in a typed
//! [`SymbolOutcome`]; a failure for one symbol never affects the others.

use adapter_service::CandleSource;
use futures::future::join_all;
use message_sink::{Notification, NotificationSink};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use types::{closes, Candle, Clock, Symbol};

use crate::config::StrategyConfig;
use crate::cooldown::AlertDeduplicator;
use crate::error::Result;
use crate::indicators::{compute_band, compute_position, Band};
use crate::message::format_alert;
use crate::signals::{classify, Signal, SignalAction};

pub const REPORT_MESSAGE: &str = "Alert check completed";

/// Indicator state for one symbol at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Closes available to the indicator
    pub closes: usize,
    pub band: Option<Band>,
    /// Latest close
    pub price: Option<Decimal>,
    pub position: Option<f64>,
    pub signal: Signal,
}

/// An alert that passed the cooldown and was handed to the sink
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub symbol: Symbol,
    pub signal: SignalAction,
    pub price: f64,
    pub confidence: f64,
    pub position: f64,
    /// Whether the sink accepted the notification
    pub delivered: bool,
}

/// Result of checking a single symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SymbolOutcome {
    Alerted(AlertRecord),
    NoSignal { position: Option<f64> },
    InsufficientData { candles: usize },
    Suppressed { action: SignalAction },
    Failed { error: String },
}

/// One entry of [`AlertReport::outcomes`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolCheck {
    pub symbol: Symbol,
    #[serde(flatten)]
    pub outcome: SymbolOutcome,
}

/// Aggregate result of a full alert run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertReport {
    pub message: String,
    pub alerts_sent: usize,
    pub alerts: Vec<AlertRecord>,
    pub outcomes: Vec<SymbolCheck>,
}

impl AlertReport {
    pub fn from_checks(outcomes: Vec<SymbolCheck>) -> Self {
        let alerts: Vec<AlertRecord> = outcomes
            .iter()
            .filter_map(|check| match &check.outcome {
                SymbolOutcome::Alerted(record) => Some(record.clone()),
                _ => None,
            })
            .collect();

        Self {
            message: REPORT_MESSAGE.to_string(),
            alerts_sent: alerts.len(),
            alerts,
            outcomes,
        }
    }

    /// Symbols whose fetch failed
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|check| matches!(check.outcome, SymbolOutcome::Failed { .. }))
            .count()
    }
}

/// Runs the Bollinger alert pipeline over the configured symbols
pub struct AlertChecker {
    config: StrategyConfig,
    source: Arc<dyn CandleSource>,
    sink: Arc<dyn NotificationSink>,
    deduplicator: AlertDeduplicator,
}

impl AlertChecker {
    pub fn new(
        config: StrategyConfig,
        source: Arc<dyn CandleSource>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        let deduplicator = AlertDeduplicator::new(config.cooldown, clock);
        Ok(Self {
            config,
            source,
            sink,
            deduplicator,
        })
    }

    /// Compute band, position and signal for the latest close. No side effects.
    pub fn evaluate(&self, candles: &[Candle]) -> Evaluation {
        let closes = closes(candles);
        let band = compute_band(&closes, self.config.band_period, self.config.band_width);
        let price = candles.last().map(|c| c.close);
        let position = closes
            .last()
            .and_then(|&last| compute_position(last, band.as_ref()));
        let signal = classify(position, &self.config.thresholds);

        Evaluation {
            closes: closes.len(),
            band,
            price,
            position,
            signal,
        }
    }

    /// Run the full pipeline for one symbol
    pub async fn check_symbol(&self, symbol: &Symbol) -> SymbolOutcome {
        let candles = match self.source.fetch_candles(symbol).await {
            Ok(candles) => candles,
            Err(e) => {
                warn!(
                    "Error checking {}: {} (recoverable: {})",
                    symbol,
                    e,
                    e.is_recoverable()
                );
                return SymbolOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let evaluation = self.evaluate(&candles);
        if evaluation.band.is_none() {
            debug!(
                "{}: {} closes, need {} for a band",
                symbol, evaluation.closes, self.config.band_period
            );
            return SymbolOutcome::InsufficientData {
                candles: evaluation.closes,
            };
        }

        let (action, confidence, position, price) = match (
            evaluation.signal.action(),
            evaluation.signal.confidence(),
            evaluation.position,
            evaluation.price,
        ) {
            (Some(action), Some(confidence), Some(position), Some(price)) => {
                (action, confidence, position, price)
            }
            _ => {
                debug!("{}: no signal at position {:?}", symbol, evaluation.position);
                return SymbolOutcome::NoSignal {
                    position: evaluation.position,
                };
            }
        };

        if !self.deduplicator.should_notify_now(symbol, action) {
            return SymbolOutcome::Suppressed { action };
        }

        let body = format_alert(symbol, action, price, confidence, position);
        let delivered = self.deliver(symbol, body).await;

        info!(
            "{} {} at {} (confidence {:.0}%, position {:.1}%, delivered: {})",
            symbol, action, price, confidence, position, delivered
        );

        SymbolOutcome::Alerted(AlertRecord {
            symbol: symbol.clone(),
            signal: action,
            price: price.to_f64().unwrap_or(f64::NAN),
            confidence,
            position,
            delivered,
        })
    }

    async fn deliver(&self, symbol: &Symbol, body: String) -> bool {
        let notification = match Notification::new(body) {
            Ok(notification) => notification,
            Err(e) => {
                warn!("Could not build notification for {}: {}", symbol, e);
                return false;
            }
        };

        match self.sink.send(&notification).await {
            Ok(()) => true,
            Err(e) => {
                warn!("{} sink failed for {}: {}", self.sink.name(), symbol, e);
                false
            }
        }
    }

    /// Check every configured symbol concurrently and aggregate the outcomes
    pub async fn check_all(&self) -> AlertReport {
        let checks = self.config.symbols.iter().map(|symbol| async move {
            SymbolCheck {
                symbol: symbol.clone(),
                outcome: self.check_symbol(symbol).await,
            }
        });

        let report = AlertReport::from_checks(join_all(checks).await);
        info!(
            "Alert check completed: {} sent, {} of {} symbols failed",
            report.alerts_sent,
            report.failed(),
            report.outcomes.len()
        );
        report
    }
}

impl std::fmt::Debug for AlertChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertChecker")
            .field("config", &self.config)
            .field("source", &self.source.name())
            .field("sink", &self.sink.name())
            .field("deduplicator", &self.deduplicator)
            .finish()
    }
}
