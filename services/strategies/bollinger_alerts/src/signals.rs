//! Signal definitions and classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence at exactly the threshold
pub const BASE_CONFIDENCE: f64 = 85.0;

/// Confidence gained per percentage point beyond the threshold
pub const CONFIDENCE_PER_POINT: f64 = 3.0;

/// The two actionable signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalAction {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "STRONG SELL")]
    StrongSell,
}

impl SignalAction {
    pub fn label(&self) -> &'static str {
        match self {
            SignalAction::StrongBuy => "STRONG BUY",
            SignalAction::StrongSell => "STRONG SELL",
        }
    }

    /// Color glyph prefixed to notifications
    pub fn glyph(&self) -> &'static str {
        match self {
            SignalAction::StrongBuy => "🟢",
            SignalAction::StrongSell => "🔴",
        }
    }
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of a band position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    None,
    StrongBuy { confidence: f64 },
    StrongSell { confidence: f64 },
}

impl Signal {
    pub fn action(&self) -> Option<SignalAction> {
        match self {
            Signal::None => None,
            Signal::StrongBuy { .. } => Some(SignalAction::StrongBuy),
            Signal::StrongSell { .. } => Some(SignalAction::StrongSell),
        }
    }

    /// Confidence score, at least [`BASE_CONFIDENCE`] for actionable signals
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Signal::None => None,
            Signal::StrongBuy { confidence } | Signal::StrongSell { confidence } => {
                Some(*confidence)
            }
        }
    }

    pub fn is_actionable(&self) -> bool {
        !matches!(self, Signal::None)
    }
}

/// Band positions (percent) at which the strong signals fire, both inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    pub buy: f64,
    pub sell: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            buy: 5.0,
            sell: 95.0,
        }
    }
}

/// Map a band position to a signal.
///
/// At or below `buy`: STRONG BUY with confidence `85 + (buy - position) * 3`.
/// At or above `sell`: STRONG SELL with confidence `85 + (position - sell) * 3`.
/// Anything in between, or no position at all, is [`Signal::None`].
pub fn classify(position: Option<f64>, thresholds: &SignalThresholds) -> Signal {
    let Some(position) = position else {
        return Signal::None;
    };

    if position <= thresholds.buy {
        Signal::StrongBuy {
            confidence: BASE_CONFIDENCE + (thresholds.buy - position) * CONFIDENCE_PER_POINT,
        }
    } else if position >= thresholds.sell {
        Signal::StrongSell {
            confidence: BASE_CONFIDENCE + (position - thresholds.sell) * CONFIDENCE_PER_POINT,
        }
    } else {
        Signal::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_default(position: f64) -> Signal {
        classify(Some(position), &SignalThresholds::default())
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert_eq!(classify_default(5.0), Signal::StrongBuy { confidence: 85.0 });
        assert_eq!(classify_default(95.0), Signal::StrongSell { confidence: 85.0 });
    }

    #[test]
    fn test_extremes_raise_confidence() {
        assert_eq!(classify_default(0.0), Signal::StrongBuy { confidence: 100.0 });
        assert_eq!(classify_default(100.0), Signal::StrongSell { confidence: 100.0 });
        assert_eq!(classify_default(2.5).confidence(), Some(92.5));
    }

    #[test]
    fn test_interior_never_signals() {
        for tenth in 51..950 {
            let position = tenth as f64 / 10.0;
            assert_eq!(classify_default(position), Signal::None, "position {position}");
        }
        assert_eq!(classify(None, &SignalThresholds::default()), Signal::None);
    }

    #[test]
    fn test_edges_always_signal_with_floor_confidence() {
        for tenth in (0..=50).chain(950..=1000) {
            let signal = classify_default(tenth as f64 / 10.0);
            assert!(signal.is_actionable());
            assert!(signal.confidence().unwrap() >= BASE_CONFIDENCE);
        }
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(SignalAction::StrongBuy.to_string(), "STRONG BUY");
        assert_eq!(
            serde_json::to_string(&SignalAction::StrongSell).unwrap(),
            "\"STRONG SELL\""
        );
        assert_eq!(Signal::StrongBuy { confidence: 90.0 }.action(), Some(SignalAction::StrongBuy));
        assert_eq!(Signal::None.action(), None);
    }
}
