//! OHLCV candle normalized to the primary exchange's kline shape

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One fixed-interval candle.
///
/// On the wire a candle is the six-element tuple
/// `[open_time, "open", "high", "low", "close", "volume"]`: the open time as a
/// millisecond number and every price/volume column as a decimal string. This
/// matches the first six columns of a Binance kline so front ends can treat
/// primary and fallback data identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CandleRow", into = "CandleRow")]
pub struct Candle {
    /// Candle open time, Unix milliseconds
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Candle {
    pub fn new(
        open_time: i64,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Closing price as `f64` for indicator math
    pub fn close_f64(&self) -> Option<f64> {
        self.close.to_f64()
    }
}

/// Closing prices of a chronologically ordered candle sequence, oldest first.
///
/// Closes that cannot be represented as `f64` are skipped.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().filter_map(Candle::close_f64).collect()
}

#[derive(Serialize, Deserialize)]
struct CandleRow(i64, Decimal, Decimal, Decimal, Decimal, Decimal);

impl From<CandleRow> for Candle {
    fn from(row: CandleRow) -> Self {
        Candle::new(row.0, row.1, row.2, row.3, row.4, row.5)
    }
}

impl From<Candle> for CandleRow {
    fn from(c: Candle) -> Self {
        CandleRow(c.open_time, c.open, c.high, c.low, c.close, c.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Candle {
        Candle::new(
            1_700_000_000_000,
            dec!(37000.10),
            dec!(37250.00),
            dec!(36900.55),
            dec!(37100.25),
            dec!(812.4431),
        )
    }

    #[test]
    fn test_serializes_as_kline_tuple() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"[1700000000000,"37000.10","37250.00","36900.55","37100.25","812.4431"]"#
        );
    }

    #[test]
    fn test_deserializes_strings_and_numbers() {
        let candle: Candle =
            serde_json::from_str(r#"[1700000000000,"1.5","2","1",1.75,"10"]"#).unwrap();
        assert_eq!(candle.open, dec!(1.5));
        assert_eq!(candle.close, dec!(1.75));
        assert_eq!(candle.volume, dec!(10));
    }

    #[test]
    fn test_closes_preserve_order() {
        let mut second = sample();
        second.open_time += 3_600_000;
        second.close = dec!(37200);

        assert_eq!(closes(&[sample(), second]), vec![37100.25, 37200.0]);
        assert!(closes(&[]).is_empty());
    }
}
