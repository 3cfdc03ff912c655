//! Kraken REST OHLC collector
//!
//! Fallback candle source. Requests `GET /0/public/OHLC` for the `<SYM>USD`
//! pair and re-shapes each row to the Binance kline layout: seconds become
//! milliseconds and the volume column is taken from index 6.
//!
//! ## Data Format Reference
//!
//! The response envelope is `{"error": [...], "result": {<pair>: rows, "last": n}}`.
//! The pair key is Kraken's internal name (`XXBTZUSD` for `BTCUSD`), so the
//! rows are located as the first array-valued entry of `result`.

use async_trait::async_trait;
use bandwatch_config::ExchangeSettings;
use serde_json::Value;
use tracing::debug;
use types::{Candle, Symbol, Venue};

use crate::input::components::{decimal_at, timestamp_at};
use crate::input::{CandleSource, HttpConnection};
use crate::{AdapterError, Result};

/// Kraken OHLC Row Schema
///
/// Format: `[time, open, high, low, close, vwap, volume, count]`
const KRAKEN_OHLC_SCHEMA: &str = r#"
[
  1700000000,           // Open time (seconds)
  "37000.1",            // Open
  "37100.0",            // High
  "36950.0",            // Low
  "37050.0",            // Close
  "37020.3",            // VWAP
  "12.34567890",        // Volume
  321                   // Trade count
]
"#;

const VOLUME_COLUMN: usize = 6;

/// Kraken public OHLC source
#[derive(Debug, Clone)]
pub struct KrakenCandleSource {
    connection: HttpConnection,
    base_url: String,
    interval_minutes: u32,
}

impl KrakenCandleSource {
    pub fn new(connection: HttpConnection, base_url: impl Into<String>, interval_minutes: u32) -> Self {
        Self {
            connection,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            interval_minutes,
        }
    }

    pub fn from_settings(connection: HttpConnection, settings: &ExchangeSettings) -> Self {
        Self::new(
            connection,
            settings.kraken_base_url.clone(),
            settings.kraken_interval_minutes,
        )
    }

    fn ohlc_url(&self) -> String {
        format!("{}/0/public/OHLC", self.base_url)
    }
}

#[async_trait]
impl CandleSource for KrakenCandleSource {
    fn name(&self) -> &str {
        "kraken"
    }

    async fn fetch_candles(&self, symbol: &Symbol) -> Result<Vec<Candle>> {
        let query = [
            ("pair", symbol.kraken_pair()),
            ("interval", self.interval_minutes.to_string()),
        ];

        let body = self
            .connection
            .get_json(Venue::Kraken, &self.ohlc_url(), &query)
            .await?;

        let candles = parse_ohlc(&body)?;
        debug!("Kraken returned {} candles for {}", candles.len(), symbol);
        Ok(candles)
    }
}

/// Parse a Kraken OHLC response envelope into candles, oldest first
pub fn parse_ohlc(body: &Value) -> Result<Vec<Candle>> {
    let venue = Venue::Kraken;

    if let Some(errors) = body.get("error").and_then(Value::as_array) {
        if !errors.is_empty() {
            let errors = errors
                .iter()
                .map(|e| e.as_str().map(str::to_string).unwrap_or_else(|| e.to_string()))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AdapterError::UpstreamRejected { venue, errors });
        }
    }

    let result = body
        .get("result")
        .and_then(Value::as_object)
        .ok_or_else(|| AdapterError::parse(venue, "response has no result object"))?;

    let rows = result
        .values()
        .find_map(Value::as_array)
        .ok_or_else(|| AdapterError::parse(venue, "result holds no OHLC rows"))?;

    rows.iter().map(parse_ohlc_row).collect()
}

fn parse_ohlc_row(row: &Value) -> Result<Candle> {
    let venue = Venue::Kraken;
    let row = row
        .as_array()
        .ok_or_else(|| AdapterError::parse(venue, "OHLC row is not an array"))?;

    if row.len() <= VOLUME_COLUMN {
        return Err(AdapterError::parse(
            venue,
            format!("OHLC row has {} columns, expected at least 7", row.len()),
        ));
    }

    let open_time_secs = timestamp_at(row, 0, venue)?;

    Ok(Candle::new(
        open_time_secs.saturating_mul(1_000),
        decimal_at(row, 1, venue, "open")?,
        decimal_at(row, 2, venue, "high")?,
        decimal_at(row, 3, venue, "low")?,
        decimal_at(row, 4, venue, "close")?,
        decimal_at(row, VOLUME_COLUMN, venue, "volume")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::time::Duration;

    fn envelope(rows: Value) -> Value {
        json!({
            "error": [],
            "result": { "XXBTZUSD": rows, "last": 1_700_003_600 }
        })
    }

    #[test]
    fn test_rows_are_reshaped_to_kline_layout() {
        let body = envelope(json!([
            [1_700_000_000, "100.0", "110.0", "90.0", "105.0", "101.2", "7.5", 12]
        ]));
        let candles = parse_ohlc(&body).unwrap();

        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].open_time, 1_700_000_000_000);
        assert_eq!(candles[0].close, dec!(105.0));
        // vwap is dropped; volume comes from column 6
        assert_eq!(candles[0].volume, dec!(7.5));
    }

    #[test]
    fn test_error_array_is_rejection() {
        let body = json!({"error": ["EQuery:Unknown asset pair"], "result": {}});
        match parse_ohlc(&body).unwrap_err() {
            AdapterError::UpstreamRejected { errors, .. } => {
                assert_eq!(errors, "EQuery:Unknown asset pair");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_rows_is_parse_error() {
        let body = json!({"error": [], "result": {"last": 1}});
        assert!(matches!(
            parse_ohlc(&body).unwrap_err(),
            AdapterError::ParseError { .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_requests_usd_pair() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/0/public/OHLC")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pair".into(), "SOLUSD".into()),
                Matcher::UrlEncoded("interval".into(), "60".into()),
            ]))
            .with_status(200)
            .with_body(
                envelope(json!([
                    [1, "1", "1", "1", "1", "1", "3", 1],
                    [2, "2", "2", "2", "2", "2", "4", 1]
                ]))
                .to_string(),
            )
            .create_async()
            .await;

        let connection = HttpConnection::new(Duration::from_secs(5)).unwrap();
        let source = KrakenCandleSource::new(connection, server.url(), 60);
        let candles = source
            .fetch_candles(&Symbol::parse("SOL").unwrap())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].open_time, 2_000);
        assert_eq!(candles[1].volume, dec!(4));
    }
}
