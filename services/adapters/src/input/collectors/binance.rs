//! Binance REST kline collector
//!
//! Primary candle source. Requests `GET /api/v3/klines` for the `<SYM>USDT`
//! pair and keeps the first six columns of each kline row.
//!
//! ## Data Format Reference
//!
//! A kline row is a twelve-element array; prices and volumes are decimal
//! strings, times are millisecond integers.

use async_trait::async_trait;
use bandwatch_config::ExchangeSettings;
use serde_json::Value;
use tracing::debug;
use types::{Candle, Symbol, Venue};

use crate::input::components::{decimal_at, timestamp_at};
use crate::input::{CandleSource, HttpConnection};
use crate::{AdapterError, Result};

/// Binance Kline Array Schema
///
/// Format: `[openTime, open, high, low, close, volume, closeTime, ...]`
const BINANCE_KLINE_SCHEMA: &str = r#"
[
  1700000000000,        // Open time (ms)
  "37000.10000000",     // Open
  "37100.00000000",     // High
  "36950.00000000",     // Low
  "37050.00000000",     // Close
  "123.45600000",       // Volume (base asset)
  1700003599999,        // Close time (ms)
  "4570000.00000000",   // Quote asset volume
  1234,                 // Number of trades
  "60.00000000",        // Taker buy base volume
  "2220000.00000000",   // Taker buy quote volume
  "0"                   // Ignore
]
"#;

/// Binance spot kline source
#[derive(Debug, Clone)]
pub struct BinanceCandleSource {
    connection: HttpConnection,
    base_url: String,
    interval: String,
    limit: u32,
}

impl BinanceCandleSource {
    pub fn new(
        connection: HttpConnection,
        base_url: impl Into<String>,
        interval: impl Into<String>,
        limit: u32,
    ) -> Self {
        Self {
            connection,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            interval: interval.into(),
            limit,
        }
    }

    pub fn from_settings(connection: HttpConnection, settings: &ExchangeSettings) -> Self {
        Self::new(
            connection,
            settings.binance_base_url.clone(),
            settings.interval.clone(),
            settings.candle_limit,
        )
    }

    fn klines_url(&self) -> String {
        format!("{}/api/v3/klines", self.base_url)
    }
}

#[async_trait]
impl CandleSource for BinanceCandleSource {
    fn name(&self) -> &str {
        "binance"
    }

    async fn fetch_candles(&self, symbol: &Symbol) -> Result<Vec<Candle>> {
        let query = [
            ("symbol", symbol.binance_pair()),
            ("interval", self.interval.clone()),
            ("limit", self.limit.to_string()),
        ];

        let body = self
            .connection
            .get_json(Venue::Binance, &self.klines_url(), &query)
            .await?;

        let candles = parse_klines(&body)?;
        debug!("Binance returned {} candles for {}", candles.len(), symbol);
        Ok(candles)
    }
}

/// Parse a Binance klines response body into candles, oldest first
pub fn parse_klines(body: &Value) -> Result<Vec<Candle>> {
    let rows = body
        .as_array()
        .ok_or_else(|| AdapterError::parse(Venue::Binance, "klines response is not an array"))?;

    rows.iter().map(parse_kline_row).collect()
}

fn parse_kline_row(row: &Value) -> Result<Candle> {
    let venue = Venue::Binance;
    let row = row
        .as_array()
        .ok_or_else(|| AdapterError::parse(venue, "kline row is not an array"))?;

    if row.len() < 6 {
        return Err(AdapterError::parse(
            venue,
            format!("kline row has {} columns, expected at least 6", row.len()),
        ));
    }

    Ok(Candle::new(
        timestamp_at(row, 0, venue)?,
        decimal_at(row, 1, venue, "open")?,
        decimal_at(row, 2, venue, "high")?,
        decimal_at(row, 3, venue, "low")?,
        decimal_at(row, 4, venue, "close")?,
        decimal_at(row, 5, venue, "volume")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::time::Duration;

    fn kline(open_time: i64, close: &str) -> Value {
        json!([
            open_time, "100.0", "110.0", "90.0", close, "12.5",
            open_time + 3_599_999, "1250.0", 42, "6.0", "600.0", "0"
        ])
    }

    fn source(base_url: String) -> BinanceCandleSource {
        let connection = HttpConnection::new(Duration::from_secs(5)).unwrap();
        BinanceCandleSource::new(connection, base_url, "1h", 100)
    }

    #[test]
    fn test_parse_keeps_first_six_columns() {
        let body = json!([kline(1_700_000_000_000, "105.5")]);
        let candles = parse_klines(&body).unwrap();

        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].open_time, 1_700_000_000_000);
        assert_eq!(candles[0].close, dec!(105.5));
        assert_eq!(candles[0].volume, dec!(12.5));
    }

    #[test]
    fn test_parse_rejects_short_rows_and_objects() {
        assert!(parse_klines(&json!([[1, "1", "2"]])).is_err());
        assert!(parse_klines(&json!({"code": -1121, "msg": "Invalid symbol."})).is_err());
    }

    #[tokio::test]
    async fn test_fetch_requests_usdt_pair() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v3/klines")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("symbol".into(), "ETHUSDT".into()),
                Matcher::UrlEncoded("interval".into(), "1h".into()),
                Matcher::UrlEncoded("limit".into(), "100".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([kline(1, "1.0"), kline(2, "2.0")]).to_string())
            .create_async()
            .await;

        let candles = source(server.url())
            .fetch_candles(&Symbol::parse("eth").unwrap())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].close, dec!(2.0));
    }

    #[tokio::test]
    async fn test_geo_block_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v3/klines")
            .match_query(Matcher::Any)
            .with_status(451)
            .create_async()
            .await;

        let err = source(server.url())
            .fetch_candles(&Symbol::parse("BTC").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AdapterError::UpstreamStatus {
                venue: Venue::Binance,
                status: 451
            }
        ));
    }
}
