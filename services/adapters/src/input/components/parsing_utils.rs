//! Parsing Utilities for Exchange Adapters
//!
//! Exchanges encode candle rows as heterogeneous JSON arrays: timestamps as
//! integers, prices and volumes as decimal strings (occasionally bare
//! numbers). These helpers extract a typed column from such a row with an
//! error that names the venue and the column.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use types::Venue;

use crate::{AdapterError, Result};

/// Read column `index` of `row` as a decimal price or volume
pub fn decimal_at(row: &[Value], index: usize, venue: Venue, field: &str) -> Result<Decimal> {
    match row.get(index) {
        Some(Value::String(s)) => Decimal::from_str(s).map_err(|e| {
            AdapterError::parse(venue, format!("{} '{}' is not a decimal: {}", field, s, e))
        }),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_f64().and_then(Decimal::from_f64))
            .ok_or_else(|| AdapterError::parse(venue, format!("{} {} is out of range", field, n))),
        Some(other) => Err(AdapterError::parse(
            venue,
            format!("{} has unexpected type: {}", field, other),
        )),
        None => Err(AdapterError::parse(
            venue,
            format!("row is missing {} at column {}", field, index),
        )),
    }
}

/// Read column `index` of `row` as an integer timestamp (unit as sent by the venue)
pub fn timestamp_at(row: &[Value], index: usize, venue: Venue) -> Result<i64> {
    let value = row
        .get(index)
        .ok_or_else(|| AdapterError::parse(venue, format!("row is missing timestamp at column {}", index)))?;

    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
        .ok_or_else(|| AdapterError::parse(venue, format!("timestamp {} is not numeric", value)))
}
