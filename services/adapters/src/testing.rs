//! Test doubles for candle sources
//!
//! Used by this crate's tests and by downstream services that need a
//! deterministic [`CandleSource`] without network access.

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use types::{Candle, Symbol, Venue};

use crate::input::CandleSource;
use crate::{AdapterError, Result};

type ErrorFactory = fn() -> AdapterError;

enum Canned {
    Candles(Vec<Candle>),
    Error(ErrorFactory),
}

/// Candle source answering from a fixed per-symbol table.
///
/// Symbols with no entry fail with a parse error naming the symbol.
pub struct StaticCandleSource {
    name: String,
    responses: Mutex<HashMap<Symbol, Canned>>,
    calls: AtomicU64,
}

impl StaticCandleSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: Mutex::new(HashMap::new()),
            calls: AtomicU64::new(0),
        }
    }

    pub fn with_candles(self, symbol: Symbol, candles: Vec<Candle>) -> Self {
        self.set_candles(symbol, candles);
        self
    }

    pub fn with_error(self, symbol: Symbol, error: ErrorFactory) -> Self {
        self.responses.lock().insert(symbol, Canned::Error(error));
        self
    }

    /// Replace the canned answer for `symbol`
    pub fn set_candles(&self, symbol: Symbol, candles: Vec<Candle>) {
        self.responses.lock().insert(symbol, Canned::Candles(candles));
    }

    /// Number of fetches served, successful or not
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandleSource for StaticCandleSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_candles(&self, symbol: &Symbol) -> Result<Vec<Candle>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().get(symbol) {
            Some(Canned::Candles(candles)) => Ok(candles.clone()),
            Some(Canned::Error(make)) => Err(make()),
            None => Err(AdapterError::parse(
                Venue::Binance,
                format!("no canned candles for {}", symbol),
            )),
        }
    }
}

/// Hourly candles whose open, high, low and close all equal the given closes
pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let price = Decimal::from_f64(*close).unwrap_or_default();
            Candle::new(
                i as i64 * 3_600_000,
                price,
                price,
                price,
                price,
                Decimal::ONE,
            )
        })
        .collect()
}
