//! Validated base-asset symbols
//!
//! Symbols arrive from query strings and configuration and end up inside
//! upstream URLs (`<SYM>USDT`, `<SYM>USD`), so they are restricted to short
//! upper-case alphanumeric tickers at the boundary.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MIN_SYMBOL_LEN: usize = 2;
const MAX_SYMBOL_LEN: usize = 10;

/// Upper-case base asset ticker such as `BTC`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a ticker: trims whitespace and upper-cases.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();
        let valid_len = (MIN_SYMBOL_LEN..=MAX_SYMBOL_LEN).contains(&normalized.len());
        if !valid_len || !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidSymbol {
                input: input.to_string(),
            });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Binance spot pair quoted in USDT
    pub fn binance_pair(&self) -> String {
        format!("{}USDT", self.0)
    }

    /// Kraken pair quoted in USD
    pub fn kraken_pair(&self) -> String {
        format!("{}USD", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
