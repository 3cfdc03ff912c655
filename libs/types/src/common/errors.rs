//! Validation errors for identifiers received from callers or configuration

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Symbol is empty, too long, or contains non-alphanumeric characters
    #[error("Invalid symbol '{input}': expected 2-10 ASCII letters or digits")]
    InvalidSymbol { input: String },
}
