//! Identifier validation shared across services

pub mod errors;
pub mod identifiers;
