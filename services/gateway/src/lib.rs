//! # Bandwatch Gateway
//!
//! HTTP front of the bandwatch services:
//!
//! - `/crypto-data?symbol=SYM` - hourly candles for a front end, served from a
//!   two-minute cache with Binance→Kraken fallback
//! - `/check-alerts` - runs the Bollinger alert check over all configured
//!   symbols and returns the report
//! - `/health` - liveness and cache counters
//!
//! Both function paths are also served under `/.netlify/functions/` so an
//! existing front end can point at this service unchanged.

pub mod handlers;
pub mod logging;
pub mod server;
pub mod state;

pub use handlers::handle_request;
pub use server::{spawn_periodic_check, GatewayServer};
pub use state::AppState;
