//! Service defaults
//!
//! Default values shared by the configuration sections and the services that
//! read them.

/// Upstream exchange defaults
pub mod exchanges {
    pub const BINANCE_BASE_URL: &str = "https://api.binance.com";
    pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com";

    /// Binance kline interval
    pub const INTERVAL: &str = "1h";

    /// Kraken OHLC interval in minutes (same hourly candles)
    pub const KRAKEN_INTERVAL_MINUTES: u32 = 60;

    /// Candles requested per fetch
    pub const CANDLE_LIMIT: u32 = 100;

    /// Per-request timeout (milliseconds)
    pub const REQUEST_TIMEOUT_MS: u64 = 10_000;
}

/// Result cache defaults
pub mod cache {
    /// Freshness window for cached candles (2 minutes)
    pub const TTL_SECS: u64 = 120;
}

/// Bollinger alert strategy defaults
pub mod strategy {
    pub const SYMBOLS: [&str; 4] = ["BTC", "ETH", "SOL", "ZEC"];
    pub const DEFAULT_SYMBOL: &str = "BTC";
    pub const BAND_PERIOD: usize = 20;
    pub const BAND_WIDTH: f64 = 2.0;

    /// Band positions at or below this percentage signal STRONG BUY
    pub const BUY_THRESHOLD: f64 = 5.0;

    /// Band positions at or above this percentage signal STRONG SELL
    pub const SELL_THRESHOLD: f64 = 95.0;

    /// Minimum gap between repeat alerts for the same symbol and action (1 hour)
    pub const COOLDOWN_SECS: u64 = 3_600;
}

/// HTTP gateway defaults
pub mod server {
    pub const BIND_ADDRESS: &str = "127.0.0.1";
    pub const PORT: u16 = 8888;
}

/// SMS provider defaults
pub mod sms {
    pub const API_BASE_URL: &str = "https://api.twilio.com";
}

/// Environment variable names
pub mod env {
    /// Prefix for configuration overrides, e.g. `BANDWATCH_SERVER__PORT`
    pub const PREFIX: &str = "BANDWATCH";

    /// Alternate way to point at the configuration file
    pub const CONFIG_PATH: &str = "BANDWATCH_CONFIG";

    pub const DEFAULT_CONFIG_PATH: &str = "config/bandwatch.toml";
}
