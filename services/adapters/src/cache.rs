//! Time-bounded candle cache
//!
//! Keeps the latest successful fetch per symbol. An entry is served while its
//! age is strictly below the TTL; failures are never stored, so a failing
//! upstream is retried on the next request.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use types::{Candle, Clock, Symbol};

use crate::input::CandleSource;
use crate::Result;

#[derive(Debug, Clone)]
struct CacheEntry {
    candles: Vec<Candle>,
    fetched_at_ms: u64,
}

/// Hit/miss counters and current size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Per-symbol candle cache with a fixed freshness window
pub struct CandleCache {
    entries: Mutex<HashMap<Symbol, CacheEntry>>,
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CandleCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl_ms: ttl.as_millis() as u64,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cached candles for `symbol` if younger than the TTL
    pub fn get_fresh(&self, symbol: &Symbol) -> Option<Vec<Candle>> {
        let now = self.clock.now_ms();
        let entries = self.entries.lock();
        entries
            .get(symbol)
            .filter(|entry| now.saturating_sub(entry.fetched_at_ms) < self.ttl_ms)
            .map(|entry| entry.candles.clone())
    }

    /// Store a successful fetch, stamped with the current time
    pub fn insert(&self, symbol: Symbol, candles: Vec<Candle>) {
        let fetched_at_ms = self.clock.now_ms();
        self.entries.lock().insert(
            symbol,
            CacheEntry {
                candles,
                fetched_at_ms,
            },
        );
    }

    /// Serve from cache, or fetch from `source` and cache the result.
    ///
    /// Concurrent misses for one symbol may each fetch; the last write wins.
    pub async fn get_or_fetch(&self, symbol: &Symbol, source: &dyn CandleSource) -> Result<Vec<Candle>> {
        if let Some(candles) = self.get_fresh(symbol) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit for {}", symbol);
            return Ok(candles);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for {}, fetching from {}", symbol, source.name());

        let candles = source.fetch_candles(symbol).await?;
        self.insert(symbol.clone(), candles.clone());
        Ok(candles)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for CandleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandleCache")
            .field("ttl_ms", &self.ttl_ms)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{candles_from_closes, StaticCandleSource};
    use crate::AdapterError;
    use types::{ManualClock, Venue};

    const TTL: Duration = Duration::from_secs(120);

    fn btc() -> Symbol {
        Symbol::parse("BTC").unwrap()
    }

    fn setup() -> (Arc<ManualClock>, CandleCache) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let cache = CandleCache::new(TTL, clock.clone());
        (clock, cache)
    }

    #[tokio::test]
    async fn test_fresh_entry_is_served_without_fetch() {
        let (clock, cache) = setup();
        let source = StaticCandleSource::new("static").with_candles(btc(), candles_from_closes(&[1.0]));

        cache.get_or_fetch(&btc(), &source).await.unwrap();
        clock.advance_ms(119_999);
        cache.get_or_fetch(&btc(), &source).await.unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(cache.stats(), CacheStats { entries: 1, hits: 1, misses: 1 });
    }

    #[tokio::test]
    async fn test_entry_expires_at_ttl() {
        let (clock, cache) = setup();
        let source = StaticCandleSource::new("static").with_candles(btc(), candles_from_closes(&[1.0]));

        cache.get_or_fetch(&btc(), &source).await.unwrap();
        clock.advance_ms(120_000);
        assert!(cache.get_fresh(&btc()).is_none());

        source.set_candles(btc(), candles_from_closes(&[2.0]));
        let candles = cache.get_or_fetch(&btc(), &source).await.unwrap();

        assert_eq!(source.calls(), 2);
        assert_eq!(candles, candles_from_closes(&[2.0]));
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (_clock, cache) = setup();
        let source = StaticCandleSource::new("static").with_error(btc(), || AdapterError::ConnectionTimeout {
            venue: Venue::Binance,
            timeout_ms: 10_000,
        });

        assert!(cache.get_or_fetch(&btc(), &source).await.is_err());
        assert!(cache.get_or_fetch(&btc(), &source).await.is_err());

        assert_eq!(source.calls(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_lookups_share_one_entry() {
        let (_clock, cache) = setup();
        let cache = Arc::new(cache);
        let source = Arc::new(
            StaticCandleSource::new("static").with_candles(btc(), candles_from_closes(&[1.0, 2.0])),
        );

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let cache = cache.clone();
                let source = source.clone();
                tokio::spawn(async move { cache.get_or_fetch(&btc(), &*source).await })
            })
            .collect();

        for task in tasks {
            let candles = task.await.unwrap().unwrap();
            assert_eq!(candles, candles_from_closes(&[1.0, 2.0]));
        }

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits + stats.misses, 16);
        assert_eq!(source.calls(), stats.misses);
    }

    #[test]
    fn test_symbols_are_cached_independently() {
        let (_clock, cache) = setup();
        cache.insert(btc(), candles_from_closes(&[1.0]));

        assert!(cache.get_fresh(&btc()).is_some());
        assert!(cache.get_fresh(&Symbol::parse("ETH").unwrap()).is_none());
        assert_eq!(cache.len(), 1);
    }
}
