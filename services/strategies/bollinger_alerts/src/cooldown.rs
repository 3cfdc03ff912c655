//! Alert deduplication
//!
//! Remembers when each (symbol, action) pair last produced a notification and
//! suppresses repeats inside the cooldown window. Entries are never evicted;
//! the key space is bounded by the configured symbols times two actions.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use types::{Clock, Symbol};

use crate::signals::SignalAction;

pub struct AlertDeduplicator {
    last_sent: Mutex<HashMap<(Symbol, SignalAction), u64>>,
    cooldown_ms: u64,
    clock: Arc<dyn Clock>,
}

impl AlertDeduplicator {
    pub fn new(cooldown: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            last_sent: Mutex::new(HashMap::new()),
            cooldown_ms: cooldown.as_millis() as u64,
            clock,
        }
    }

    /// Decide whether to notify and, if so, record `now_ms` for the pair.
    ///
    /// Returns false without recording while less than the cooldown has
    /// elapsed since the last recorded notification.
    pub fn should_notify(&self, symbol: &Symbol, action: SignalAction, now_ms: u64) -> bool {
        let mut last_sent = self.last_sent.lock();
        let key = (symbol.clone(), action);

        if let Some(&previous) = last_sent.get(&key) {
            if now_ms.saturating_sub(previous) < self.cooldown_ms {
                debug!("{} {} still in cooldown", symbol, action);
                return false;
            }
        }

        last_sent.insert(key, now_ms);
        true
    }

    /// [`Self::should_notify`] at the current clock time
    pub fn should_notify_now(&self, symbol: &Symbol, action: SignalAction) -> bool {
        self.should_notify(symbol, action, self.clock.now_ms())
    }

    /// Time of the last recorded notification for the pair
    pub fn last_notified(&self, symbol: &Symbol, action: SignalAction) -> Option<u64> {
        self.last_sent.lock().get(&(symbol.clone(), action)).copied()
    }

    pub fn len(&self) -> usize {
        self.last_sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_sent.lock().is_empty()
    }
}

impl std::fmt::Debug for AlertDeduplicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertDeduplicator")
            .field("cooldown_ms", &self.cooldown_ms)
            .field("entries", &self.len())
            .finish()
    }
}
