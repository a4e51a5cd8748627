//! Per-key freshness tracking for cached API responses.
//!
//! The tracker only records when each logical cache key was last written. The
//! cached payload itself lives elsewhere.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::clock::{duration_millis, Clock, SystemClock};

/// Time-to-live applied when none is configured.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Cache keys follow the `"<entity-type>_<identifier>"` convention.
pub mod cache_key {
    pub const TOP_GAINERS_LOSERS: &str = "top_gainers_losers";

    pub fn stock_detail(symbol: &str) -> String {
        format!("stock_detail_{symbol}")
    }

    pub fn time_series(symbol: &str) -> String {
        format!("time_series_{symbol}")
    }

    pub fn search(query: &str) -> String {
        format!("search_{query}")
    }
}

/// Cache-management command understood by [`FreshnessTracker::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheAction {
    CheckExpiry(String),
    UpdateTimestamp(String),
    ClearAll,
    ClearKey(String),
}

/// Result of a [`CacheAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Checked { expired: bool },
    Updated,
    Cleared,
}

/// Thread-safe map from cache key to last-write timestamp (ms since epoch).
#[derive(Debug)]
pub struct FreshnessTracker {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    timestamps: Mutex<HashMap<String, i64>>,
}

impl Default for FreshnessTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl FreshnessTracker {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            timestamps: Mutex::new(HashMap::new()),
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A key with no recorded write is always expired.
    pub fn is_expired(&self, key: &str) -> bool {
        let Some(written_at) = self.lock().get(key).copied() else {
            return true;
        };
        let age = self.clock.now_millis().saturating_sub(written_at);
        age > duration_millis(self.ttl)
    }

    pub fn touch(&self, key: &str) {
        let now = self.clock.now_millis();
        self.lock().insert(key.to_owned(), now);
        tracing::debug!(key, written_at = now, "cache key touched");
    }

    pub fn invalidate(&self, key: &str) {
        self.lock().remove(key);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn last_updated(&self, key: &str) -> Option<i64> {
        self.lock().get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn apply(&self, action: CacheAction) -> CacheStatus {
        match action {
            CacheAction::CheckExpiry(key) => CacheStatus::Checked {
                expired: self.is_expired(&key),
            },
            CacheAction::UpdateTimestamp(key) => {
                self.touch(&key);
                CacheStatus::Updated
            }
            CacheAction::ClearAll => {
                self.clear();
                CacheStatus::Cleared
            }
            CacheAction::ClearKey(key) => {
                self.invalidate(&key);
                CacheStatus::Cleared
            }
        }
    }

    // The map only holds plain timestamps, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, i64>> {
        self.timestamps
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
