//! Short-lived in-memory cache of market snapshots.
//!
//! Only complete snapshots are stored, so a transient outage is retried on the
//! next lookup instead of being remembered for a whole TTL. The cache never
//! changes a value: a hit returns exactly what the source produced.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::domain::MarketSnapshot;

/// Symbol plus the date the snapshot's history ends on.
type CacheKey = (String, NaiveDate);

#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: MarketSnapshot,
    expires_at: Instant,
}

/// Thread-safe TTL cache keyed by symbol and as-of date. A TTL of zero disables it.
#[derive(Debug)]
pub struct SnapshotCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached snapshot for `symbol` as of `as_of`, if present and not expired.
    pub fn get(&self, symbol: &str, as_of: NaiveDate) -> Option<MarketSnapshot> {
        if !self.is_enabled() {
            return None;
        }
        let now = Instant::now();
        self.lock()
            .get(&(symbol.to_string(), as_of))
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.snapshot.clone())
    }

    /// Store a snapshot computed from history ending on `as_of`. Incomplete
    /// snapshots and a disabled cache are no-ops.
    pub fn put(&self, snapshot: &MarketSnapshot, as_of: NaiveDate) {
        if !self.is_enabled() || !snapshot.is_complete() {
            return;
        }
        let entry = CacheEntry {
            snapshot: snapshot.clone(),
            expires_at: Instant::now() + self.ttl,
        };
        self.lock().insert((snapshot.symbol.clone(), as_of), entry);
    }

    /// Drop every expired entry.
    pub fn clear_expired(&self) {
        let now = Instant::now();
        self.lock().retain(|_, entry| entry.expires_at > now);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, expired ones included until cleared.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
