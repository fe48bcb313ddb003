//! MarketFeed: turns a data source into market snapshots.
//!
//! # Responsibilities
//! - Fetch price and daily bars over a calendar lookback window
//! - Estimate the ATR from those bars
//! - Serve recent complete snapshots from the TTL cache
//!
//! # Non-Responsibilities
//! - Failure reporting to the caller: every source or estimator error is
//!   logged and collapses into an unavailable reading
//! - Risk computation (see [`crate::risk`])

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use tracing::{debug, warn};

use super::cache::SnapshotCache;
use super::provider::MarketDataSource;
use crate::domain::MarketSnapshot;
use crate::indicators::VolatilityEstimator;

/// Calendar days of history requested per lookup. Covers the 15 trading days
/// a 14-period ATR needs, with room for weekends and exchange holidays.
pub const DEFAULT_HISTORY_DAYS: u32 = 42;

pub struct MarketFeed {
    source: Arc<dyn MarketDataSource>,
    estimator: VolatilityEstimator,
    cache: SnapshotCache,
    history_days: u32,
}

impl MarketFeed {
    /// Feed with a 14-period estimator, no cache and the default lookback.
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self {
            source,
            estimator: VolatilityEstimator::default(),
            cache: SnapshotCache::disabled(),
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }

    pub fn with_estimator(mut self, estimator: VolatilityEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_cache(mut self, cache: SnapshotCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn estimator(&self) -> &VolatilityEstimator {
        &self.estimator
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Current snapshot for `symbol`, as of today (UTC).
    pub fn snapshot(&self, symbol: &str) -> MarketSnapshot {
        self.snapshot_as_of(symbol, Utc::now().date_naive())
    }

    /// Snapshot using history that ends on `as_of`. Never fails: missing
    /// pieces come back as unavailable.
    pub fn snapshot_as_of(&self, symbol: &str, as_of: NaiveDate) -> MarketSnapshot {
        if let Some(hit) = self.cache.get(symbol, as_of) {
            debug!(symbol, "snapshot cache hit");
            return hit;
        }
        debug!(symbol, "snapshot cache miss");

        if !self.source.is_available() {
            warn!(symbol, source = self.source.name(), "market data source unavailable");
            return MarketSnapshot::unavailable(symbol);
        }

        let start = as_of
            .checked_sub_days(Days::new(u64::from(self.history_days)))
            .unwrap_or(NaiveDate::MIN);

        let fetched = match self.source.fetch(symbol, start, as_of) {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(symbol, source = self.source.name(), error = %e, "market data fetch failed");
                return MarketSnapshot::unavailable(symbol);
            }
        };

        let price = fetched.current_price();
        if price.is_none() {
            warn!(symbol, "no current price in market data");
        }

        let atr = match self.estimator.estimate(&fetched.bars) {
            Ok(atr) => Some(atr),
            Err(e) => {
                warn!(symbol, error = %e, "ATR unavailable");
                None
            }
        };

        let snapshot = MarketSnapshot::new(symbol, price, atr);
        self.cache.put(&snapshot, as_of);
        snapshot
    }
}

impl std::fmt::Debug for MarketFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketFeed")
            .field("source", &self.source.name())
            .field("estimator", &self.estimator)
            .field("cache_ttl", &self.cache.ttl())
            .field("history_days", &self.history_days)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataError, StaticSource};
    use crate::domain::Bar;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
    }

    /// `n` consecutive daily bars ending on `as_of`, each with a range of 2.
    fn daily_bars(n: u64) -> Vec<Bar> {
        (0..n)
            .rev()
            .map(|back| {
                let date = as_of().checked_sub_days(Days::new(back)).unwrap();
                Bar::new(date, 100.0, 101.0, 99.0, 100.0, 1_000)
            })
            .collect()
    }

    #[test]
    fn complete_snapshot() {
        let source = StaticSource::new().with_data("ES=F", Some(5000.0), daily_bars(20));
        let feed = MarketFeed::new(Arc::new(source));
        let snap = feed.snapshot_as_of("ES=F", as_of());
        assert_eq!(snap.price(), Some(5000.0));
        assert_eq!(snap.atr(), Some(2.0));
    }

    #[test]
    fn price_falls_back_to_last_close() {
        let source = StaticSource::new().with_data("ES=F", None, daily_bars(20));
        let feed = MarketFeed::new(Arc::new(source));
        assert_eq!(feed.snapshot_as_of("ES=F", as_of()).price(), Some(100.0));
    }

    #[test]
    fn short_history_leaves_atr_unavailable() {
        let source = StaticSource::new().with_data("ES=F", Some(5000.0), daily_bars(14));
        let feed = MarketFeed::new(Arc::new(source));
        let snap = feed.snapshot_as_of("ES=F", as_of());
        assert_eq!(snap.price(), Some(5000.0));
        assert_eq!(snap.atr(), None);
    }

    #[test]
    fn bars_outside_lookback_are_not_requested() {
        let source = StaticSource::new().with_data("ES=F", Some(5000.0), daily_bars(20));
        let feed = MarketFeed::new(Arc::new(source)).with_history_days(10);
        assert_eq!(feed.snapshot_as_of("ES=F", as_of()).atr(), None);
    }

    #[test]
    fn source_error_is_unavailable() {
        let source = StaticSource::new().with_error("ES=F", DataError::CircuitBreakerTripped);
        let feed = MarketFeed::new(Arc::new(source));
        assert_eq!(
            feed.snapshot_as_of("ES=F", as_of()),
            MarketSnapshot::unavailable("ES=F")
        );
    }

    #[test]
    fn unavailable_source_is_not_called() {
        let source = StaticSource::new()
            .with_data("ES=F", Some(5000.0), daily_bars(20))
            .unavailable();
        let feed = MarketFeed::new(Arc::new(source));
        assert!(!feed.snapshot_as_of("ES=F", as_of()).is_complete());
    }

    #[test]
    fn shorter_period_needs_fewer_bars() {
        let source = StaticSource::new().with_data("ES=F", Some(5000.0), daily_bars(6));
        let feed = MarketFeed::new(Arc::new(source))
            .with_estimator(VolatilityEstimator::new(5).unwrap());
        assert_eq!(feed.snapshot_as_of("ES=F", as_of()).atr(), Some(2.0));
    }
}
