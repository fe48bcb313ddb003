//! Market feed, snapshot cache and reference table over scripted sources.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate, Utc};

use futcalc_core::catalog::ContractCatalog;
use futcalc_core::data::{
    DataError, FetchResult, MarketDataSource, MarketFeed, SnapshotCache, StaticSource,
};
use futcalc_core::domain::{Bar, MarketSnapshot};
use futcalc_core::reference::ReferenceTable;
use futcalc_core::risk::{Direction, RiskEngine, RiskParameters};

/// Wraps a source and counts fetches.
struct CountingSource {
    inner: StaticSource,
    calls: AtomicUsize,
}

impl CountingSource {
    fn new(inner: StaticSource) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MarketDataSource for CountingSource {
    fn name(&self) -> &str {
        "counting"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(symbol, start, end)
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}

/// `n` daily bars ending today, each with high − low = `range` and flat closes.
fn recent_bars(n: u64, close: f64, range: f64) -> Vec<Bar> {
    let today = Utc::now().date_naive();
    (0..n)
        .rev()
        .map(|back| {
            let date = today.checked_sub_days(Days::new(back)).unwrap();
            Bar::new(date, close, close + range / 2.0, close - range / 2.0, close, 500)
        })
        .collect()
}

#[test]
fn feed_snapshot_drives_the_engine() {
    let source = StaticSource::new().with_data("ES=F", Some(5000.0), recent_bars(20, 5000.0, 20.0));
    let feed = MarketFeed::new(Arc::new(source));
    let snap = feed.snapshot("ES=F");
    assert_eq!(snap.price(), Some(5000.0));
    assert_eq!(snap.atr(), Some(20.0));

    let catalog = ContractCatalog::builtin();
    let es = catalog.get("ES=F").unwrap();
    let params = RiskParameters::new(100_000.0, 1.0, 1.0, 1).unwrap();
    let plan = RiskEngine::default().plan(es, &snap, &params, Direction::Long).unwrap();
    assert_eq!(plan.selected_stop.stop_price, 4980.0);
    assert_eq!(plan.sizing.max_contracts_by_risk, 1);
}

#[test]
fn failures_collapse_to_unavailable() {
    let source = StaticSource::new()
        .with_error("CL=F", DataError::Timeout { secs: 10 })
        .with_error("NG=F", DataError::RateLimited { retry_after_secs: 60 })
        .with_data("GC=F", Some(2300.0), recent_bars(5, 2300.0, 10.0));
    let feed = MarketFeed::new(Arc::new(source));

    assert_eq!(feed.snapshot("CL=F"), MarketSnapshot::unavailable("CL=F"));
    assert_eq!(feed.snapshot("NG=F"), MarketSnapshot::unavailable("NG=F"));
    assert_eq!(feed.snapshot("ZZ=F"), MarketSnapshot::unavailable("ZZ=F"));

    let gold = feed.snapshot("GC=F");
    assert_eq!(gold.price(), Some(2300.0));
    assert_eq!(gold.atr(), None);
}

#[test]
fn cache_serves_within_ttl() {
    let source = Arc::new(CountingSource::new(
        StaticSource::new().with_data("ES=F", Some(5000.0), recent_bars(20, 5000.0, 20.0)),
    ));
    let feed =
        MarketFeed::new(source.clone()).with_cache(SnapshotCache::new(Duration::from_secs(60)));

    let first = feed.snapshot("ES=F");
    let second = feed.snapshot("ES=F");
    assert_eq!(first, second);
    assert_eq!(source.calls(), 1);
}

#[test]
fn cache_refetches_after_expiry() {
    let source = Arc::new(CountingSource::new(
        StaticSource::new().with_data("ES=F", Some(5000.0), recent_bars(20, 5000.0, 20.0)),
    ));
    let feed =
        MarketFeed::new(source.clone()).with_cache(SnapshotCache::new(Duration::from_millis(10)));

    feed.snapshot("ES=F");
    std::thread::sleep(Duration::from_millis(20));
    feed.snapshot("ES=F");
    assert_eq!(source.calls(), 2);
}

#[test]
fn cached_snapshot_is_not_reused_for_another_date() {
    let last_session = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
    let bars: Vec<Bar> = (0..20)
        .rev()
        .map(|back| {
            let date = last_session.checked_sub_days(Days::new(back)).unwrap();
            Bar::new(date, 100.0, 101.0, 99.0, 100.0, 500)
        })
        .collect();
    let source = Arc::new(StaticSource::new().with_data("ES=F", Some(5000.0), bars));
    let uncached = MarketFeed::new(source.clone());
    let cached = MarketFeed::new(source).with_cache(SnapshotCache::new(Duration::from_secs(60)));

    assert_eq!(cached.snapshot_as_of("ES=F", last_session).atr(), Some(2.0));

    let before_history = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();
    let expected = uncached.snapshot_as_of("ES=F", before_history);
    assert_eq!(expected.atr(), None);
    assert_eq!(cached.snapshot_as_of("ES=F", before_history), expected);
    assert_eq!(cached.snapshot_as_of("ES=F", last_session).atr(), Some(2.0));
}

#[test]
fn incomplete_snapshots_are_refetched() {
    let source = Arc::new(CountingSource::new(
        StaticSource::new().with_data("ES=F", Some(5000.0), recent_bars(3, 5000.0, 20.0)),
    ));
    let feed =
        MarketFeed::new(source.clone()).with_cache(SnapshotCache::new(Duration::from_secs(60)));

    assert!(!feed.snapshot("ES=F").is_complete());
    assert!(!feed.snapshot("ES=F").is_complete());
    assert_eq!(source.calls(), 2);
}

#[test]
fn zero_ttl_never_caches() {
    let source = Arc::new(CountingSource::new(
        StaticSource::new().with_data("ES=F", Some(5000.0), recent_bars(20, 5000.0, 20.0)),
    ));
    let feed = MarketFeed::new(source.clone()).with_cache(SnapshotCache::disabled());
    feed.snapshot("ES=F");
    feed.snapshot("ES=F");
    assert_eq!(source.calls(), 2);
}

#[test]
fn reference_table_fetches_every_contract_in_order() {
    let source = Arc::new(CountingSource::new(
        StaticSource::new()
            .with_data("ES=F", Some(5000.0), recent_bars(20, 5000.0, 20.0))
            .with_data("CL=F", Some(80.0), recent_bars(20, 80.0, 2.0))
            .with_error("GC=F", DataError::CircuitBreakerTripped),
    ));
    let feed = MarketFeed::new(source.clone());
    let catalog = ContractCatalog::builtin();

    let table = ReferenceTable::build(&catalog, &feed);
    assert_eq!(source.calls(), catalog.len());

    let symbols: Vec<&str> = table.rows().map(|r| r.contract.symbol.as_str()).collect();
    let expected: Vec<&str> = catalog.contracts().map(|c| c.symbol.as_str()).collect();
    assert_eq!(symbols, expected);
    assert_eq!(table.complete_count(), 2);

    let es = table.rows().find(|r| r.contract.symbol == "ES=F").unwrap();
    assert_eq!(es.notional_exposure, Some(250_000.0));
    assert_eq!(es.daily_pnl_range, Some(1000.0));

    let cl = table.rows().find(|r| r.contract.symbol == "CL=F").unwrap();
    assert_eq!(cl.atr, Some(2.0));
    assert_eq!(cl.daily_pnl_range, Some(2000.0));

    let gc = table.rows().find(|r| r.contract.symbol == "GC=F").unwrap();
    assert_eq!(gc.price, None);
    assert_eq!(gc.notional_exposure, None);
    assert_eq!(gc.value_per_tick, 10.0);
}
