//! Market data: sources, circuit breaker, snapshot cache and the feed.

pub mod cache;
pub mod circuit_breaker;
pub mod feed;
pub mod provider;
pub mod static_source;
pub mod yahoo;

pub use cache::SnapshotCache;
pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use feed::{MarketFeed, DEFAULT_HISTORY_DAYS};
pub use provider::{DataError, DataSource, FetchResult, MarketDataSource};
pub use static_source::StaticSource;
pub use yahoo::YahooProvider;
