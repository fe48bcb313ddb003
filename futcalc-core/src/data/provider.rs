//! Market-data source trait and structured error types.
//!
//! The MarketDataSource trait abstracts over where prices come from (Yahoo
//! Finance, an in-memory table) so the feed can swap implementations and tests
//! can script failures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Bar, Symbol};

/// Structured error types for market-data operations.
///
/// None of these reach the risk engine: the feed logs them and reports the
/// affected readings as unavailable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful fetch for a single symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub symbol: Symbol,
    /// Latest traded price, if the provider reported one.
    pub last_price: Option<f64>,
    /// Daily bars, oldest first.
    pub bars: Vec<Bar>,
    pub source: DataSource,
}

impl FetchResult {
    /// Reported price, falling back to the most recent close.
    pub fn current_price(&self) -> Option<f64> {
        self.last_price
            .or_else(|| self.bars.last().map(|b| b.close))
            .filter(|p| p.is_finite())
    }
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    Static,
}

/// Trait for market-data providers.
///
/// Implementations handle one provider's transport and format. Caching sits
/// above this trait in the feed; providers don't know about it.
pub trait MarketDataSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the latest price and daily bars for a symbol over a date range.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError>;

    /// Check if the source is currently accepting requests.
    fn is_available(&self) -> bool;
}
