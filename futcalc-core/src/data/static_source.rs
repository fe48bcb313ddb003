//! In-memory market-data source for offline runs and tests.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::provider::{DataError, DataSource, FetchResult, MarketDataSource};
use crate::domain::Bar;

#[derive(Debug, Clone)]
enum Entry {
    Data { price: Option<f64>, bars: Vec<Bar> },
    Fail(DataError),
}

/// Source backed by a fixed symbol table.
///
/// Bars are filtered to the requested date range; unknown symbols answer
/// [`DataError::SymbolNotFound`].
#[derive(Debug, Clone)]
pub struct StaticSource {
    entries: HashMap<String, Entry>,
    available: bool,
}

impl StaticSource {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            available: true,
        }
    }

    /// Register a price and daily bars (oldest first) for `symbol`.
    pub fn with_data(
        mut self,
        symbol: impl Into<String>,
        price: Option<f64>,
        bars: Vec<Bar>,
    ) -> Self {
        self.entries.insert(symbol.into(), Entry::Data { price, bars });
        self
    }

    /// Make every fetch of `symbol` fail with `error`.
    pub fn with_error(mut self, symbol: impl Into<String>, error: DataError) -> Self {
        self.entries.insert(symbol.into(), Entry::Fail(error));
        self
    }

    /// Report the source as unavailable; fetches still answer.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        match self.entries.get(symbol) {
            Some(Entry::Data { price, bars }) => Ok(FetchResult {
                symbol: symbol.to_string(),
                last_price: *price,
                bars: bars
                    .iter()
                    .filter(|b| b.date >= start && b.date <= end)
                    .cloned()
                    .collect(),
                source: DataSource::Static,
            }),
            Some(Entry::Fail(err)) => Err(err.clone()),
            None => Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            }),
        }
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
