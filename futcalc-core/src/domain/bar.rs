//! Bar: one trading session of price history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV bar for a single contract.
///
/// Only `high`, `low` and `close` feed the volatility estimate; `open` and
/// `volume` are carried for display and sanity checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns true if any of the fields used for True Range is not finite.
    pub fn is_void(&self) -> bool {
        !(self.high.is_finite() && self.low.is_finite() && self.close.is_finite())
    }

    /// High minus low for the session.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
