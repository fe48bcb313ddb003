//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR is the simple mean of the most recent `period` True Range values.
//! Lookback: period + 1 bars (the first bar only supplies a previous close).

use thiserror::Error;

use crate::domain::Bar;

/// Default ATR window in trading days.
pub const DEFAULT_ATR_PERIOD: usize = 14;

#[derive(Debug, Error, PartialEq)]
pub enum VolatilityError {
    #[error("ATR period must be >= 1")]
    InvalidPeriod,

    #[error("insufficient history: need {needed} bars, have {available}")]
    InsufficientHistory { needed: usize, available: usize },

    #[error("bar {index} has a non-finite high/low/close")]
    NonFiniteBar { index: usize },
}

/// Computes ATR over a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolatilityEstimator {
    period: usize,
}

impl VolatilityEstimator {
    pub fn new(period: usize) -> Result<Self, VolatilityError> {
        if period == 0 {
            return Err(VolatilityError::InvalidPeriod);
        }
        Ok(Self { period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Bars needed for one ATR reading.
    pub fn lookback(&self) -> usize {
        self.period + 1
    }

    /// ATR of the most recent `period` sessions in `bars` (oldest first).
    pub fn estimate(&self, bars: &[Bar]) -> Result<f64, VolatilityError> {
        if bars.len() < self.lookback() {
            return Err(VolatilityError::InsufficientHistory {
                needed: self.lookback(),
                available: bars.len(),
            });
        }

        let start = bars.len() - self.lookback();
        let window = &bars[start..];
        if let Some(offset) = window.iter().position(Bar::is_void) {
            return Err(VolatilityError::NonFiniteBar {
                index: start + offset,
            });
        }

        let sum: f64 = true_range(window).iter().sum();
        Ok(sum / self.period as f64)
    }
}

impl Default for VolatilityEstimator {
    fn default() -> Self {
        Self {
            period: DEFAULT_ATR_PERIOD,
        }
    }
}

/// True Range for one session given the previous session's close.
pub fn session_true_range(bar: &Bar, prev_close: f64) -> f64 {
    bar.range()
        .max((bar.high - prev_close).abs())
        .max((bar.low - prev_close).abs())
}

/// True Range series for every bar after the first.
///
/// The output has `bars.len() - 1` entries; `tr[i]` belongs to `bars[i + 1]`.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    bars.windows(2)
        .map(|pair| session_true_range(&pair[1], pair[0].close))
        .collect()
}
