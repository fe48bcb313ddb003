//! Risk engine: stop-loss levels, R-multiple targets, position sizing.
//!
//! Everything here is a pure function of its inputs. The engine never touches
//! the network, never caches, and never computes from a partial snapshot:
//! a missing price or ATR surfaces as [`RiskError::InsufficientData`].
//!
//! # Responsibilities
//! - ATR multiplier → stop distance, stop price, dollar risk per contract
//! - Stop distance × R → target distance, target price, dollar reward
//! - Account risk budget → maximum contracts
//! - Position size × R → outcome table
//!
//! # Non-Responsibilities
//! - Fetching prices or bars (see `data`)
//! - Formatting (see the CLI)

pub mod direction;
pub mod engine;
pub mod levels;
pub mod params;
pub mod sizing;

pub use direction::Direction;
pub use engine::{DirectionalPlans, RiskEngine, TradePlan};
pub use levels::{ProfitTarget, StopLossLevel};
pub use params::RiskParameters;
pub use sizing::{
    max_contracts, risk_amount, scenario_outcomes, PositionLabel, PositionSize, PositionSizeRow,
    PositionSizingResult, ScenarioOutcome, SizingPolicy,
};

use std::fmt;

use thiserror::Error;

/// Default ATR multipliers offered for stop placement.
pub const DEFAULT_STOP_MULTIPLIERS: [f64; 6] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5];

/// Default R-multiples for profit targets.
pub const DEFAULT_R_MULTIPLES: [f64; 4] = [1.0, 2.0, 2.5, 3.0];

/// Which snapshot readings were missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    Price,
    Atr,
    PriceAndAtr,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Price => write!(f, "price"),
            Self::Atr => write!(f, "ATR"),
            Self::PriceAndAtr => write!(f, "price and ATR"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RiskError {
    #[error("insufficient data for {symbol}: {missing} unavailable")]
    InsufficientData {
        symbol: String,
        missing: MissingInput,
    },

    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl RiskError {
    /// True for the "no data yet" outcome, as opposed to a caller mistake.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Reject anything that is not a finite, strictly positive number.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, RiskError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RiskError::invalid(name, value, "must be a positive number"))
    }
}
