use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tick rounding direction for display prices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TickRounding {
    /// Round to nearest tick
    Nearest,
    /// Round down (toward the lower tick)
    Down,
    /// Round up (toward the higher tick)
    Up,
}

/// Standardized futures contract specification.
///
/// Only `symbol`, `tick_size` and `multiplier` feed the risk math. Everything
/// else is reference data for the contract table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractSpec {
    /// Market-data symbol, e.g. `ES=F`. Unique within a catalog.
    pub symbol: String,
    /// Broker-style ticker, e.g. `/ES`.
    #[serde(alias = "ticker")]
    pub display_ticker: String,
    pub name: String,
    /// Filled in by the catalog from the enclosing sector.
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub notional_description: String,
    /// Minimum price increment.
    pub tick_size: f64,
    /// Dollars per whole point of price movement.
    pub multiplier: f64,
    /// Approximate SPAN initial margin in dollars.
    #[serde(default)]
    pub initial_margin: f64,
    #[serde(default)]
    pub etf_equivalent: String,
    #[serde(default)]
    pub etf_share_estimate: String,
}

impl ContractSpec {
    /// Dollar value of a one-tick move for one contract.
    pub fn value_per_tick(&self) -> f64 {
        self.tick_size * self.multiplier
    }

    /// Dollar value controlled by one contract at `price`.
    pub fn notional_exposure(&self, price: f64) -> f64 {
        price * self.multiplier
    }

    /// Round a price onto this contract's tick grid.
    pub fn round_price(&self, price: f64, rounding: TickRounding) -> f64 {
        let ticks = price / self.tick_size;
        let rounded_ticks = match rounding {
            TickRounding::Nearest => ticks.round(),
            TickRounding::Down => ticks.floor(),
            TickRounding::Up => ticks.ceil(),
        };
        rounded_ticks * self.tick_size
    }

    /// Number of ticks spanned by a distance in price points.
    pub fn ticks_in(&self, distance: f64) -> f64 {
        distance / self.tick_size
    }

    /// Check the fields the risk math depends on.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.symbol.trim().is_empty() {
            return Err(ContractError::EmptySymbol);
        }
        if !(self.tick_size.is_finite() && self.tick_size > 0.0) {
            return Err(ContractError::InvalidTickSize {
                symbol: self.symbol.clone(),
                tick_size: self.tick_size,
            });
        }
        if !(self.multiplier.is_finite() && self.multiplier > 0.0) {
            return Err(ContractError::InvalidMultiplier {
                symbol: self.symbol.clone(),
                multiplier: self.multiplier,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ContractError {
    #[error("contract symbol must not be empty")]
    EmptySymbol,

    #[error("{symbol}: tick_size must be positive, got {tick_size}")]
    InvalidTickSize { symbol: String, tick_size: f64 },

    #[error("{symbol}: multiplier must be positive, got {multiplier}")]
    InvalidMultiplier { symbol: String, multiplier: f64 },
}
