//! Stop-loss levels and R-multiple profit targets.

use serde::{Deserialize, Serialize};

use super::Direction;
use crate::domain::ContractSpec;

/// One stop placement at `atr_multiplier` × ATR from entry.
///
/// # Formula
/// ```text
/// stop_distance = atr * atr_multiplier              (price points)
/// stop_price    = entry ∓ stop_distance             (long: −, short: +)
/// stop_loss_amount_per_contract = stop_distance * contract.multiplier
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopLossLevel {
    pub atr_multiplier: f64,
    pub stop_distance: f64,
    /// Stop distance expressed in contract ticks (may be fractional).
    pub stop_distance_ticks: f64,
    pub stop_price: f64,
    pub stop_loss_amount_per_contract: f64,
}

impl StopLossLevel {
    pub(crate) fn compute(
        contract: &ContractSpec,
        entry: f64,
        atr: f64,
        direction: Direction,
        atr_multiplier: f64,
    ) -> Self {
        let stop_distance = atr * atr_multiplier;
        Self {
            atr_multiplier,
            stop_distance,
            stop_distance_ticks: contract.ticks_in(stop_distance),
            stop_price: direction.stop_price(entry, stop_distance),
            stop_loss_amount_per_contract: stop_distance * contract.multiplier,
        }
    }
}

/// Profit target at `r_multiple` × the selected stop distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitTarget {
    pub r_multiple: f64,
    pub target_distance: f64,
    pub target_price: f64,
    pub target_amount_per_contract: f64,
}

impl ProfitTarget {
    pub(crate) fn compute(
        contract: &ContractSpec,
        entry: f64,
        direction: Direction,
        stop_distance: f64,
        r_multiple: f64,
    ) -> Self {
        let target_distance = stop_distance * r_multiple;
        Self {
            r_multiple,
            target_distance,
            target_price: direction.target_price(entry, target_distance),
            target_amount_per_contract: stop_distance * contract.multiplier * r_multiple,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContractCatalog;

    fn es() -> ContractSpec {
        ContractCatalog::builtin().get("ES=F").cloned().unwrap()
    }

    #[test]
    fn stop_level_long() {
        let level = StopLossLevel::compute(&es(), 5000.0, 20.0, Direction::Long, 1.0);
        assert_eq!(level.stop_distance, 20.0);
        assert_eq!(level.stop_price, 4980.0);
        assert_eq!(level.stop_loss_amount_per_contract, 1000.0);
        assert_eq!(level.stop_distance_ticks, 80.0);
    }

    #[test]
    fn stop_level_short_half_atr() {
        let level = StopLossLevel::compute(&es(), 5000.0, 20.0, Direction::Short, 0.5);
        assert_eq!(level.stop_distance, 10.0);
        assert_eq!(level.stop_price, 5010.0);
        assert_eq!(level.stop_loss_amount_per_contract, 500.0);
    }

    #[test]
    fn target_two_r() {
        let target = ProfitTarget::compute(&es(), 5000.0, Direction::Long, 20.0, 2.0);
        assert_eq!(target.target_distance, 40.0);
        assert_eq!(target.target_price, 5040.0);
        assert_eq!(target.target_amount_per_contract, 2000.0);

        let short = ProfitTarget::compute(&es(), 5000.0, Direction::Short, 20.0, 2.5);
        assert_eq!(short.target_price, 4950.0);
        assert_eq!(short.target_amount_per_contract, 2500.0);
    }
}
