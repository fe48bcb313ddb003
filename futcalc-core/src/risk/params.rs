use serde::{Deserialize, Serialize};

use super::{require_positive, RiskError};

/// Calculator inputs from the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskParameters {
    /// Account equity in dollars (> 0).
    pub account_size: f64,
    /// Percent of the account risked on the trade, in (0, 100].
    pub risk_percentage: f64,
    /// ATR multiple for the selected stop (> 0, from the engine's offered set).
    pub atr_multiplier: f64,
    /// Contracts the user intends to trade (≥ 1).
    pub contracts_requested: u32,
}

impl RiskParameters {
    pub fn new(
        account_size: f64,
        risk_percentage: f64,
        atr_multiplier: f64,
        contracts_requested: u32,
    ) -> Result<Self, RiskError> {
        let params = Self {
            account_size,
            risk_percentage,
            atr_multiplier,
            contracts_requested,
        };
        params.validate()?;
        Ok(params)
    }

    /// Range checks that do not depend on the engine's multiplier set.
    pub fn validate(&self) -> Result<(), RiskError> {
        require_positive("account_size", self.account_size)?;
        require_positive("risk_percentage", self.risk_percentage)?;
        if self.risk_percentage > 100.0 {
            return Err(RiskError::invalid(
                "risk_percentage",
                self.risk_percentage,
                "must not exceed 100",
            ));
        }
        require_positive("atr_multiplier", self.atr_multiplier)?;
        if self.contracts_requested == 0 {
            return Err(RiskError::invalid(
                "contracts_requested",
                0.0,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
