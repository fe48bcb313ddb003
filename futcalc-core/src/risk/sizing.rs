//! Position sizing from an account risk budget.
//!
//! # Formula
//! ```text
//! risk_amount   = account_size * risk_percentage / 100
//! max_contracts = floor(risk_amount / stop_loss_amount_per_contract)
//! ```
//!
//! # Example
//! - Account: $100,000, risk 1% → $1,000 budget
//! - ES at 1.0 ATR (ATR 20 pts × $50) → $1,000 per contract
//! - Max contracts: 1

use serde::{Deserialize, Serialize};

/// What to do when the risk budget does not cover a single contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingPolicy {
    /// Any willingness to trade implies at least one contract.
    #[default]
    MinimumOne,
    /// Report zero contracts: the budget is a "do not trade" signal.
    AllowZero,
}

/// Dollar risk budget for one trade.
pub fn risk_amount(account_size: f64, risk_percentage: f64) -> f64 {
    account_size * risk_percentage / 100.0
}

/// Maximum whole contracts whose combined stop loss fits the budget.
///
/// A per-contract loss that is zero, negative or not a number cannot size a
/// position and yields 0 under every policy.
pub fn max_contracts(
    risk_amount: f64,
    stop_loss_amount_per_contract: f64,
    policy: SizingPolicy,
) -> u32 {
    if stop_loss_amount_per_contract.is_nan() || stop_loss_amount_per_contract <= 0.0 {
        return 0;
    }

    let ratio = (risk_amount / stop_loss_amount_per_contract).floor();
    // `as` saturates: +inf → u32::MAX
    let whole = if ratio.is_nan() || ratio <= 0.0 { 0 } else { ratio as u32 };

    match policy {
        SizingPolicy::MinimumOne => whole.max(1),
        SizingPolicy::AllowZero => whole,
    }
}

/// `amount` as a percentage of `whole`, 0 when `whole` is not positive.
pub(crate) fn percent_of(amount: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        amount * 100.0 / whole
    } else {
        0.0
    }
}

/// Sizing outcome for the selected stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSizingResult {
    pub risk_amount: f64,
    pub max_contracts_by_risk: u32,
    pub selected_contracts: u32,
    pub selected_risk_amount: f64,
    pub selected_risk_percent_of_account: f64,
    pub policy: SizingPolicy,
}

impl PositionSizingResult {
    pub fn compute(
        account_size: f64,
        risk_percentage: f64,
        stop_loss_amount_per_contract: f64,
        selected_contracts: u32,
        policy: SizingPolicy,
    ) -> Self {
        let budget = risk_amount(account_size, risk_percentage);
        let selected_risk_amount = f64::from(selected_contracts) * stop_loss_amount_per_contract;
        Self {
            risk_amount: budget,
            max_contracts_by_risk: max_contracts(budget, stop_loss_amount_per_contract, policy),
            selected_contracts,
            selected_risk_amount,
            selected_risk_percent_of_account: percent_of(selected_risk_amount, account_size),
            policy,
        }
    }

    /// The Minimum / Selected / MaxRisk sizes shown side by side.
    ///
    /// Under `MinimumOne` the MaxRisk row holds at least one contract, even
    /// when a zero stop distance leaves `max_contracts_by_risk` at 0.
    pub fn position_sizes(&self) -> Vec<PositionSize> {
        let max_risk = match self.policy {
            SizingPolicy::MinimumOne => self.max_contracts_by_risk.max(1),
            SizingPolicy::AllowZero => self.max_contracts_by_risk,
        };
        vec![
            PositionSize::new(PositionLabel::Minimum, 1),
            PositionSize::new(PositionLabel::Selected, self.selected_contracts),
            PositionSize::new(PositionLabel::MaxRisk, max_risk),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionLabel {
    Minimum,
    Selected,
    MaxRisk,
}

impl PositionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimum => "Minimum",
            Self::Selected => "Selected",
            Self::MaxRisk => "Max Risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSize {
    pub label: PositionLabel,
    pub contracts: u32,
}

impl PositionSize {
    pub fn new(label: PositionLabel, contracts: u32) -> Self {
        Self { label, contracts }
    }

    /// Risk, in dollars and percent of account, at the given per-contract loss.
    pub fn row(&self, stop_loss_amount_per_contract: f64, account_size: f64) -> PositionSizeRow {
        let risk_amount = f64::from(self.contracts) * stop_loss_amount_per_contract;
        PositionSizeRow {
            label: self.label,
            contracts: self.contracts,
            risk_amount,
            risk_percent_of_account: percent_of(risk_amount, account_size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSizeRow {
    pub label: PositionLabel,
    pub contracts: u32,
    pub risk_amount: f64,
    pub risk_percent_of_account: f64,
}

/// Profit at one R-multiple for one position size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub label: PositionLabel,
    pub contracts: u32,
    pub r_multiple: f64,
    pub profit: f64,
}

/// Cross product of R-multiples and position sizes.
///
/// Ordered R-multiple outer, position size inner: all sizes at the first R,
/// then all sizes at the next.
pub fn scenario_outcomes(
    position_sizes: &[PositionSize],
    selected_stop_loss_amount: f64,
    r_multiples: &[f64],
) -> Vec<ScenarioOutcome> {
    r_multiples
        .iter()
        .flat_map(|&r| {
            position_sizes.iter().map(move |size| ScenarioOutcome {
                label: size.label,
                contracts: size.contracts,
                r_multiple: r,
                profit: f64::from(size.contracts) * selected_stop_loss_amount * r,
            })
        })
        .collect()
}
