//! RiskEngine: the single entry point presentation code calls.

use serde::{Deserialize, Serialize};

use super::levels::{ProfitTarget, StopLossLevel};
use super::sizing::{
    self, PositionSize, PositionSizeRow, PositionSizingResult, ScenarioOutcome, SizingPolicy,
};
use super::{
    require_positive, Direction, MissingInput, RiskError, RiskParameters, DEFAULT_R_MULTIPLES,
    DEFAULT_STOP_MULTIPLIERS,
};
use crate::domain::{ContractSpec, MarketSnapshot};

/// Tolerance when matching a requested ATR multiplier against the offered set.
const MULTIPLIER_MATCH_EPSILON: f64 = 1e-9;

/// Stateless risk calculator.
///
/// Holds only immutable configuration: the ATR multipliers offered for
/// stops, the R-multiples offered for targets, and the sizing policy.
/// Every method is a pure function of its arguments and that configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskEngine {
    stop_multipliers: Vec<f64>,
    r_multiples: Vec<f64>,
    policy: SizingPolicy,
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self {
            stop_multipliers: DEFAULT_STOP_MULTIPLIERS.to_vec(),
            r_multiples: DEFAULT_R_MULTIPLES.to_vec(),
            policy: SizingPolicy::default(),
        }
    }
}

impl RiskEngine {
    pub fn new(
        stop_multipliers: Vec<f64>,
        r_multiples: Vec<f64>,
        policy: SizingPolicy,
    ) -> Result<Self, RiskError> {
        validate_set("stop_multipliers", &stop_multipliers)?;
        validate_set("r_multiples", &r_multiples)?;
        Ok(Self {
            stop_multipliers,
            r_multiples,
            policy,
        })
    }

    pub fn stop_multipliers(&self) -> &[f64] {
        &self.stop_multipliers
    }

    pub fn r_multiples(&self) -> &[f64] {
        &self.r_multiples
    }

    pub fn policy(&self) -> SizingPolicy {
        self.policy
    }

    /// One stop level per multiplier, in the order given.
    pub fn compute_stop_losses(
        &self,
        contract: &ContractSpec,
        snapshot: &MarketSnapshot,
        direction: Direction,
        multipliers: &[f64],
    ) -> Result<Vec<StopLossLevel>, RiskError> {
        validate_set("atr_multiplier", multipliers)?;
        let (price, atr) = priced(snapshot)?;
        Ok(multipliers
            .iter()
            .map(|&m| StopLossLevel::compute(contract, price, atr, direction, m))
            .collect())
    }

    /// One profit target per R-multiple, in the order given.
    pub fn compute_profit_targets(
        &self,
        contract: &ContractSpec,
        snapshot: &MarketSnapshot,
        direction: Direction,
        selected_stop_distance: f64,
        r_multiples: &[f64],
    ) -> Result<Vec<ProfitTarget>, RiskError> {
        validate_set("r_multiple", r_multiples)?;
        if !(selected_stop_distance.is_finite() && selected_stop_distance >= 0.0) {
            return Err(RiskError::invalid(
                "selected_stop_distance",
                selected_stop_distance,
                "must be a non-negative number",
            ));
        }
        let (price, _) = priced(snapshot)?;
        Ok(r_multiples
            .iter()
            .map(|&r| ProfitTarget::compute(contract, price, direction, selected_stop_distance, r))
            .collect())
    }

    /// Whole contracts affordable under the configured [`SizingPolicy`].
    pub fn compute_max_contracts(
        &self,
        risk_amount: f64,
        stop_loss_amount_per_contract: f64,
    ) -> u32 {
        sizing::max_contracts(risk_amount, stop_loss_amount_per_contract, self.policy)
    }

    /// Dollar budget: `account_size × risk_percentage / 100`.
    pub fn compute_risk_amount(account_size: f64, risk_percentage: f64) -> Result<f64, RiskError> {
        require_positive("account_size", account_size)?;
        require_positive("risk_percentage", risk_percentage)?;
        if risk_percentage > 100.0 {
            return Err(RiskError::invalid(
                "risk_percentage",
                risk_percentage,
                "must not exceed 100",
            ));
        }
        Ok(sizing::risk_amount(account_size, risk_percentage))
    }

    /// Profit for every (R-multiple, position size) pair, R outer.
    pub fn compute_scenario_outcomes(
        position_sizes: &[PositionSize],
        selected_stop_loss_amount: f64,
        r_multiples: &[f64],
    ) -> Vec<ScenarioOutcome> {
        sizing::scenario_outcomes(position_sizes, selected_stop_loss_amount, r_multiples)
    }

    /// Full calculator result for one direction.
    pub fn plan(
        &self,
        contract: &ContractSpec,
        snapshot: &MarketSnapshot,
        params: &RiskParameters,
        direction: Direction,
    ) -> Result<TradePlan, RiskError> {
        self.validate_params(params)?;
        let (price, atr) = priced(snapshot)?;

        let stop_levels =
            self.compute_stop_losses(contract, snapshot, direction, &self.stop_multipliers)?;
        let selected_stop =
            StopLossLevel::compute(contract, price, atr, direction, params.atr_multiplier);
        let targets = self.compute_profit_targets(
            contract,
            snapshot,
            direction,
            selected_stop.stop_distance,
            &self.r_multiples,
        )?;

        let per_contract = selected_stop.stop_loss_amount_per_contract;
        let sizing = PositionSizingResult::compute(
            params.account_size,
            params.risk_percentage,
            per_contract,
            params.contracts_requested,
            self.policy,
        );
        let sizes = sizing.position_sizes();
        let position_sizes = sizes
            .iter()
            .map(|s| s.row(per_contract, params.account_size))
            .collect();
        let outcomes = Self::compute_scenario_outcomes(&sizes, per_contract, &self.r_multiples);

        Ok(TradePlan {
            symbol: contract.symbol.clone(),
            direction,
            entry_price: price,
            atr,
            stop_levels,
            selected_stop,
            targets,
            sizing,
            position_sizes,
            outcomes,
        })
    }

    /// Long and short plans from the same inputs.
    pub fn plan_both(
        &self,
        contract: &ContractSpec,
        snapshot: &MarketSnapshot,
        params: &RiskParameters,
    ) -> Result<DirectionalPlans, RiskError> {
        Ok(DirectionalPlans {
            long: self.plan(contract, snapshot, params, Direction::Long)?,
            short: self.plan(contract, snapshot, params, Direction::Short)?,
        })
    }

    /// Range checks plus membership of `atr_multiplier` in the offered set.
    pub fn validate_params(&self, params: &RiskParameters) -> Result<(), RiskError> {
        params.validate()?;
        let offered = self
            .stop_multipliers
            .iter()
            .any(|m| (m - params.atr_multiplier).abs() < MULTIPLIER_MATCH_EPSILON);
        if !offered {
            return Err(RiskError::invalid(
                "atr_multiplier",
                params.atr_multiplier,
                "not one of the offered stop multipliers",
            ));
        }
        Ok(())
    }
}

/// Everything the calculator shows for one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub atr: f64,
    pub stop_levels: Vec<StopLossLevel>,
    pub selected_stop: StopLossLevel,
    pub targets: Vec<ProfitTarget>,
    pub sizing: PositionSizingResult,
    pub position_sizes: Vec<PositionSizeRow>,
    pub outcomes: Vec<ScenarioOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalPlans {
    pub long: TradePlan,
    pub short: TradePlan,
}

/// Price and ATR, or the typed reason they cannot be used.
fn priced(snapshot: &MarketSnapshot) -> Result<(f64, f64), RiskError> {
    let missing = match (snapshot.price(), snapshot.atr()) {
        (Some(price), Some(atr)) => return Ok((price, atr)),
        (None, Some(_)) => MissingInput::Price,
        (Some(_), None) => MissingInput::Atr,
        (None, None) => MissingInput::PriceAndAtr,
    };
    Err(RiskError::InsufficientData {
        symbol: snapshot.symbol.clone(),
        missing,
    })
}

fn validate_set(name: &'static str, values: &[f64]) -> Result<(), RiskError> {
    if values.is_empty() {
        return Err(RiskError::invalid(name, f64::NAN, "at least one value is required"));
    }
    for &v in values {
        require_positive(name, v)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContractCatalog;

    fn es() -> ContractSpec {
        ContractCatalog::builtin().get("ES=F").cloned().unwrap()
    }

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot::new("ES=F", Some(5000.0), Some(20.0))
    }

    #[test]
    fn stop_losses_follow_multiplier_order() {
        let engine = RiskEngine::default();
        let levels = engine
            .compute_stop_losses(&es(), &snapshot(), Direction::Long, engine.stop_multipliers())
            .unwrap();
        assert_eq!(levels.len(), 6);
        let distances: Vec<f64> = levels.iter().map(|l| l.stop_distance).collect();
        assert_eq!(distances, vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0]);
    }

    #[test]
    fn missing_atr_is_insufficient_data() {
        let engine = RiskEngine::default();
        let snap = MarketSnapshot::new("ES=F", Some(5000.0), None);
        let err = engine
            .compute_stop_losses(&es(), &snap, Direction::Long, &[1.0])
            .unwrap_err();
        assert_eq!(
            err,
            RiskError::InsufficientData {
                symbol: "ES=F".into(),
                missing: MissingInput::Atr
            }
        );
    }

    #[test]
    fn missing_price_blocks_targets() {
        let engine = RiskEngine::default();
        let snap = MarketSnapshot::new("ES=F", None, Some(20.0));
        let err = engine
            .compute_profit_targets(&es(), &snap, Direction::Short, 20.0, &[1.0])
            .unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn negative_stop_distance_rejected() {
        let engine = RiskEngine::default();
        let err = engine
            .compute_profit_targets(&es(), &snapshot(), Direction::Long, -1.0, &[1.0])
            .unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { .. }));
    }

    #[test]
    fn empty_or_non_positive_sets_rejected() {
        assert!(RiskEngine::new(vec![], vec![1.0], SizingPolicy::MinimumOne).is_err());
        assert!(RiskEngine::new(vec![1.0], vec![0.0], SizingPolicy::MinimumOne).is_err());
        let engine = RiskEngine::default();
        assert!(engine
            .compute_stop_losses(&es(), &snapshot(), Direction::Long, &[1.0, -0.5])
            .is_err());
    }

    #[test]
    fn risk_amount_validates() {
        assert_eq!(RiskEngine::compute_risk_amount(100_000.0, 1.0), Ok(1000.0));
        assert!(RiskEngine::compute_risk_amount(0.0, 1.0).is_err());
        assert!(RiskEngine::compute_risk_amount(100_000.0, 0.0).is_err());
        assert!(RiskEngine::compute_risk_amount(100_000.0, 101.0).is_err());
    }

    #[test]
    fn multiplier_outside_offered_set_rejected() {
        let engine = RiskEngine::default();
        let params = RiskParameters::new(100_000.0, 1.0, 2.0, 1).unwrap();
        let err = engine.plan(&es(), &snapshot(), &params, Direction::Long).unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { name: "atr_multiplier", .. }));
    }

    #[test]
    fn plan_assembles_every_section() {
        let engine = RiskEngine::default();
        let params = RiskParameters::new(100_000.0, 1.0, 0.5, 2).unwrap();
        let plan = engine.plan(&es(), &snapshot(), &params, Direction::Short).unwrap();

        assert_eq!(plan.entry_price, 5000.0);
        assert_eq!(plan.stop_levels.len(), 6);
        assert_eq!(plan.selected_stop.stop_price, 5010.0);
        assert_eq!(plan.selected_stop.stop_loss_amount_per_contract, 500.0);
        assert_eq!(plan.targets.len(), 4);
        assert_eq!(plan.targets[0].target_price, 4990.0);
        assert_eq!(plan.sizing.max_contracts_by_risk, 2);
        assert_eq!(plan.sizing.selected_risk_amount, 1000.0);
        assert_eq!(plan.position_sizes.len(), 3);
        assert_eq!(plan.outcomes.len(), 12);
    }

    #[test]
    fn allow_zero_policy_reports_zero_contracts() {
        let engine = RiskEngine::new(
            DEFAULT_STOP_MULTIPLIERS.to_vec(),
            DEFAULT_R_MULTIPLES.to_vec(),
            SizingPolicy::AllowZero,
        )
        .unwrap();
        let params = RiskParameters::new(10_000.0, 1.0, 1.0, 1).unwrap();
        let plan = engine.plan(&es(), &snapshot(), &params, Direction::Long).unwrap();
        // $100 budget vs $1,000 per contract
        assert_eq!(plan.sizing.max_contracts_by_risk, 0);
        assert_eq!(plan.position_sizes[2].contracts, 0);
    }

    #[test]
    fn plan_both_mirrors() {
        let engine = RiskEngine::default();
        let params = RiskParameters::new(100_000.0, 1.0, 1.0, 1).unwrap();
        let plans = engine.plan_both(&es(), &snapshot(), &params).unwrap();
        assert_eq!(plans.long.selected_stop.stop_price, 4980.0);
        assert_eq!(plans.short.selected_stop.stop_price, 5020.0);
        assert_eq!(plans.long.sizing, plans.short.sizing);
    }
}
