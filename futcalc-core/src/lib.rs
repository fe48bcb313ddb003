//! futcalc core: contract catalog, volatility, risk engine, market data.
//!
//! This crate contains everything behind the `futcalc` calculator:
//! - Domain types (bars, contract specifications, market snapshots)
//! - Contract catalog grouped by sector
//! - ATR volatility estimator
//! - Risk engine: stop levels, R-multiple targets, position sizing, outcomes
//! - Market-data boundary: source trait, Yahoo adapter, circuit breaker,
//!   snapshot cache and feed
//! - Reference-table assembly
//! - TOML configuration

pub mod catalog;
pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod reference;
pub mod risk;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: shared types are Send + Sync.
    ///
    /// The reference table fetches snapshots on the rayon pool through one
    /// feed, so the feed and everything it owns must cross threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::ContractSpec>();
        require_sync::<domain::ContractSpec>();
        require_send::<domain::MarketSnapshot>();
        require_sync::<domain::MarketSnapshot>();

        // Catalog
        require_send::<catalog::ContractCatalog>();
        require_sync::<catalog::ContractCatalog>();

        // Market data
        require_send::<data::MarketFeed>();
        require_sync::<data::MarketFeed>();
        require_send::<data::CircuitBreaker>();
        require_sync::<data::CircuitBreaker>();
        require_send::<data::SnapshotCache>();
        require_sync::<data::SnapshotCache>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();

        // Risk engine
        require_send::<risk::RiskEngine>();
        require_sync::<risk::RiskEngine>();
        require_send::<risk::TradePlan>();
        require_sync::<risk::TradePlan>();

        // Config
        require_send::<config::CalculatorConfig>();
        require_sync::<config::CalculatorConfig>();
    }

    /// Architecture contract: the engine reads snapshots, it never fetches them.
    ///
    /// `plan` takes a `MarketSnapshot` by reference and nothing that can reach
    /// the network. If a data source parameter is ever added, this breaks.
    #[test]
    fn risk_engine_takes_no_data_source() {
        fn _check_plan(
            engine: &risk::RiskEngine,
            contract: &domain::ContractSpec,
            snapshot: &domain::MarketSnapshot,
            params: &risk::RiskParameters,
        ) -> Result<risk::TradePlan, risk::RiskError> {
            engine.plan(contract, snapshot, params, risk::Direction::Long)
        }
    }
}
