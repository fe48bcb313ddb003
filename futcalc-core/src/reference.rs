//! ReferenceTable: every catalog contract with its live market figures.
//!
//! Rows carry the static specification alongside value per tick, current
//! price, notional exposure, ATR and average daily P/L range. Readings that
//! could not be obtained stay `None`; the presentation layer decides how to
//! show them.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::catalog::ContractCatalog;
use crate::data::MarketFeed;
use crate::domain::{ContractSpec, MarketSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub contract: ContractSpec,
    pub value_per_tick: f64,
    pub price: Option<f64>,
    pub notional_exposure: Option<f64>,
    pub atr: Option<f64>,
    pub daily_pnl_range: Option<f64>,
}

impl ReferenceRow {
    pub fn new(contract: &ContractSpec, snapshot: &MarketSnapshot) -> Self {
        Self {
            contract: contract.clone(),
            value_per_tick: contract.value_per_tick(),
            price: snapshot.price(),
            notional_exposure: snapshot.notional_exposure(contract),
            atr: snapshot.atr(),
            daily_pnl_range: snapshot.daily_pnl_range(contract),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorTable {
    pub sector: String,
    pub rows: Vec<ReferenceRow>,
}

/// Reference table grouped by sector, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceTable {
    pub sectors: Vec<SectorTable>,
}

impl ReferenceTable {
    /// Fetch a snapshot for every contract on the rayon pool and assemble the table.
    pub fn build(catalog: &ContractCatalog, feed: &MarketFeed) -> Self {
        let symbols: Vec<&str> = catalog.contracts().map(|c| c.symbol.as_str()).collect();
        debug!(contracts = symbols.len(), "building reference table");

        // par_iter + collect preserves input order
        let snapshots: Vec<MarketSnapshot> = symbols.par_iter().map(|s| feed.snapshot(s)).collect();

        Self::from_snapshots(catalog, &snapshots)
    }

    /// Assemble the table from already-fetched snapshots. Contracts with no
    /// matching snapshot get an unavailable one.
    pub fn from_snapshots(catalog: &ContractCatalog, snapshots: &[MarketSnapshot]) -> Self {
        let sectors = catalog
            .sectors()
            .iter()
            .map(|sector| SectorTable {
                sector: sector.name.clone(),
                rows: sector
                    .contracts
                    .iter()
                    .map(|contract| {
                        match snapshots.iter().find(|s| s.symbol == contract.symbol) {
                            Some(snapshot) => ReferenceRow::new(contract, snapshot),
                            None => {
                                let missing = MarketSnapshot::unavailable(&contract.symbol);
                                ReferenceRow::new(contract, &missing)
                            }
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { sectors }
    }

    /// Keep only the named sector (case-insensitive).
    pub fn filter_sector(mut self, name: &str) -> Self {
        self.sectors.retain(|s| s.sector.eq_ignore_ascii_case(name));
        self
    }

    /// All rows in catalog order.
    pub fn rows(&self) -> impl Iterator<Item = &ReferenceRow> {
        self.sectors.iter().flat_map(|s| s.rows.iter())
    }

    /// Rows with both a price and an ATR.
    pub fn complete_count(&self) -> usize {
        self.rows().filter(|r| r.price.is_some() && r.atr.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_catalog_order() {
        let catalog = ContractCatalog::builtin();
        let table = ReferenceTable::from_snapshots(&catalog, &[]);
        let symbols: Vec<&str> = table.rows().map(|r| r.contract.symbol.as_str()).collect();
        let expected: Vec<&str> = catalog.contracts().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, expected);
        assert_eq!(table.sectors.len(), 9);
        assert_eq!(table.complete_count(), 0);
    }

    #[test]
    fn derived_figures() {
        let catalog = ContractCatalog::builtin();
        let snapshots = vec![
            MarketSnapshot::new("ES=F", Some(5000.0), Some(20.0)),
            MarketSnapshot::new("CL=F", Some(80.0), None),
        ];
        let table = ReferenceTable::from_snapshots(&catalog, &snapshots);

        let es = table.rows().find(|r| r.contract.symbol == "ES=F").unwrap();
        assert_eq!(es.value_per_tick, 12.5);
        assert_eq!(es.notional_exposure, Some(250_000.0));
        assert_eq!(es.daily_pnl_range, Some(1000.0));

        let cl = table.rows().find(|r| r.contract.symbol == "CL=F").unwrap();
        assert_eq!(cl.notional_exposure, Some(80_000.0));
        assert_eq!(cl.atr, None);
        assert_eq!(cl.daily_pnl_range, None);

        assert_eq!(table.complete_count(), 1);
    }

    #[test]
    fn sector_filter() {
        let table = ReferenceTable::from_snapshots(&ContractCatalog::builtin(), &[])
            .filter_sector("energy");
        assert_eq!(table.sectors.len(), 1);
        assert_eq!(table.sectors[0].sector, "Energy");
        assert_eq!(table.rows().count(), 4);
    }
}
