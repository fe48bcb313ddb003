//! Domain types: bars, contract specifications, market snapshots.

pub mod bar;
pub mod contract;
pub mod snapshot;

pub use bar::Bar;
pub use contract::{ContractError, ContractSpec, TickRounding};
pub use snapshot::MarketSnapshot;

/// Symbol type alias
pub type Symbol = String;
