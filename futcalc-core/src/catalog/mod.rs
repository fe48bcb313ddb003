//! Contract catalog: sector-organized contract specifications.
//!
//! The catalog is built once from an explicit [`CatalogConfig`] (the stock
//! table or a TOML file) and is read-only afterwards. Lookups preserve the
//! order sectors and contracts were declared in.

mod builtin;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ContractError, ContractSpec};

/// One sector and its contracts, in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectorConfig {
    pub name: String,
    #[serde(default)]
    pub contracts: Vec<ContractSpec>,
}

/// Immutable description of the whole contract table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default)]
    pub sectors: Vec<SectorConfig>,
}

impl CatalogConfig {
    /// Parse a catalog from TOML (`[[sectors]]` with nested `[[sectors.contracts]]`).
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, CatalogError> {
        toml::to_string_pretty(self).map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("read catalog file: {0}")]
    Io(String),

    #[error("parse catalog TOML: {0}")]
    Parse(String),

    #[error("sector name must not be empty")]
    EmptySectorName,

    #[error("duplicate sector '{0}'")]
    DuplicateSector(String),

    #[error("duplicate contract symbol '{0}'")]
    DuplicateSymbol(String),

    #[error("invalid contract: {0}")]
    InvalidContract(#[from] ContractError),
}

/// Read-only registry of contract specifications.
#[derive(Debug, Clone)]
pub struct ContractCatalog {
    sectors: Vec<SectorConfig>,
    /// symbol → (sector index, contract index)
    index: HashMap<String, (usize, usize)>,
}

impl ContractCatalog {
    /// Validate `config` and build the lookup index.
    ///
    /// Every contract gets its `sector` field set from the enclosing sector.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let mut sectors = config.sectors;
        let mut index = HashMap::new();
        let mut seen_sectors: Vec<&str> = Vec::new();

        for sector in &sectors {
            let name = sector.name.trim();
            if name.is_empty() {
                return Err(CatalogError::EmptySectorName);
            }
            if seen_sectors.contains(&name) {
                return Err(CatalogError::DuplicateSector(name.to_string()));
            }
            seen_sectors.push(name);
        }

        for (si, sector) in sectors.iter_mut().enumerate() {
            for (ci, contract) in sector.contracts.iter_mut().enumerate() {
                contract.validate()?;
                contract.sector = sector.name.clone();
                if index.insert(contract.symbol.clone(), (si, ci)).is_some() {
                    return Err(CatalogError::DuplicateSymbol(contract.symbol.clone()));
                }
            }
        }

        Ok(Self { sectors, index })
    }

    /// The stock table of 36 exchange-traded contracts.
    pub fn builtin() -> Self {
        let sectors = builtin::sectors();
        let mut index = HashMap::new();
        for (si, sector) in sectors.iter().enumerate() {
            for (ci, contract) in sector.contracts.iter().enumerate() {
                index.insert(contract.symbol.clone(), (si, ci));
            }
        }
        Self { sectors, index }
    }

    /// Load a catalog from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a catalog from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        Self::new(CatalogConfig::from_toml(content)?)
    }

    /// Look up a contract by market-data symbol.
    pub fn get(&self, symbol: &str) -> Option<&ContractSpec> {
        self.index
            .get(symbol)
            .map(|&(si, ci)| &self.sectors[si].contracts[ci])
    }

    /// Look up a contract by broker ticker (`/ES`), case-insensitive.
    pub fn find_by_ticker(&self, ticker: &str) -> Option<&ContractSpec> {
        self.contracts()
            .find(|c| c.display_ticker.eq_ignore_ascii_case(ticker))
    }

    /// Resolve either a symbol (`ES=F`) or a ticker (`/ES`).
    pub fn resolve(&self, key: &str) -> Option<&ContractSpec> {
        self.get(key).or_else(|| self.find_by_ticker(key))
    }

    /// Sector names in declaration order.
    pub fn sector_names(&self) -> Vec<&str> {
        self.sectors.iter().map(|s| s.name.as_str()).collect()
    }

    /// Contracts of one sector, case-insensitive on the name.
    pub fn sector(&self, name: &str) -> Option<&[ContractSpec]> {
        self.sectors
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.contracts.as_slice())
    }

    pub fn sectors(&self) -> &[SectorConfig] {
        &self.sectors
    }

    /// All contracts in declaration order.
    pub fn contracts(&self) -> impl Iterator<Item = &ContractSpec> {
        self.sectors.iter().flat_map(|s| s.contracts.iter())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The configuration this catalog was built from.
    pub fn to_config(&self) -> CatalogConfig {
        CatalogConfig {
            sectors: self.sectors.clone(),
        }
    }
}
