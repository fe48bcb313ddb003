//! Serializable calculator configuration.
//!
//! Every table and field has a default, so an empty file (or no file) gives
//! the stock calculator:
//!
//! ```toml
//! [account]
//! size = 100000.0
//! risk_percentage = 1.0
//! contracts = 1
//!
//! [risk]
//! atr_period = 14
//! atr_multiplier = 1.0
//! stop_multipliers = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5]
//! r_multiples = [1.0, 2.0, 2.5, 3.0]
//! sizing_policy = "minimum_one"
//!
//! [market_data]
//! timeout_secs = 10
//! max_retries = 2
//! cache_ttl_secs = 300
//! history_days = 42
//!
//! [catalog]
//! path = "contracts.toml"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogError, ContractCatalog};
use crate::data::circuit_breaker::{DEFAULT_COOLDOWN, DEFAULT_FAILURE_THRESHOLD};
use crate::data::{
    CircuitBreaker, DataError, MarketDataSource, MarketFeed, SnapshotCache, YahooProvider,
    DEFAULT_HISTORY_DAYS,
};
use crate::indicators::{VolatilityEstimator, DEFAULT_ATR_PERIOD};
use crate::risk::{
    RiskEngine, RiskError, RiskParameters, SizingPolicy, DEFAULT_R_MULTIPLES,
    DEFAULT_STOP_MULTIPLIERS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config value {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("market data: {0}")]
    Data(#[from] DataError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalculatorConfig {
    pub account: AccountConfig,
    pub risk: RiskConfig,
    pub market_data: MarketDataConfig,
    pub catalog: CatalogSource,
}

/// Default calculator inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccountConfig {
    pub size: f64,
    pub risk_percentage: f64,
    pub contracts: u32,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            size: 100_000.0,
            risk_percentage: 1.0,
            contracts: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RiskConfig {
    pub atr_period: usize,
    /// Default stop multiplier; must be one of `stop_multipliers`.
    pub atr_multiplier: f64,
    pub stop_multipliers: Vec<f64>,
    pub r_multiples: Vec<f64>,
    pub sizing_policy: SizingPolicy,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            atr_period: DEFAULT_ATR_PERIOD,
            atr_multiplier: 1.0,
            stop_multipliers: DEFAULT_STOP_MULTIPLIERS.to_vec(),
            r_multiples: DEFAULT_R_MULTIPLES.to_vec(),
            sizing_policy: SizingPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketDataConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Snapshot cache lifetime; 0 disables the cache.
    pub cache_ttl_secs: u64,
    /// Calendar days of history fetched for the ATR.
    pub history_days: u32,
    pub breaker_cooldown_secs: u64,
    pub breaker_failure_threshold: u32,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_retries: 2,
            cache_ttl_secs: 300,
            history_days: DEFAULT_HISTORY_DAYS,
            breaker_cooldown_secs: DEFAULT_COOLDOWN.as_secs(),
            breaker_failure_threshold: DEFAULT_FAILURE_THRESHOLD,
        }
    }
}

/// Where the contract table comes from. No path means the built-in table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogSource {
    pub path: Option<PathBuf>,
}

impl CalculatorConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;

        // relative catalog paths are relative to the config file
        if let (Some(catalog), Some(dir)) = (config.catalog.path.as_mut(), path.parent()) {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }
        Ok(config)
    }

    /// Parse and validate TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every default the calculator will start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.estimator()?;
        let engine = self.risk_engine()?;
        engine.validate_params(&self.default_parameters())?;

        let lookback = self.risk.atr_period + 1;
        if (self.market_data.history_days as usize) < lookback {
            return Err(ConfigError::Invalid {
                field: "market_data.history_days",
                reason: format!(
                    "{} days cannot hold the {lookback} bars an ATR({}) needs",
                    self.market_data.history_days, self.risk.atr_period
                ),
            });
        }
        if self.market_data.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "market_data.timeout_secs",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Calculator inputs from `[account]` and `[risk]`, unvalidated.
    pub fn default_parameters(&self) -> RiskParameters {
        RiskParameters {
            account_size: self.account.size,
            risk_percentage: self.account.risk_percentage,
            atr_multiplier: self.risk.atr_multiplier,
            contracts_requested: self.account.contracts,
        }
    }

    pub fn risk_engine(&self) -> Result<RiskEngine, ConfigError> {
        Ok(RiskEngine::new(
            self.risk.stop_multipliers.clone(),
            self.risk.r_multiples.clone(),
            self.risk.sizing_policy,
        )?)
    }

    pub fn estimator(&self) -> Result<VolatilityEstimator, ConfigError> {
        VolatilityEstimator::new(self.risk.atr_period).map_err(|e| ConfigError::Invalid {
            field: "risk.atr_period",
            reason: e.to_string(),
        })
    }

    /// The configured catalog file, or the built-in table.
    pub fn catalog(&self) -> Result<ContractCatalog, ConfigError> {
        match &self.catalog.path {
            Some(path) => Ok(ContractCatalog::from_file(path)?),
            None => Ok(ContractCatalog::builtin()),
        }
    }

    /// Feed over the given source with this config's estimator, cache and lookback.
    pub fn market_feed_with(
        &self,
        source: Arc<dyn MarketDataSource>,
    ) -> Result<MarketFeed, ConfigError> {
        let ttl = Duration::from_secs(self.market_data.cache_ttl_secs);
        Ok(MarketFeed::new(source)
            .with_estimator(self.estimator()?)
            .with_cache(SnapshotCache::new(ttl))
            .with_history_days(self.market_data.history_days))
    }

    /// Feed backed by Yahoo Finance behind a fresh circuit breaker.
    pub fn market_feed(&self) -> Result<MarketFeed, ConfigError> {
        let md = &self.market_data;
        let breaker = Arc::new(CircuitBreaker::new(
            Duration::from_secs(md.breaker_cooldown_secs),
            md.breaker_failure_threshold,
        ));
        let timeout = Duration::from_secs(md.timeout_secs);
        let provider = YahooProvider::new(breaker, timeout, md.max_retries)?;
        self.market_feed_with(Arc::new(provider))
    }
}
