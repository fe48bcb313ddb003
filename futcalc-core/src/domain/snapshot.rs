//! MarketSnapshot: the price and volatility the engine evaluates against.

use serde::{Deserialize, Serialize};

use super::ContractSpec;

/// Current price and ATR for one symbol, built fresh per evaluation.
///
/// Either reading may be unavailable (`None`). Construction normalizes
/// nonsensical readings to unavailable: a price must be finite and positive,
/// an ATR finite and non-negative. A zero ATR is a valid reading and stays
/// distinct from an unavailable one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSnapshot")]
pub struct MarketSnapshot {
    pub symbol: String,
    price: Option<f64>,
    atr: Option<f64>,
}

/// Wire form; deserialization goes through [`MarketSnapshot::new`].
#[derive(Deserialize)]
struct RawSnapshot {
    symbol: String,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    atr: Option<f64>,
}

impl From<RawSnapshot> for MarketSnapshot {
    fn from(raw: RawSnapshot) -> Self {
        Self::new(raw.symbol, raw.price, raw.atr)
    }
}

impl MarketSnapshot {
    pub fn new(symbol: impl Into<String>, price: Option<f64>, atr: Option<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            price: price.filter(|p| p.is_finite() && *p > 0.0),
            atr: atr.filter(|a| a.is_finite() && *a >= 0.0),
        }
    }

    /// Snapshot with nothing available.
    pub fn unavailable(symbol: impl Into<String>) -> Self {
        Self::new(symbol, None, None)
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn atr(&self) -> Option<f64> {
        self.atr
    }

    /// True when both price and ATR are present.
    pub fn is_complete(&self) -> bool {
        self.price.is_some() && self.atr.is_some()
    }

    /// Price × multiplier, when the price is known.
    pub fn notional_exposure(&self, contract: &ContractSpec) -> Option<f64> {
        self.price.map(|p| contract.notional_exposure(p))
    }

    /// ATR × multiplier: the average daily P/L swing of one contract.
    pub fn daily_pnl_range(&self, contract: &ContractSpec) -> Option<f64> {
        self.atr.map(|a| a * contract.multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonsensical_readings_become_unavailable() {
        let snap = MarketSnapshot::new("ES=F", Some(-1.0), Some(f64::NAN));
        assert_eq!(snap.price(), None);
        assert_eq!(snap.atr(), None);

        let snap = MarketSnapshot::new("ES=F", Some(0.0), Some(-0.5));
        assert_eq!(snap.price(), None);
        assert_eq!(snap.atr(), None);
    }

    #[test]
    fn deserialized_readings_are_normalized() {
        let snap: MarketSnapshot =
            serde_json::from_str(r#"{"symbol":"ES=F","price":-5.0,"atr":-1.0}"#).unwrap();
        assert_eq!(snap, MarketSnapshot::unavailable("ES=F"));

        let snap: MarketSnapshot =
            serde_json::from_str(r#"{"symbol":"CL=F","price":80.0}"#).unwrap();
        assert_eq!(snap.price(), Some(80.0));
        assert_eq!(snap.atr(), None);
    }

    #[test]
    fn zero_atr_is_a_reading() {
        let snap = MarketSnapshot::new("ES=F", Some(5000.0), Some(0.0));
        assert_eq!(snap.atr(), Some(0.0));
        assert!(snap.is_complete());
    }

    #[test]
    fn unavailable_has_no_readings() {
        let snap = MarketSnapshot::unavailable("CL=F");
        assert!(!snap.is_complete());
        assert_eq!(snap.symbol, "CL=F");
    }
}
