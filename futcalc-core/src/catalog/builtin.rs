//! The stock contract table.

use super::SectorConfig;
use crate::domain::ContractSpec;

#[allow(clippy::too_many_arguments)]
fn spec(
    name: &str,
    symbol: &str,
    ticker: &str,
    notional: &str,
    tick_size: f64,
    multiplier: f64,
    etf: &str,
    etf_shares: &str,
    initial_margin: f64,
) -> ContractSpec {
    ContractSpec {
        symbol: symbol.into(),
        display_ticker: ticker.into(),
        name: name.into(),
        sector: String::new(),
        notional_description: notional.into(),
        tick_size,
        multiplier,
        initial_margin,
        etf_equivalent: etf.into(),
        etf_share_estimate: etf_shares.into(),
    }
}

fn sector(name: &str, contracts: Vec<ContractSpec>) -> SectorConfig {
    let contracts = contracts
        .into_iter()
        .map(|mut c| {
            c.sector = name.to_string();
            c
        })
        .collect();
    SectorConfig {
        name: name.to_string(),
        contracts,
    }
}

/// Sectors in display order. Margins are approximate exchange SPAN figures.
pub(super) fn sectors() -> Vec<SectorConfig> {
    vec![
        sector(
            "Equity",
            vec![
                spec(
                    "E-mini S&P 500",
                    "ES=F",
                    "/ES",
                    "S&P 500 Index x $50",
                    0.25,
                    50.0,
                    "SPY",
                    "~500 shares",
                    12650.0,
                ),
                spec(
                    "Micro E-mini S&P 500",
                    "MES=F",
                    "/MES",
                    "S&P 500 Index x $5",
                    0.25,
                    5.0,
                    "SPY",
                    "~50 shares",
                    1265.0,
                ),
                spec(
                    "E-mini Nasdaq-100",
                    "NQ=F",
                    "/NQ",
                    "Nasdaq-100 Index x $20",
                    0.25,
                    20.0,
                    "QQQ",
                    "~200 shares",
                    16500.0,
                ),
                spec(
                    "Micro E-mini Nasdaq-100",
                    "MNQ=F",
                    "/MNQ",
                    "Nasdaq-100 Index x $2",
                    0.25,
                    2.0,
                    "QQQ",
                    "~20 shares",
                    1650.0,
                ),
                spec(
                    "E-mini Dow",
                    "YM=F",
                    "/YM",
                    "DJIA x $5",
                    1.0,
                    5.0,
                    "DIA",
                    "~150 shares",
                    10450.0,
                ),
                spec(
                    "Micro E-mini Dow",
                    "MYM=F",
                    "/MYM",
                    "DJIA x $0.50",
                    1.0,
                    0.5,
                    "DIA",
                    "~15 shares",
                    1045.0,
                ),
                spec(
                    "E-mini Russell 2000",
                    "RTY=F",
                    "/RTY",
                    "Russell 2000 Index x $50",
                    0.1,
                    50.0,
                    "IWM",
                    "~250 shares",
                    8250.0,
                ),
                spec(
                    "Micro E-mini Russell 2000",
                    "M2K=F",
                    "/M2K",
                    "Russell 2000 Index x $5",
                    0.1,
                    5.0,
                    "IWM",
                    "~25 shares",
                    825.0,
                ),
            ],
        ),
        sector(
            "Energy",
            vec![
                spec(
                    "Crude Oil",
                    "CL=F",
                    "/CL",
                    "1,000 barrels",
                    0.01,
                    1000.0,
                    "USO",
                    "~700 shares",
                    6050.0,
                ),
                spec(
                    "Micro WTI Crude Oil",
                    "MCL=F",
                    "/MCL",
                    "100 barrels",
                    0.01,
                    100.0,
                    "USO",
                    "~70 shares",
                    605.0,
                ),
                spec(
                    "Natural Gas",
                    "NG=F",
                    "/NG",
                    "10,000 MMBtu",
                    0.001,
                    10000.0,
                    "UNG",
                    "~900 shares",
                    3300.0,
                ),
                spec(
                    "Micro Natural Gas",
                    "MNG=F",
                    "/MNG",
                    "1,000 MMBtu",
                    0.001,
                    1000.0,
                    "UNG",
                    "~90 shares",
                    330.0,
                ),
            ],
        ),
        sector(
            "Metals",
            vec![
                spec(
                    "Gold",
                    "GC=F",
                    "/GC",
                    "100 troy ounces",
                    0.1,
                    100.0,
                    "GLD",
                    "~550 shares",
                    11000.0,
                ),
                spec(
                    "Micro Gold",
                    "MGC=F",
                    "/MGC",
                    "10 troy ounces",
                    0.1,
                    10.0,
                    "GLD",
                    "~55 shares",
                    1100.0,
                ),
                spec(
                    "Silver",
                    "SI=F",
                    "/SI",
                    "5,000 troy ounces",
                    0.005,
                    5000.0,
                    "SLV",
                    "~1000 shares",
                    9900.0,
                ),
                spec(
                    "Micro Silver",
                    "SIL=F",
                    "/SIL",
                    "1,000 troy ounces",
                    0.005,
                    1000.0,
                    "SLV",
                    "~200 shares",
                    1980.0,
                ),
                spec(
                    "Copper",
                    "HG=F",
                    "/HG",
                    "25,000 pounds",
                    0.0005,
                    25000.0,
                    "CPER",
                    "~600 shares",
                    7150.0,
                ),
            ],
        ),
        sector(
            "Currency",
            vec![
                spec(
                    "Euro FX",
                    "6E=F",
                    "/6E",
                    "€125,000",
                    0.00005,
                    125000.0,
                    "FXE",
                    "~1100 shares",
                    2750.0,
                ),
                spec(
                    "Micro E-mini Euro",
                    "M6E=F",
                    "/M6E",
                    "€12,500",
                    0.00005,
                    12500.0,
                    "FXE",
                    "~110 shares",
                    275.0,
                ),
                spec(
                    "Japanese Yen",
                    "6J=F",
                    "/6J",
                    "¥12,500,000",
                    0.0000005,
                    12500000.0,
                    "FXY",
                    "~1500 shares",
                    2750.0,
                ),
                spec(
                    "British Pound",
                    "6B=F",
                    "/6B",
                    "£62,500",
                    0.0001,
                    62500.0,
                    "FXB",
                    "~600 shares",
                    2750.0,
                ),
            ],
        ),
        sector(
            "Volatility",
            vec![
                spec(
                    "VIX Futures",
                    "VX=F",
                    "/VX",
                    "$1,000 x VIX Index",
                    0.05,
                    1000.0,
                    "VXX",
                    "~400 shares",
                    8250.0,
                ),
                spec(
                    "Micro VIX Futures",
                    "VXM=F",
                    "/VXM",
                    "$100 x VIX Index",
                    0.05,
                    100.0,
                    "VXX",
                    "~40 shares",
                    825.0,
                ),
            ],
        ),
        sector(
            "Crypto",
            vec![
                spec(
                    "Bitcoin Futures",
                    "BTC=F",
                    "/BTC",
                    "5 bitcoin",
                    5.0,
                    5.0,
                    "BITO",
                    "~2000 shares",
                    40150.0,
                ),
                spec(
                    "Micro Bitcoin Futures",
                    "MBT=F",
                    "/MBT",
                    "0.1 bitcoin",
                    0.5,
                    0.1,
                    "BITO",
                    "~40 shares",
                    803.0,
                ),
                spec(
                    "Ethereum Futures",
                    "ETH=F",
                    "/ETH",
                    "50 ether",
                    0.25,
                    50.0,
                    "ETHA",
                    "~1500 shares",
                    22000.0,
                ),
                spec(
                    "Micro Ethereum Futures",
                    "MET=F",
                    "/MET",
                    "0.1 ether",
                    0.25,
                    0.1,
                    "ETHA",
                    "~3 shares",
                    440.0,
                ),
            ],
        ),
        sector(
            "Grains",
            vec![
                spec(
                    "Corn",
                    "ZC=F",
                    "/ZC",
                    "5,000 bushels",
                    0.25,
                    50.0,
                    "CORN",
                    "~300 shares",
                    2475.0,
                ),
                spec(
                    "Soybeans",
                    "ZS=F",
                    "/ZS",
                    "5,000 bushels",
                    0.25,
                    50.0,
                    "SOYB",
                    "~400 shares",
                    3300.0,
                ),
                spec(
                    "Wheat",
                    "ZW=F",
                    "/ZW",
                    "5,000 bushels",
                    0.25,
                    50.0,
                    "WEAT",
                    "~350 shares",
                    2750.0,
                ),
            ],
        ),
        sector(
            "Livestock",
            vec![
                spec(
                    "Live Cattle",
                    "LE=F",
                    "/LE",
                    "40,000 pounds",
                    0.025,
                    400.0,
                    "COW",
                    "~200 shares",
                    2200.0,
                ),
                spec(
                    "Lean Hogs",
                    "HE=F",
                    "/HE",
                    "40,000 pounds",
                    0.025,
                    400.0,
                    "COW",
                    "~200 shares",
                    2200.0,
                ),
            ],
        ),
        sector(
            "Treasuries",
            vec![
                spec(
                    "10-Year T-Note",
                    "ZN=F",
                    "/ZN",
                    "$100,000 face value",
                    0.015625,
                    1000.0,
                    "IEF",
                    "~900 shares",
                    2750.0,
                ),
                spec(
                    "2-Year T-Note",
                    "ZT=F",
                    "/ZT",
                    "$200,000 face value",
                    0.0078125,
                    2000.0,
                    "SHY",
                    "~2300 shares",
                    1100.0,
                ),
                spec(
                    "30-Year T-Bond",
                    "ZB=F",
                    "/ZB",
                    "$100,000 face value",
                    0.03125,
                    1000.0,
                    "TLT",
                    "~650 shares",
                    4400.0,
                ),
                spec(
                    "Ultra T-Bond",
                    "UB=F",
                    "/UB",
                    "$100,000 face value",
                    0.03125,
                    1000.0,
                    "TLT",
                    "~700 shares",
                    5500.0,
                ),
            ],
        ),
    ]
}
