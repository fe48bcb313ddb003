//! Plain-text rendering of catalog, reference-table and calculator output.
//!
//! Renderers build strings; `main` decides where they go. Unavailable readings
//! print as `N/A`, never as zero.

use std::fmt::Write as _;

use futcalc_core::catalog::SectorConfig;
use futcalc_core::domain::{ContractSpec, MarketSnapshot, TickRounding};
use futcalc_core::reference::ReferenceTable;
use futcalc_core::risk::{Direction, RiskError, RiskParameters, TradePlan};

pub const NA: &str = "N/A";

/// Decimal places needed to show every multiple of `tick` exactly.
pub fn tick_decimals(tick: f64) -> usize {
    (0..=8)
        .find(|&d| {
            let scaled = tick * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-9
        })
        .unwrap_or(8)
}

/// Price rounded onto the contract's tick grid, printed at tick precision.
pub fn price(contract: &ContractSpec, value: f64) -> String {
    let decimals = tick_decimals(contract.tick_size);
    format!("{:.*}", decimals, contract.round_price(value, TickRounding::Nearest))
}

pub fn opt_price(contract: &ContractSpec, value: Option<f64>) -> String {
    value.map_or_else(|| NA.to_string(), |v| price(contract, v))
}

/// Dollars with thousands separators: `$1,234.50`, `-$75.00`.
pub fn money(value: f64) -> String {
    if !value.is_finite() {
        return NA.to_string();
    }
    let cents = format!("{:.2}", value.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

pub fn opt_money(value: Option<f64>) -> String {
    value.map_or_else(|| NA.to_string(), money)
}

/// Static contract specifications, one block per sector.
pub fn contracts(sectors: &[SectorConfig]) -> String {
    let mut out = String::new();
    for sector in sectors {
        let _ = writeln!(out, "== {} ==", sector.name);
        let _ = writeln!(
            out,
            "{:<7} {:<28} {:<7} {:>10} {:>10} {:>10} {:>11}  {}",
            "Ticker", "Name", "Symbol", "Tick", "Multiplier", "$/Tick", "Margin", "ETF"
        );
        let _ = writeln!(out, "{}", "-".repeat(98));
        for c in &sector.contracts {
            let _ = writeln!(
                out,
                "{:<7} {:<28} {:<7} {:>10} {:>10} {:>10} {:>11}  {} {}",
                c.display_ticker,
                c.name,
                c.symbol,
                c.tick_size,
                c.multiplier,
                money(c.value_per_tick()),
                money(c.initial_margin),
                c.etf_equivalent,
                c.etf_share_estimate,
            );
        }
        out.push('\n');
    }
    out
}

/// The live reference table, one block per sector.
pub fn reference_table(table: &ReferenceTable) -> String {
    let mut out = String::new();
    for sector in &table.sectors {
        let _ = writeln!(out, "== {} ==", sector.sector);
        let _ = writeln!(
            out,
            "{:<7} {:<28} {:>10} {:>12} {:>15} {:>10} {:>14}",
            "Ticker", "Name", "$/Tick", "Price", "Notional", "ATR", "Daily P/L"
        );
        let _ = writeln!(out, "{}", "-".repeat(102));
        for row in &sector.rows {
            let c = &row.contract;
            let _ = writeln!(
                out,
                "{:<7} {:<28} {:>10} {:>12} {:>15} {:>10} {:>14}",
                c.display_ticker,
                c.name,
                money(row.value_per_tick),
                opt_price(c, row.price),
                opt_money(row.notional_exposure),
                row.atr.map_or_else(|| NA.to_string(), |a| format!("{a:.4}")),
                opt_money(row.daily_pnl_range),
            );
        }
        out.push('\n');
    }

    let total = table.rows().count();
    let missing = total - table.complete_count();
    if missing > 0 {
        let _ = writeln!(
            out,
            "{missing} of {total} contracts have incomplete market data (shown as {NA})."
        );
    }
    out
}

/// Header with the contract, the market readings and the risk inputs.
pub fn calc_header(
    contract: &ContractSpec,
    snapshot: &MarketSnapshot,
    params: &RiskParameters,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}) - {}",
        contract.name, contract.display_ticker, contract.notional_description
    );
    let _ = writeln!(
        out,
        "Tick {} = {} | Multiplier {} | Margin {}",
        contract.tick_size,
        money(contract.value_per_tick()),
        contract.multiplier,
        money(contract.initial_margin)
    );
    let _ = writeln!(
        out,
        "Price {} | ATR {} | Notional {} | Daily P/L range {}",
        opt_price(contract, snapshot.price()),
        snapshot.atr().map_or_else(|| NA.to_string(), |a| format!("{a:.4}")),
        opt_money(snapshot.notional_exposure(contract)),
        opt_money(snapshot.daily_pnl_range(contract)),
    );
    let _ = writeln!(
        out,
        "Account {} | Risk {}% | Stop {}x ATR | Contracts {}",
        money(params.account_size),
        params.risk_percentage,
        params.atr_multiplier,
        params.contracts_requested
    );
    out
}

/// Stops, targets, position sizes and outcomes for one direction.
pub fn plan(contract: &ContractSpec, trade: &TradePlan) -> String {
    let mut out = String::new();
    let title = match trade.direction {
        Direction::Long => "LONG",
        Direction::Short => "SHORT",
    };
    let _ = writeln!(out, "\n=== {title} from {} ===", price(contract, trade.entry_price));

    let _ = writeln!(out, "\nStop losses");
    let _ = writeln!(
        out,
        "{:>6} {:>12} {:>9} {:>12} {:>14}",
        "ATR x", "Distance", "Ticks", "Stop", "Risk/contract"
    );
    for level in &trade.stop_levels {
        let marker = if level == &trade.selected_stop { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker}{:>5} {:>12.4} {:>9.1} {:>12} {:>14}",
            level.atr_multiplier,
            level.stop_distance,
            level.stop_distance_ticks,
            price(contract, level.stop_price),
            money(level.stop_loss_amount_per_contract),
        );
    }

    let _ = writeln!(
        out,
        "\nProfit targets (from {}x ATR stop)",
        trade.selected_stop.atr_multiplier
    );
    let _ = writeln!(
        out,
        "{:>6} {:>12} {:>12} {:>16}",
        "R", "Distance", "Target", "Reward/contract"
    );
    for target in &trade.targets {
        let _ = writeln!(
            out,
            "{:>6} {:>12.4} {:>12} {:>16}",
            target.r_multiple,
            target.target_distance,
            price(contract, target.target_price),
            money(target.target_amount_per_contract),
        );
    }

    let _ = writeln!(
        out,
        "\nPosition size (budget {}, max {} contracts)",
        money(trade.sizing.risk_amount),
        trade.sizing.max_contracts_by_risk
    );
    let _ = writeln!(out, "{:<10} {:>9} {:>14} {:>10}", "", "Contracts", "Risk", "% Account");
    for row in &trade.position_sizes {
        let _ = writeln!(
            out,
            "{:<10} {:>9} {:>14} {:>9.2}%",
            row.label.as_str(),
            row.contracts,
            money(row.risk_amount),
            row.risk_percent_of_account,
        );
    }

    let _ = writeln!(out, "\nOutcomes");
    let _ = writeln!(out, "{:>6} {:<10} {:>9} {:>14}", "R", "Size", "Contracts", "Profit");
    for outcome in &trade.outcomes {
        let _ = writeln!(
            out,
            "{:>6} {:<10} {:>9} {:>14}",
            outcome.r_multiple,
            outcome.label.as_str(),
            outcome.contracts,
            money(outcome.profit),
        );
    }
    out
}

/// Message shown instead of a plan when price or ATR is missing.
pub fn insufficient_data(err: &RiskError) -> String {
    format!("\n{err}.\nStop levels, targets and position sizes: {NA}\n")
}
