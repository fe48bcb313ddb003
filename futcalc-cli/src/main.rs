//! futcalc CLI: contract reference and position-size calculator.
//!
//! Commands:
//! - `contracts`: list the static contract specifications
//! - `table`: reference table with live price, notional, ATR and daily P/L range
//! - `calc`: stop levels, profit targets, position sizes and outcomes for one contract

mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;

use futcalc_core::catalog::{CatalogConfig, ContractCatalog};
use futcalc_core::config::CalculatorConfig;
use futcalc_core::domain::{ContractSpec, MarketSnapshot};
use futcalc_core::reference::ReferenceTable;
use futcalc_core::risk::{Direction, RiskError, RiskParameters, TradePlan};

#[derive(Parser)]
#[command(
    name = "futcalc",
    version,
    about = "futcalc: futures contract reference and position-size calculator"
)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity: -v info, -vv debug, -vvv trace. RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contract specifications (no network).
    Contracts {
        /// Only this sector (e.g. Energy).
        #[arg(long)]
        sector: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Reference table with live market data.
    Table {
        /// Only this sector (e.g. Metals).
        #[arg(long)]
        sector: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Risk calculator for one contract.
    Calc {
        /// Market-data symbol (ES=F) or broker ticker (/ES).
        symbol: String,

        /// Account size in dollars.
        #[arg(long)]
        account: Option<f64>,

        /// Percent of the account to risk (0 < P <= 100).
        #[arg(long)]
        risk_pct: Option<f64>,

        /// ATR multiple for the stop; one of the configured stop multipliers.
        #[arg(long)]
        atr_mult: Option<f64>,

        /// Contracts you intend to trade.
        #[arg(long)]
        contracts: Option<u32>,

        /// Trade direction.
        #[arg(long, value_enum, default_value_t = DirectionArg::Both)]
        direction: DirectionArg,

        /// Entry price; with --atr, skips the network.
        #[arg(long, requires = "atr")]
        price: Option<f64>,

        /// ATR in price points; with --price, skips the network.
        #[arg(long, requires = "price")]
        atr: Option<f64>,

        /// Print JSON instead of tables.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DirectionArg {
    Long,
    Short,
    Both,
}

impl DirectionArg {
    fn directions(self) -> &'static [Direction] {
        match self {
            Self::Long => &[Direction::Long],
            Self::Short => &[Direction::Short],
            Self::Both => &Direction::BOTH,
        }
    }
}

/// Overrides from the `calc` flags.
struct CalcArgs {
    symbol: String,
    account: Option<f64>,
    risk_pct: Option<f64>,
    atr_mult: Option<f64>,
    contracts: Option<u32>,
    direction: DirectionArg,
    price: Option<f64>,
    atr: Option<f64>,
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => CalculatorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CalculatorConfig::default(),
    };
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Contracts { sector, json } => run_contracts(&config, sector.as_deref(), json),
        Commands::Table { sector, json } => run_table(&config, sector.as_deref(), json),
        Commands::Calc {
            symbol,
            account,
            risk_pct,
            atr_mult,
            contracts,
            direction,
            price,
            atr,
            json,
        } => run_calc(
            &config,
            CalcArgs {
                symbol,
                account,
                risk_pct,
                atr_mult,
                contracts,
                direction,
                price,
                atr,
                json,
            },
        ),
    }
}

/// stderr subscriber: RUST_LOG if set, otherwise warn raised by each -v.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .init();
}

fn load_catalog(config: &CalculatorConfig) -> Result<ContractCatalog> {
    config.catalog().context("loading contract catalog")
}

fn check_sector(catalog: &ContractCatalog, sector: &str) -> Result<()> {
    if catalog.sector(sector).is_none() {
        bail!(
            "unknown sector '{sector}'. Valid: {}",
            catalog.sector_names().join(", ")
        );
    }
    Ok(())
}

fn run_contracts(config: &CalculatorConfig, sector: Option<&str>, json: bool) -> Result<()> {
    let catalog = load_catalog(config)?;
    let mut sectors = catalog.sectors().to_vec();
    if let Some(name) = sector {
        check_sector(&catalog, name)?;
        sectors.retain(|s| s.name.eq_ignore_ascii_case(name));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&sectors)?);
    } else {
        print!("{}", render::contracts(&sectors));
    }
    Ok(())
}

fn run_table(config: &CalculatorConfig, sector: Option<&str>, json: bool) -> Result<()> {
    let catalog = load_catalog(config)?;
    if let Some(name) = sector {
        check_sector(&catalog, name)?;
    }
    let feed = config.market_feed().context("setting up market data")?;

    let table = match sector {
        Some(name) => {
            let filtered = ContractCatalog::new(CatalogConfig {
                sectors: catalog
                    .sectors()
                    .iter()
                    .filter(|s| s.name.eq_ignore_ascii_case(name))
                    .cloned()
                    .collect(),
            })?;
            ReferenceTable::build(&filtered, &feed)
        }
        None => ReferenceTable::build(&catalog, &feed),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        print!("{}", render::reference_table(&table));
    }
    Ok(())
}

#[derive(Serialize)]
struct CalcOutput<'a> {
    contract: &'a ContractSpec,
    snapshot: &'a MarketSnapshot,
    params: &'a RiskParameters,
    plans: Vec<TradePlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    insufficient_data: Option<String>,
}

fn run_calc(config: &CalculatorConfig, args: CalcArgs) -> Result<()> {
    let catalog = load_catalog(config)?;
    let Some(contract) = catalog.resolve(&args.symbol) else {
        bail!(
            "unknown symbol '{}'. Run `futcalc contracts` to list symbols and tickers",
            args.symbol
        );
    };

    let defaults = config.default_parameters();
    let params = RiskParameters {
        account_size: args.account.unwrap_or(defaults.account_size),
        risk_percentage: args.risk_pct.unwrap_or(defaults.risk_percentage),
        atr_multiplier: args.atr_mult.unwrap_or(defaults.atr_multiplier),
        contracts_requested: args.contracts.unwrap_or(defaults.contracts_requested),
    };
    let engine = config.risk_engine()?;
    engine
        .validate_params(&params)
        .context("invalid calculator parameters")?;

    let snapshot = match (args.price, args.atr) {
        (Some(price), Some(atr)) => {
            let snapshot = MarketSnapshot::new(&contract.symbol, Some(price), Some(atr));
            if !snapshot.is_complete() {
                bail!("--price must be positive and --atr must be zero or positive");
            }
            snapshot
        }
        _ => config
            .market_feed()
            .context("setting up market data")?
            .snapshot(&contract.symbol),
    };

    let mut plans = Vec::new();
    let mut insufficient = None;
    for &direction in args.direction.directions() {
        match engine.plan(contract, &snapshot, &params, direction) {
            Ok(plan) => plans.push(plan),
            Err(e @ RiskError::InsufficientData { .. }) => {
                insufficient = Some(e);
                break;
            }
            Err(e) => return Err(e).context("invalid calculator parameters"),
        }
    }

    if args.json {
        let output = CalcOutput {
            contract,
            snapshot: &snapshot,
            params: &params,
            plans,
            insufficient_data: insufficient.map(|e| e.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("{}", render::calc_header(contract, &snapshot, &params));
    match insufficient {
        Some(e) => print!("{}", render::insufficient_data(&e)),
        None => {
            for plan in &plans {
                print!("{}", render::plan(contract, plan));
            }
        }
    }
    Ok(())
}
