use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use market_data_ingestor::TimeFrame;

use crate::broker::{OrderSide, OrderType, TimeInForce};

#[derive(Debug, Parser)]
#[command(version, about = "Momentum scanner and order client for Alpaca-style APIs")]
pub struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Fetch bars and export them to CSV
    Fetch(FetchArgs),
    /// Fetch, evaluate momentum per symbol, optionally order, export
    Scan(ScanArgs),
    /// Submit a single order
    Order(OrderArgs),
    /// Show trading account status
    Account,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Comma-separated list of symbols (e.g. "AAPL,MSFT")
    #[arg(long, value_delimiter = ',', required = true)]
    pub symbols: Vec<String>,

    /// Bar size, e.g. 1Min, 15Min, 1Hour, 1Day (short forms like 5m work too)
    #[arg(long, default_value = "1Day")]
    pub timeframe: TimeFrame,

    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Comma-separated list of symbols; `[scan] symbols` when omitted
    #[arg(long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Overrides `[scan] timeframe`
    #[arg(long)]
    pub timeframe: Option<TimeFrame>,

    /// Overrides `[scan] limit`
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Submit a market buy for each triggered symbol
    #[arg(long)]
    pub submit: bool,

    /// Overrides `[trading] order_qty`
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub qty: Option<u32>,
}

#[derive(Debug, Args)]
pub struct OrderArgs {
    #[arg(long)]
    pub symbol: String,

    #[arg(long)]
    pub qty: u32,

    #[arg(long, value_enum)]
    pub side: OrderSide,

    #[arg(long = "type", value_enum, default_value_t = OrderType::Market)]
    pub order_type: OrderType,

    #[arg(long, value_enum, default_value_t = TimeInForce::Gtc)]
    pub time_in_force: TimeInForce,

    #[arg(long)]
    pub limit_price: Option<f64>,

    #[arg(long)]
    pub stop_price: Option<f64>,
}

/// Trims, upper-cases and drops blank entries.
pub fn normalize_symbols(symbols: &[String]) -> Vec<String> {
    symbols
        .iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}
