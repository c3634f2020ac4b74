use anyhow::{Context, Result, bail};
use clap::Parser;
use market_data_ingestor::{
    BarFetcher,
    io::csv_sink::CsvExporter,
    models::request_params::BarsRequestParams,
    providers::alpaca_rest::{AlpacaCredentials, AlpacaProvider},
};
use momentum_bot::{
    broker::{AlpacaTradingClient, OrderRequest, OrderSubmitter},
    cli::{Cli, Cmd, FetchArgs, OrderArgs, ScanArgs, normalize_symbols},
    config::AppConfig,
    pipeline::{self, FetchSummary, OrderPlan, ScanSummary},
    strategy::MomentumEvaluator,
};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();
    shared_utils::logging::init("info");

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let credentials = AlpacaCredentials::from_env().context("Alpaca credentials are not set")?;

    match cli.cmd {
        Cmd::Fetch(args) => fetch(&config, &credentials, args).await,
        Cmd::Scan(args) => scan(&config, &credentials, args).await,
        Cmd::Order(args) => order(&config, &credentials, args).await,
        Cmd::Account => account(&config, &credentials).await,
    }
}

fn fetcher(
    config: &AppConfig,
    credentials: &AlpacaCredentials,
) -> Result<BarFetcher<AlpacaProvider>> {
    let provider =
        AlpacaProvider::with_credentials(credentials, &config.data.base_url, config.data.timeout())
            .context("failed to build market data client")?;
    Ok(BarFetcher::new(provider, config.data.retry_policy()))
}

fn trading_client(
    config: &AppConfig,
    credentials: &AlpacaCredentials,
) -> Result<AlpacaTradingClient> {
    AlpacaTradingClient::with_credentials(
        credentials,
        &config.trading.base_url,
        config.data.timeout(),
    )
    .context("failed to build trading client")
}

async fn fetch(config: &AppConfig, credentials: &AlpacaCredentials, args: FetchArgs) -> Result<()> {
    let symbols = normalize_symbols(&args.symbols);
    let params = BarsRequestParams::new(args.timeframe, args.limit);
    let exporter = CsvExporter::new(&config.export.dir);

    let summary =
        pipeline::fetch_and_export(&fetcher(config, credentials)?, &exporter, &symbols, &params)
            .await
            .context("failed to export bars")?;
    print_fetch(&summary);
    Ok(())
}

async fn scan(config: &AppConfig, credentials: &AlpacaCredentials, args: ScanArgs) -> Result<()> {
    let symbols = if args.symbols.is_empty() {
        normalize_symbols(&config.scan.symbols)
    } else {
        normalize_symbols(&args.symbols)
    };
    let params = BarsRequestParams::new(
        args.timeframe.unwrap_or(config.scan.timeframe),
        args.limit.unwrap_or(config.scan.limit),
    );
    let exporter = CsvExporter::new(&config.export.dir);
    let evaluator = MomentumEvaluator::new(config.strategy);

    let client = if args.submit || config.trading.submit_orders {
        Some(trading_client(config, credentials)?)
    } else {
        tracing::info!("dry run, no orders will be submitted");
        None
    };
    let plan = client.as_ref().map(|client| OrderPlan {
        submitter: client,
        qty: args.qty.unwrap_or(config.trading.order_qty),
        time_in_force: config.trading.time_in_force,
    });

    let summary = pipeline::scan(
        &fetcher(config, credentials)?,
        &exporter,
        &symbols,
        &params,
        &evaluator,
        plan.as_ref(),
    )
    .await
    .context("failed to export bars")?;
    print_scan(&summary);

    let failed = summary.failed_orders().count();
    if failed > 0 {
        bail!("{failed} order(s) were rejected");
    }
    Ok(())
}

async fn order(config: &AppConfig, credentials: &AlpacaCredentials, args: OrderArgs) -> Result<()> {
    let request = OrderRequest {
        symbol: args.symbol.trim().to_uppercase(),
        qty: args.qty,
        side: args.side,
        order_type: args.order_type,
        time_in_force: args.time_in_force,
        limit_price: args.limit_price,
        stop_price: args.stop_price,
    };

    let ack = trading_client(config, credentials)?
        .submit_order(&request)
        .await
        .with_context(|| format!("order for {} failed", request.symbol))?;
    println!(
        "order {} accepted ({})",
        ack.id,
        ack.status.as_deref().unwrap_or("unknown status")
    );
    Ok(())
}

async fn account(config: &AppConfig, credentials: &AlpacaCredentials) -> Result<()> {
    let account = trading_client(config, credentials)?
        .account()
        .await
        .context("failed to read account")?;
    println!("account:      {}", account.id);
    println!("status:       {}", account.status);
    println!("cash:         {}", account.cash);
    println!("buying power: {}", account.buying_power);
    println!("equity:       {}", account.equity);
    Ok(())
}

fn print_fetch(summary: &FetchSummary) {
    for (symbol, attempt) in summary.report.failed() {
        println!("{symbol}: failed after {} attempt(s): {}", attempt.attempts, attempt.last_error);
    }
    for symbol in summary.report.empty() {
        println!("{symbol}: no data");
    }
    match &summary.exported {
        Some(path) => println!("wrote {} rows to {}", summary.series.len(), path.display()),
        None => println!("nothing to export"),
    }
}

fn print_scan(summary: &ScanSummary) {
    for scan in &summary.symbols {
        match &scan.signal {
            Ok(signal) => match signal.metrics {
                Some(m) => println!(
                    "{}: change {:+.2}% volume x{:.2}{}",
                    scan.symbol,
                    m.price_change_pct,
                    m.volume_ratio,
                    if signal.triggered { "  TRIGGERED" } else { "" }
                ),
                None => println!("{}: not enough data", scan.symbol),
            },
            Err(err) => println!("{}: {err}", scan.symbol),
        }
        match &scan.order {
            Some(Ok(ack)) => println!("  order {} submitted", ack.id),
            Some(Err(err)) => println!("  order failed: {err}"),
            None => {}
        }
    }
    print_fetch(&summary.fetch);
}
