//! Fetch → evaluate → (order) → export, one symbol at a time.

use std::path::PathBuf;

use market_data_ingestor::{
    BarFetcher, BarSeries, FetchReport,
    io::sink::{DataSink, SinkError},
    models::request_params::BarsRequestParams,
    providers::DataProvider,
};

use crate::{
    broker::{OrderAck, OrderError, OrderRequest, OrderSide, OrderSubmitter, TimeInForce},
    strategy::{MomentumError, MomentumEvaluator, MomentumSignal},
};

/// How triggered symbols are turned into orders. Absent means dry run.
pub struct OrderPlan<'a> {
    pub submitter: &'a dyn OrderSubmitter,
    pub qty: u32,
    pub time_in_force: TimeInForce,
}

impl OrderPlan<'_> {
    fn order_for(&self, symbol: &str) -> OrderRequest {
        OrderRequest::market(symbol, self.qty, OrderSide::Buy)
            .with_time_in_force(self.time_in_force)
    }
}

#[derive(Debug)]
pub struct SymbolScan {
    pub symbol: String,
    pub signal: Result<MomentumSignal, MomentumError>,
    /// Set only when an order was attempted.
    pub order: Option<Result<OrderAck, OrderError>>,
}

#[derive(Debug)]
pub struct FetchSummary {
    pub report: FetchReport,
    pub series: BarSeries,
    pub exported: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ScanSummary {
    pub fetch: FetchSummary,
    /// One entry per symbol that returned data, in input order.
    pub symbols: Vec<SymbolScan>,
}

impl ScanSummary {
    pub fn triggered(&self) -> impl Iterator<Item = &SymbolScan> {
        self.symbols
            .iter()
            .filter(|s| matches!(s.signal, Ok(MomentumSignal { triggered: true, .. })))
    }

    pub fn failed_orders(&self) -> impl Iterator<Item = (&str, &OrderError)> {
        self.symbols.iter().filter_map(|s| match &s.order {
            Some(Err(err)) => Some((s.symbol.as_str(), err)),
            _ => None,
        })
    }
}

/// Fetches `symbols` and exports whatever came back.
///
/// Symbols that fail or return nothing are skipped; only the export can fail.
pub async fn fetch_and_export<P, S>(
    fetcher: &BarFetcher<P>,
    sink: &S,
    symbols: &[String],
    params: &BarsRequestParams,
) -> Result<FetchSummary, SinkError>
where
    P: DataProvider,
    S: DataSink<Output = Option<PathBuf>>,
{
    let report = fetcher.fetch(symbols, params).await;
    let series = report.series();
    let exported = sink.write(&series).await?;
    Ok(FetchSummary {
        report,
        series,
        exported,
    })
}

/// Runs a momentum scan over `symbols`.
///
/// Each symbol's rows are evaluated on their own. With an [`OrderPlan`], a
/// market buy is submitted for every triggered symbol; a rejected order is
/// recorded and the scan moves on. The combined series is exported last.
pub async fn scan<P, S>(
    fetcher: &BarFetcher<P>,
    sink: &S,
    symbols: &[String],
    params: &BarsRequestParams,
    evaluator: &MomentumEvaluator,
    orders: Option<&OrderPlan<'_>>,
) -> Result<ScanSummary, SinkError>
where
    P: DataProvider,
    S: DataSink<Output = Option<PathBuf>>,
{
    let report = fetcher.fetch(symbols, params).await;
    let series = report.series();

    let mut results = Vec::new();
    for symbol in series.symbols() {
        let signal = evaluator.evaluate(&series.for_symbol(symbol));
        match &signal {
            Ok(s) if s.triggered => tracing::info!(symbol, "momentum signal triggered"),
            Ok(_) => {}
            Err(err) => tracing::warn!(symbol, error = %err, "could not evaluate symbol"),
        }

        let order = match (&signal, orders) {
            (Ok(MomentumSignal { triggered: true, .. }), Some(plan)) => {
                let result = plan.submitter.submit_order(&plan.order_for(symbol)).await;
                match &result {
                    Ok(ack) => tracing::info!(symbol, order_id = %ack.id, "order accepted"),
                    Err(err) => tracing::error!(symbol, error = %err, "order rejected"),
                }
                Some(result)
            }
            _ => None,
        };

        results.push(SymbolScan {
            symbol: symbol.to_string(),
            signal,
            order,
        });
    }

    let exported = sink.write(&series).await?;
    Ok(ScanSummary {
        fetch: FetchSummary {
            report,
            series,
            exported,
        },
        symbols: results,
    })
}
