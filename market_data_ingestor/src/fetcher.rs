//! Retrying batch fetch over a [`DataProvider`].
//!
//! Symbols are fetched one after another. Each symbol gets its own bounded
//! retry budget with a fixed delay between attempts; a symbol that exhausts
//! it is dropped from the result, never failing the batch. The outcome of
//! every symbol is kept in the [`FetchReport`] so callers can tell "no data"
//! from "gave up".

use std::time::Duration;

use crate::{
    models::{bar::Bar, bar_series::BarSeries, request_params::BarsRequestParams},
    providers::{DataProvider, ProviderError},
};

/// Bounded, fixed-delay retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per symbol, first one included. Never below 1.
    pub max_attempts: u32,
    /// Pause between two attempts of the same symbol.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(3))
    }
}

/// Retry state of a symbol that ran out of attempts.
#[derive(Debug)]
pub struct FetchAttempt {
    pub attempts: u32,
    pub last_error: ProviderError,
}

/// What happened to one symbol.
#[derive(Debug)]
pub enum SymbolFetch {
    Fetched(Vec<Bar>),
    /// The provider answered successfully with no rows.
    Empty,
    Failed(FetchAttempt),
}

/// Per-symbol outcomes of a batch, in request order.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub outcomes: Vec<(String, SymbolFetch)>,
}

impl FetchReport {
    /// Normalized table of every fetched row.
    pub fn series(&self) -> BarSeries {
        BarSeries::normalized(self.fetched_bars().cloned())
    }

    pub fn into_series(self) -> BarSeries {
        BarSeries::normalized(self.outcomes.into_iter().flat_map(|(_, outcome)| match outcome {
            SymbolFetch::Fetched(bars) => bars,
            SymbolFetch::Empty | SymbolFetch::Failed(_) => Vec::new(),
        }))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &FetchAttempt)> {
        self.outcomes.iter().filter_map(|(symbol, outcome)| match outcome {
            SymbolFetch::Failed(attempt) => Some((symbol.as_str(), attempt)),
            _ => None,
        })
    }

    pub fn empty(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|(symbol, outcome)| match outcome {
            SymbolFetch::Empty => Some(symbol.as_str()),
            _ => None,
        })
    }

    fn fetched_bars(&self) -> impl Iterator<Item = &Bar> {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                SymbolFetch::Fetched(bars) => Some(bars),
                SymbolFetch::Empty | SymbolFetch::Failed(_) => None,
            })
            .flatten()
    }
}

pub struct BarFetcher<P> {
    provider: P,
    policy: RetryPolicy,
}

impl<P: DataProvider> BarFetcher<P> {
    pub fn new(provider: P, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetches every symbol in order and reports each outcome.
    pub async fn fetch<S: AsRef<str>>(
        &self,
        symbols: &[S],
        params: &BarsRequestParams,
    ) -> FetchReport {
        let mut report = FetchReport::default();
        for symbol in symbols {
            let symbol = symbol.as_ref();
            let outcome = self.fetch_symbol(symbol, params).await;
            report.outcomes.push((symbol.to_string(), outcome));
        }

        let fetched = report
            .outcomes
            .iter()
            .filter(|(_, o)| matches!(o, SymbolFetch::Fetched(_)))
            .count();
        tracing::info!(
            requested = symbols.len(),
            fetched,
            failed = report.failed().count(),
            "bar fetch finished"
        );
        report
    }

    /// Fetches one symbol under the retry policy.
    pub async fn fetch_symbol(&self, symbol: &str, params: &BarsRequestParams) -> SymbolFetch {
        let max_attempts = self.policy.max_attempts;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.provider.fetch_bars(symbol, params).await {
                Ok(bars) if bars.is_empty() => {
                    tracing::warn!(symbol, "no data returned, skipping");
                    return SymbolFetch::Empty;
                }
                Ok(bars) => {
                    tracing::info!(symbol, rows = bars.len(), "fetched bars");
                    return SymbolFetch::Fetched(bars);
                }
                Err(err) => {
                    tracing::warn!(
                        symbol,
                        attempt,
                        max_attempts,
                        error = %err,
                        "fetch attempt failed"
                    );

                    if !err.is_retryable() || attempt >= max_attempts {
                        tracing::error!(symbol, attempts = attempt, "giving up on symbol");
                        return SymbolFetch::Failed(FetchAttempt {
                            attempts: attempt,
                            last_error: err,
                        });
                    }
                    tokio::time::sleep(self.policy.delay).await;
                }
            }
        }
    }
}
