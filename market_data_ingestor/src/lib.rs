//! Market data acquisition: a retrying bar fetcher over pluggable providers,
//! the canonical bar model, and CSV export.

pub mod config;
pub mod fetcher;
pub mod io;
pub mod models;
pub mod providers;

pub use fetcher::{BarFetcher, FetchAttempt, FetchReport, RetryPolicy, SymbolFetch};
pub use models::{bar::Bar, bar_series::BarSeries, timeframe::TimeFrame};
