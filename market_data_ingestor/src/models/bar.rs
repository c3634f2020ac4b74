//! Canonical in-memory representation of a time-series bar (OHLCV).
//!
//! This struct is used as the standard output for all [`DataProvider`](crate::providers::DataProvider)
//! implementations, whatever the vendor calls its fields on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical column order of a bar table, as written by the CSV exporter.
pub const COLUMNS: [&str; 7] = ["timestamp", "symbol", "open", "high", "low", "close", "volume"];

/// A single time-series bar (OHLCV) for a given symbol and timestamp.
///
/// Field order matches [`COLUMNS`]; serializers rely on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// The timestamp for this bar (UTC).
    pub timestamp: DateTime<Utc>,

    /// The symbol this bar belongs to (e.g., "AAPL").
    pub symbol: String,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the bar interval.
    pub volume: u64,
}
