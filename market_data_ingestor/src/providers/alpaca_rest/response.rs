//! Wire types of the bars endpoint.
//!
//! The serde renames below are the whole column-rename table: the API's
//! short keys `t, o, h, l, c, v` map onto the canonical [`Bar`] fields.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::bar::Bar;

#[derive(Deserialize, Debug)]
pub struct AlpacaBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: u64,
    #[serde(rename = "n", default)]
    pub trade_count: Option<u64>,
    #[serde(rename = "vw", default)]
    pub vwap: Option<f64>,
}

impl AlpacaBar {
    pub fn into_bar(self, symbol: &str) -> Bar {
        Bar {
            timestamp: self.timestamp,
            symbol: symbol.to_string(),
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        }
    }
}

/// Single-symbol bars response. `bars` is `null` when there is no data.
#[derive(Deserialize, Debug)]
pub struct AlpacaBarsResponse {
    #[serde(default)]
    pub bars: Option<Vec<AlpacaBar>>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}
