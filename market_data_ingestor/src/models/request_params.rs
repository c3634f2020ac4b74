use chrono::{DateTime, Utc};

use crate::{models::timeframe::TimeFrame, providers::alpaca_rest::AlpacaBarsParams};

/// Vendor-agnostic parameters for one symbol's bars request.
///
/// The symbol itself is passed separately so the same params can drive a
/// whole batch.
#[derive(Clone, Debug)]
pub struct BarsRequestParams {
    /// The time interval for each bar (e.g., 1 minute, 1 day).
    ///
    /// **Validation of allowed values is performed by each data provider
    /// implementation, according to their own API rules.**
    pub timeframe: TimeFrame,

    /// Maximum number of rows to return. `None` leaves it to the provider.
    pub limit: Option<u32>,

    /// Start of the requested time range (inclusive, UTC).
    pub start: Option<DateTime<Utc>>,

    /// End of the requested time range (UTC).
    pub end: Option<DateTime<Utc>>,

    /// Optional, provider-specific parameters.
    pub provider_specific: ProviderParams,
}

impl BarsRequestParams {
    pub fn new(timeframe: TimeFrame, limit: u32) -> Self {
        Self {
            timeframe,
            limit: Some(limit),
            start: None,
            end: None,
            provider_specific: ProviderParams::None,
        }
    }
}

/// An enum to hold provider-specific request parameters.
///
/// This allows callers to specify detailed, per-request options for a
/// particular provider without cluttering the universal `BarsRequestParams`.
#[derive(Clone, Debug, Default)]
pub enum ProviderParams {
    #[default]
    None,
    Alpaca(AlpacaBarsParams),
}
