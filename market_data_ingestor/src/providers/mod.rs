//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, a unified interface for
//! fetching one symbol's bars from a market data vendor. Concrete vendors
//! (currently [`alpaca_rest`]) implement it; the retrying batch loop in
//! [`crate::fetcher`] only ever sees the trait.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data_ingestor::models::{bar::Bar, request_params::BarsRequestParams};
//! use market_data_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_bars(
//!         &self,
//!         _symbol: &str,
//!         _params: &BarsRequestParams,
//!     ) -> Result<Vec<Bar>, ProviderError> {
//!         Ok(vec![])
//!     }
//! }
//! ```
pub mod alpaca_rest;
pub mod errors;

use async_trait::async_trait;

pub use errors::{ProviderError, ProviderInitError};

use crate::models::{bar::Bar, request_params::BarsRequestParams};

/// Trait for fetching time-series bar data from a market data provider.
///
/// Implementations make a single logical request (following pagination if
/// the vendor has it) and do not retry; retrying is the caller's job.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the bars of `symbol`.
    ///
    /// * `Ok(bars)` - possibly empty; every bar carries `symbol`.
    /// * `Err(ProviderError)` - transport, HTTP or validation failure.
    async fn fetch_bars(
        &self,
        symbol: &str,
        params: &BarsRequestParams,
    ) -> Result<Vec<Bar>, ProviderError>;
}

#[async_trait]
impl<P: DataProvider + ?Sized> DataProvider for Box<P> {
    async fn fetch_bars(
        &self,
        symbol: &str,
        params: &BarsRequestParams,
    ) -> Result<Vec<Bar>, ProviderError> {
        (**self).fetch_bars(symbol, params).await
    }
}
