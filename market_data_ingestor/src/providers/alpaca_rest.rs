//! Alpaca market-data REST provider.

mod auth;
pub mod params;
pub mod provider;
pub mod response;

pub use auth::{AlpacaCredentials, KEY_ID_HEADER, SECRET_KEY_HEADER};
pub use params::{Adjustment, AlpacaBarsParams, Feed, Sort};
pub use provider::AlpacaProvider;

/// Default market-data endpoint root.
pub const DEFAULT_DATA_URL: &str = "https://data.alpaca.markets/v2";
