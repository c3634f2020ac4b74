//! Brokerage-side actions: order submission and account status.
//!
//! [`OrderSubmitter`] is deliberately thin. It forwards the request as-is:
//! no quantity or balance checks, no retry, no idempotency key. Dry runs are
//! the caller's decision not to call it.

pub mod account;
pub mod alpaca;
pub mod orders;

use async_trait::async_trait;
use thiserror::Error;

pub use account::Account;
pub use alpaca::AlpacaTradingClient;
pub use orders::{OrderAck, OrderRequest, OrderSide, OrderType, TimeInForce};

#[derive(Debug, Error)]
pub enum OrderError {
    /// Transport failure or undecodable response.
    #[error("broker request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The broker rejected the call.
    #[error("broker API error ({status}): {message}")]
    Api { status: u16, message: String },
}

#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderAck, OrderError>;
}
