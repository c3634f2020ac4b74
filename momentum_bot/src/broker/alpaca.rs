use std::time::Duration;

use async_trait::async_trait;
use market_data_ingestor::providers::{ProviderInitError, alpaca_rest::AlpacaCredentials};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::broker::{Account, OrderAck, OrderError, OrderRequest, OrderSubmitter};

/// Default trading endpoint (paper account).
pub const DEFAULT_TRADING_URL: &str = "https://paper-api.alpaca.markets";

/// Client for the Alpaca trading API (`/v2/orders`, `/v2/account`).
pub struct AlpacaTradingClient {
    client: Client,
    base_url: String,
}

impl AlpacaTradingClient {
    /// `base_url` may be given with or without the trailing `/v2`.
    pub fn with_credentials(
        credentials: &AlpacaCredentials,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderInitError> {
        let client = Client::builder()
            .default_headers(credentials.header_map()?)
            .timeout(timeout)
            .build()?;

        let base_url = base_url.trim_end_matches('/');
        let base_url = base_url.strip_suffix("/v2").unwrap_or(base_url).to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v2/{}", self.base_url, path)
    }

    pub async fn account(&self) -> Result<Account, OrderError> {
        let response = self.client.get(self.url("account")).send().await?;
        decode(response).await
    }
}

#[async_trait]
impl OrderSubmitter for AlpacaTradingClient {
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderAck, OrderError> {
        tracing::info!(
            symbol = %order.symbol,
            qty = order.qty,
            side = ?order.side,
            order_type = ?order.order_type,
            "submitting order"
        );
        let response = self
            .client
            .post(self.url("orders"))
            .json(order)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, OrderError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown API error".to_string());
        return Err(OrderError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json::<T>().await?)
}
