use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    models::{bar::Bar, request_params::BarsRequestParams},
    providers::{
        DataProvider, ProviderError, ProviderInitError,
        alpaca_rest::{
            AlpacaCredentials,
            params::{construct_params, validate_timeframe},
            response::AlpacaBarsResponse,
        },
    },
};

/// Client timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AlpacaProvider {
    client: Client,
    base_url: Url,
}

impl AlpacaProvider {
    /// Creates a provider for an explicit endpoint root, e.g.
    /// `https://data.alpaca.markets/v2`.
    pub fn with_credentials(
        credentials: &AlpacaCredentials,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderInitError> {
        let client = Client::builder()
            .default_headers(credentials.header_map()?)
            .timeout(timeout)
            .build()?;

        let base_url = base_url.into();
        let invalid = |message: String| ProviderInitError::InvalidBaseUrl {
            url: base_url.clone(),
            message,
        };
        let parsed = Url::parse(&base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("cannot be a base".to_string()));
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// `{base}/stocks/{symbol}/bars`, with `symbol` as one encoded path segment.
    fn bars_url(&self, symbol: &str) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Validation(format!("bad base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(["stocks", symbol, "bars"]);
        Ok(url)
    }
}

#[async_trait]
impl DataProvider for AlpacaProvider {
    async fn fetch_bars(
        &self,
        symbol: &str,
        params: &BarsRequestParams,
    ) -> Result<Vec<Bar>, ProviderError> {
        validate_timeframe(&params.timeframe)?;
        if symbol.trim().is_empty() {
            return Err(ProviderError::Validation("empty symbol".into()));
        }

        let url = self.bars_url(symbol)?;
        let mut bars: Vec<Bar> = Vec::new();
        let mut next_page_token: Option<String> = None;

        loop {
            let remaining = params
                .limit
                .map(|limit| limit.saturating_sub(bars.len() as u32));
            let query = construct_params(params, remaining, next_page_token.as_deref());

            let response = self.client.get(url.clone()).query(&query).send().await?;

            let status = response.status();
            if !status.is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return Err(ProviderError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let page = response.json::<AlpacaBarsResponse>().await?;
            let page_bars = page.bars.unwrap_or_default();
            let page_was_empty = page_bars.is_empty();
            bars.extend(page_bars.into_iter().map(|b| b.into_bar(symbol)));

            let limit_reached = params.limit.is_some_and(|limit| bars.len() >= limit as usize);
            match page.next_page_token {
                // An empty page or a repeated token would never converge.
                Some(token)
                    if !limit_reached
                        && !page_was_empty
                        && next_page_token.as_deref() != Some(token.as_str()) =>
                {
                    next_page_token = Some(token)
                }
                Some(_) if !limit_reached => {
                    tracing::warn!(symbol, rows = bars.len(), "pagination stalled, stopping");
                    break;
                }
                _ => break,
            }
        }

        if let Some(limit) = params.limit {
            bars.truncate(limit as usize);
        }
        tracing::debug!(symbol, rows = bars.len(), "alpaca bars response");
        Ok(bars)
    }
}
