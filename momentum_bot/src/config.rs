//! Application configuration: one TOML file, every key optional.

use std::path::Path;

use market_data_ingestor::{
    TimeFrame,
    config::{DataConfig, ExportConfig},
    models::timeframe::TimeFrameUnit,
};
use serde::Deserialize;
use shared_utils::{
    config::{ConfigError, load_toml_or_default},
    env::get_optional_env_var,
};

use crate::{
    broker::{TimeInForce, alpaca::DEFAULT_TRADING_URL},
    strategy::MomentumParams,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub data: DataConfig,
    pub export: ExportConfig,
    pub scan: ScanConfig,
    pub strategy: MomentumParams,
    pub trading: TradingConfig,
}

/// `[scan]` section: what `scan` looks at when no flags are given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub symbols: Vec<String>,
    pub timeframe: TimeFrame,
    pub limit: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            symbols: ["AAPL", "MSFT", "NVDA", "TSLA", "AMZN"]
                .into_iter()
                .map(String::from)
                .collect(),
            timeframe: TimeFrame::new(1, TimeFrameUnit::Minute),
            limit: 30,
        }
    }
}

/// `[trading]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TradingConfig {
    /// Trading endpoint root, with or without `/v2`. `APCA_API_BASE_URL` overrides it.
    pub base_url: String,
    /// Submit orders for triggered symbols during `scan`.
    pub submit_orders: bool,
    pub order_qty: u32,
    pub time_in_force: TimeInForce,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TRADING_URL.to_string(),
            submit_orders: false,
            order_qty: 1,
            time_in_force: TimeInForce::Gtc,
        }
    }
}

impl AppConfig {
    /// Loads `path` (or the defaults), applies environment overrides and
    /// validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config: AppConfig = load_toml_or_default(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.data.apply_env_overrides();
        if let Some(url) = get_optional_env_var("APCA_API_BASE_URL") {
            self.trading.base_url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.max_attempts == 0 {
            return Err(invalid("data.max_attempts", "must be at least 1"));
        }
        if !self.strategy.price_thresh.is_finite() {
            return Err(invalid("strategy.price_thresh", "must be a finite number"));
        }
        if !self.strategy.volume_multiplier.is_finite() || self.strategy.volume_multiplier < 0.0 {
            return Err(invalid(
                "strategy.volume_multiplier",
                "must be a finite, non-negative number",
            ));
        }
        if self.scan.limit == 0 {
            return Err(invalid("scan.limit", "must be at least 1"));
        }
        if self.trading.order_qty == 0 {
            return Err(invalid("trading.order_qty", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        message: message.to_string(),
    }
}
