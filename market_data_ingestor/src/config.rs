//! Configuration of the fetch and export stages.

use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use shared_utils::env::get_optional_env_var;

use crate::{
    fetcher::RetryPolicy,
    providers::alpaca_rest::{DEFAULT_DATA_URL, provider::DEFAULT_TIMEOUT},
};

/// `[data]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Market-data endpoint root. `APCA_API_DATA_URL` overrides it.
    pub base_url: String,
    /// Attempts per symbol before it is skipped.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub retry_delay_secs: u64,
    /// HTTP client timeout.
    pub timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DATA_URL.to_string(),
            max_attempts: 3,
            retry_delay_secs: 3,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl DataConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_secs(self.retry_delay_secs))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = get_optional_env_var("APCA_API_DATA_URL") {
            self.base_url = url;
        }
    }
}

/// `[export]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory receiving `latest_*.csv`; created on first export.
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn partial_section_keeps_defaults() {
        let cfg: DataConfig = toml::from_str("max_attempts = 5").unwrap();
        assert_eq!(cfg.max_attempts, 5);
        assert_eq!(cfg.retry_delay_secs, 3);
        assert_eq!(cfg.retry_policy(), RetryPolicy::new(5, Duration::from_secs(3)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<DataConfig>("max_retries = 5").is_err());
    }

    #[test]
    #[serial]
    fn env_overrides_base_url() {
        unsafe { std::env::set_var("APCA_API_DATA_URL", "http://localhost:9999/v2") };
        let mut cfg = DataConfig::default();
        cfg.apply_env_overrides();
        unsafe { std::env::remove_var("APCA_API_DATA_URL") };

        assert_eq!(cfg.base_url, "http://localhost:9999/v2");
    }
}
