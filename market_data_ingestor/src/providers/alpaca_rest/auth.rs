use reqwest::header::{self, HeaderMap, HeaderValue, InvalidHeaderValue};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::{MissingEnvVarError, get_env_var_any};

pub const KEY_ID_HEADER: &str = "APCA-API-KEY-ID";
pub const SECRET_KEY_HEADER: &str = "APCA-API-SECRET-KEY";

/// The key pair every Alpaca endpoint authenticates with.
#[derive(Debug)]
pub struct AlpacaCredentials {
    key_id: SecretString,
    secret_key: SecretString,
}

impl AlpacaCredentials {
    pub fn new(key_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        let key_id: String = key_id.into();
        let secret_key: String = secret_key.into();
        Self {
            key_id: SecretString::new(key_id.into_boxed_str()),
            secret_key: SecretString::new(secret_key.into_boxed_str()),
        }
    }

    /// Reads `APCA_API_KEY_ID` / `APCA_API_SECRET_KEY`, falling back to
    /// `ALPACA_API_KEY` / `ALPACA_SECRET_KEY`.
    pub fn from_env() -> Result<Self, MissingEnvVarError> {
        let key_id = get_env_var_any(&["APCA_API_KEY_ID", "ALPACA_API_KEY"])?;
        let secret_key = get_env_var_any(&["APCA_API_SECRET_KEY", "ALPACA_SECRET_KEY"])?;
        Ok(Self::new(key_id, secret_key))
    }

    /// Default headers for a client talking to Alpaca.
    pub fn header_map(&self) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut key_id = HeaderValue::from_str(self.key_id.expose_secret())?;
        key_id.set_sensitive(true);
        let mut secret = HeaderValue::from_str(self.secret_key.expose_secret())?;
        secret.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(KEY_ID_HEADER, key_id);
        headers.insert(SECRET_KEY_HEADER, secret);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}
