use serde::Deserialize;

/// Account status. Money fields arrive as decimal strings and are kept as such.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub account_number: Option<String>,
    pub status: String,
    #[serde(default)]
    pub currency: Option<String>,
    pub cash: String,
    pub buying_power: String,
    pub equity: String,
}
