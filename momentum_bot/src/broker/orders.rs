use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    Market,
    Limit,
    Stop,
    StopLimit,
    TrailingStop,
}

/// How long an order stays working.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeInForce {
    Day,
    #[default]
    Gtc,
    Opg,
    Cls,
    Ioc,
    Fok,
}

/// Body of an order submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub qty: u32,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<f64>,
}

impl OrderRequest {
    /// Market order, good till cancelled.
    pub fn market(symbol: impl Into<String>, qty: u32, side: OrderSide) -> Self {
        Self {
            symbol: symbol.into(),
            qty,
            side,
            order_type: OrderType::Market,
            time_in_force: TimeInForce::Gtc,
            limit_price: None,
            stop_price: None,
        }
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }
}

/// The part of the broker's order response we keep.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderAck {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn market_order_serializes_like_the_api_expects() {
        let order = OrderRequest::market("AAPL", 3, OrderSide::Buy);
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({
                "symbol": "AAPL",
                "qty": 3,
                "side": "buy",
                "type": "market",
                "time_in_force": "gtc"
            })
        );
    }

    #[test]
    fn limit_fields_are_sent_when_set() {
        let mut order =
            OrderRequest::market("TSLA", 1, OrderSide::Sell).with_time_in_force(TimeInForce::Day);
        order.order_type = OrderType::StopLimit;
        order.limit_price = Some(250.5);
        order.stop_price = Some(251.0);

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["type"], "stop_limit");
        assert_eq!(value["time_in_force"], "day");
        assert_eq!(value["limit_price"], 250.5);
        assert_eq!(value["stop_price"], 251.0);
    }
}
