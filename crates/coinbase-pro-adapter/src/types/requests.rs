/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{OrderType, Side, TimeInForce};

/// Body of POST /orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub product_id: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funds: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_oid: Option<Uuid>,
}

impl NewOrderRequest {
    pub fn limit(product_id: impl Into<String>, side: Side, price: Decimal, size: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            side,
            order_type: OrderType::Limit,
            price: Some(price),
            size: Some(size),
            funds: None,
            time_in_force: None,
            post_only: None,
            client_oid: None,
        }
    }

    /// Market order spending `funds` of the quote currency
    pub fn market_funds(product_id: impl Into<String>, side: Side, funds: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            side,
            order_type: OrderType::Market,
            price: None,
            size: None,
            funds: Some(funds),
            time_in_force: None,
            post_only: None,
            client_oid: None,
        }
    }

    /// Tag the order with a fresh client order id
    pub fn with_client_oid(mut self) -> Self {
        self.client_oid = Some(Uuid::new_v4());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_limit_order_wire_format() {
        let order = NewOrderRequest::limit(
            "BTC-USD",
            Side::Buy,
            "100.25".parse().unwrap(),
            "0.01".parse().unwrap(),
        );

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "product_id": "BTC-USD",
                "side": "buy",
                "type": "limit",
                "price": "100.25",
                "size": "0.01"
            })
        );
    }

    #[test]
    fn test_market_order_with_client_oid() {
        let order = NewOrderRequest::market_funds("BTC-USD", Side::Sell, "10".parse().unwrap())
            .with_client_oid();

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["type"], "market");
        assert_eq!(value["funds"], "10");
        assert!(value.get("price").is_none());
        let oid = value["client_oid"].as_str().unwrap();
        assert!(Uuid::parse_str(oid).is_ok());
    }
}
