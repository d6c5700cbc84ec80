/*
[INPUT]:  Order requests, order ids and fill queries
[OUTPUT]: Order confirmations, fills and stablecoin conversions
[POS]:    Resource layer - trading endpoints (require auth)
[UPDATE]: When adding trading endpoints or changing order flow
*/

use serde_json::Value;

use super::Subscriber;
use crate::http::{Result, Transport};
use crate::types::NewOrderRequest;

facade!(
    /// Orders and fills
    Orders
);

facade!(
    /// Stablecoin conversions
    Conversions
);

impl<T: Transport + ?Sized> Orders<'_, T> {
    /// GET /fills
    pub async fn fills(&self, query: &Value) -> Result<Value> {
        self.decode(self.transport.get("/fills", Some(query)).await?)
    }

    /// Every page of GET /fills, following `CB-AFTER`
    pub async fn fills_paged(&self, query: Option<Value>) -> Result<Vec<Value>> {
        self.decode_pages(self.transport.page("/fills", query).await?)
    }

    /// GET /orders
    pub async fn list(&self, query: &Value) -> Result<Value> {
        self.decode(self.transport.get("/orders", Some(query)).await?)
    }

    /// Every page of GET /orders, following `CB-AFTER`
    pub async fn list_paged(&self, query: Option<Value>) -> Result<Vec<Value>> {
        self.decode_pages(self.transport.page("/orders", query).await?)
    }

    /// DELETE /orders
    pub async fn cancel_all(&self, body: Option<&Value>) -> Result<Value> {
        self.decode(self.transport.delete("/orders", body).await?)
    }

    /// POST /orders
    pub async fn post(&self, body: &Value) -> Result<Value> {
        self.decode(self.transport.post("/orders", Some(body)).await?)
    }

    /// POST /orders with a typed request
    pub async fn place(&self, order: &NewOrderRequest) -> Result<Value> {
        let body = serde_json::to_value(order)?;
        self.post(&body).await
    }

    /// GET /orders/{order_id}
    pub async fn get(&self, order_id: &str) -> Result<Value> {
        let endpoint = format!("/orders/{order_id}");
        self.decode(self.transport.get(&endpoint, None).await?)
    }

    /// DELETE /orders/{order_id}
    pub async fn cancel(&self, order_id: &str, body: Option<&Value>) -> Result<Value> {
        let endpoint = format!("/orders/{order_id}");
        self.decode(self.transport.delete(&endpoint, body).await?)
    }
}

impl<T: Transport + ?Sized> Conversions<'_, T> {
    /// POST /conversions
    pub async fn post(&self, body: &Value) -> Result<Value> {
        self.decode(self.transport.post("/conversions", Some(body)).await?)
    }

    /// GET /conversions/{conversion_id}
    pub async fn get(&self, conversion_id: &str, query: Option<&Value>) -> Result<Value> {
        let endpoint = format!("/conversions/{conversion_id}");
        self.decode(self.transport.get(&endpoint, query).await?)
    }
}
