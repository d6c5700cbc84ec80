/*
[INPUT]:  Product and currency ids, optional query payloads
[OUTPUT]: Market data (products, books, tickers, candles, server time)
[POS]:    Resource layer - public market data endpoints (no auth required)
[UPDATE]: When adding market endpoints or changing response types
*/

use serde_json::Value;

use super::Subscriber;
use crate::http::{Result, Transport};
use crate::types::{ServerTime, Ticker};

facade!(
    /// Supported currencies
    Currencies
);

facade!(
    /// Tradable products and their market data
    Products
);

facade!(
    /// Signed oracle prices
    Oracle
);

facade!(
    /// Server clock
    Time
);

impl<T: Transport + ?Sized> Currencies<'_, T> {
    /// GET /currencies
    pub async fn list(&self) -> Result<Value> {
        self.decode(self.transport.get("/currencies", None).await?)
    }

    /// GET /currencies/{currency_id}
    pub async fn get(&self, currency_id: &str) -> Result<Value> {
        let endpoint = format!("/currencies/{currency_id}");
        self.decode(self.transport.get(&endpoint, None).await?)
    }
}

impl<T: Transport + ?Sized> Products<'_, T> {
    /// GET /products
    pub async fn list(&self) -> Result<Value> {
        self.decode(self.transport.get("/products", None).await?)
    }

    /// GET /products/{product_id}
    pub async fn get(&self, product_id: &str) -> Result<Value> {
        let endpoint = format!("/products/{product_id}");
        self.decode(self.transport.get(&endpoint, None).await?)
    }

    /// GET /products/{product_id}/book?level={level}
    pub async fn book(&self, product_id: &str, query: Option<&Value>) -> Result<Value> {
        let endpoint = format!("/products/{product_id}/book");
        self.decode(self.transport.get(&endpoint, query).await?)
    }

    /// GET /products/{product_id}/ticker
    pub async fn ticker(&self, product_id: &str) -> Result<Ticker> {
        let endpoint = format!("/products/{product_id}/ticker");
        self.decode(self.transport.get(&endpoint, None).await?)
    }

    /// GET /products/{product_id}/trades
    pub async fn trades(&self, product_id: &str, query: Option<&Value>) -> Result<Value> {
        let endpoint = format!("/products/{product_id}/trades");
        self.decode(self.transport.get(&endpoint, query).await?)
    }

    /// GET /products/{product_id}/candles?start=&end=&granularity=
    pub async fn candles(&self, product_id: &str, query: Option<&Value>) -> Result<Value> {
        let endpoint = format!("/products/{product_id}/candles");
        self.decode(self.transport.get(&endpoint, query).await?)
    }

    /// GET /products/{product_id}/stats
    pub async fn stats(&self, product_id: &str) -> Result<Value> {
        let endpoint = format!("/products/{product_id}/stats");
        self.decode(self.transport.get(&endpoint, None).await?)
    }
}

impl<T: Transport + ?Sized> Oracle<'_, T> {
    /// GET /oracle
    pub async fn prices(&self) -> Result<Value> {
        self.decode(self.transport.get("/oracle", None).await?)
    }
}

impl<T: Transport + ?Sized> Time<'_, T> {
    /// GET /time
    pub async fn get(&self) -> Result<ServerTime> {
        self.decode(self.transport.get("/time", None).await?)
    }
}
