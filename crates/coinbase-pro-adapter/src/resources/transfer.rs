/*
[INPUT]:  Deposit/withdrawal bodies and transfer ids
[OUTPUT]: Transfer records, payment methods and fee estimates
[POS]:    Resource layer - funding endpoints (require auth)
[UPDATE]: When adding funding endpoints
*/

use serde_json::Value;

use super::Subscriber;
use crate::http::{Result, Transport};

facade!(
    /// Deposits, withdrawals and payment methods
    Transfers
);

impl<T: Transport + ?Sized> Transfers<'_, T> {
    /// POST /deposits/payment-method
    pub async fn deposit_from(&self, body: &Value) -> Result<Value> {
        self.decode(self.transport.post("/deposits/payment-method", Some(body)).await?)
    }

    /// GET /payment-methods
    pub async fn methods(&self) -> Result<Value> {
        self.decode(self.transport.get("/payment-methods", None).await?)
    }

    /// GET /transfers
    pub async fn list(&self) -> Result<Value> {
        self.decode(self.transport.get("/transfers", None).await?)
    }

    /// GET /transfers/{transfer_id}
    pub async fn get(&self, transfer_id: &str) -> Result<Value> {
        let endpoint = format!("/transfers/{transfer_id}");
        self.decode(self.transport.get(&endpoint, None).await?)
    }

    /// POST /withdrawals/crypto
    pub async fn withdraw_to_address(&self, body: &Value) -> Result<Value> {
        self.decode(self.transport.post("/withdrawals/crypto", Some(body)).await?)
    }

    /// GET /withdrawals/fee-estimate
    pub async fn withdraw_estimate(&self, query: Option<&Value>) -> Result<Value> {
        self.decode(self.transport.get("/withdrawals/fee-estimate", query).await?)
    }

    /// POST /withdrawals/payment-method
    pub async fn withdraw_to(&self, body: &Value) -> Result<Value> {
        self.decode(self.transport.post("/withdrawals/payment-method", Some(body)).await?)
    }
}
