/*
[INPUT]:  Account ids and optional query payloads
[OUTPUT]: Accounts, holds, ledger entries, wallets, fees and limits
[POS]:    Resource layer - account endpoints (require auth)
[UPDATE]: When adding account endpoints or changing response types
*/

use serde_json::Value;

use super::Subscriber;
use crate::http::{Result, Transport};
use crate::types::Account;

facade!(
    /// Trading accounts (`/accounts`)
    Accounts
);

facade!(
    /// Linked Coinbase wallets
    CoinbaseAccounts
);

facade!(
    /// Current maker/taker fee tier
    Fees
);

facade!(
    /// Per-user exchange limits
    Users
);

impl<T: Transport + ?Sized> Accounts<'_, T> {
    /// GET /accounts
    pub async fn list(&self) -> Result<Vec<Account>> {
        self.decode(self.transport.get("/accounts", None).await?)
    }

    /// GET /accounts/{account_id}
    pub async fn get(&self, account_id: &str) -> Result<Account> {
        let endpoint = format!("/accounts/{account_id}");
        self.decode(self.transport.get(&endpoint, None).await?)
    }

    /// GET /accounts/{account_id}/holds
    pub async fn holds(&self, account_id: &str, query: Option<&Value>) -> Result<Value> {
        let endpoint = format!("/accounts/{account_id}/holds");
        self.decode(self.transport.get(&endpoint, query).await?)
    }

    /// GET /accounts/{account_id}/ledger
    pub async fn ledger(&self, account_id: &str, query: Option<&Value>) -> Result<Value> {
        let endpoint = format!("/accounts/{account_id}/ledger");
        self.decode(self.transport.get(&endpoint, query).await?)
    }

    /// GET /accounts/{account_id}/transfers
    pub async fn transfers(&self, account_id: &str, query: Option<&Value>) -> Result<Value> {
        let endpoint = format!("/accounts/{account_id}/transfers");
        self.decode(self.transport.get(&endpoint, query).await?)
    }
}

impl<T: Transport + ?Sized> CoinbaseAccounts<'_, T> {
    /// GET /coinbase-accounts
    pub async fn wallets(&self) -> Result<Value> {
        self.decode(self.transport.get("/coinbase-accounts", None).await?)
    }

    /// POST /coinbase-accounts/{account_id}/addresses
    pub async fn generate_address(&self, account_id: &str) -> Result<Value> {
        let endpoint = format!("/coinbase-accounts/{account_id}/addresses");
        self.decode(self.transport.post(&endpoint, None).await?)
    }

    /// POST /deposits/coinbase-account
    pub async fn deposit_from(&self, body: &Value) -> Result<Value> {
        self.decode(self.transport.post("/deposits/coinbase-account", Some(body)).await?)
    }

    /// POST /withdrawals/coinbase-account
    pub async fn withdraw_to(&self, body: &Value) -> Result<Value> {
        self.decode(self.transport.post("/withdrawals/coinbase-account", Some(body)).await?)
    }
}

impl<T: Transport + ?Sized> Fees<'_, T> {
    /// GET /fees
    pub async fn get(&self) -> Result<Value> {
        self.decode(self.transport.get("/fees", None).await?)
    }
}

impl<T: Transport + ?Sized> Users<'_, T> {
    /// GET /users/{user_id}/exchange-limits
    pub async fn limits(&self, user_id: &str) -> Result<Value> {
        let endpoint = format!("/users/{user_id}/exchange-limits");
        self.decode(self.transport.get(&endpoint, None).await?)
    }
}
