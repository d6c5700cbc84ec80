/*
[INPUT]:  Profile and report ids, request bodies
[OUTPUT]: Profiles, inter-profile transfers and generated reports
[POS]:    Resource layer - profile and report endpoints (require auth)
[UPDATE]: When adding profile or report endpoints
*/

use serde_json::Value;

use super::Subscriber;
use crate::http::{Result, Transport};

facade!(
    /// Portfolios under one user
    Profiles
);

facade!(
    /// Fill and account statements
    Reports
);

impl<T: Transport + ?Sized> Profiles<'_, T> {
    /// GET /profiles
    pub async fn list(&self, query: Option<&Value>) -> Result<Value> {
        self.decode(self.transport.get("/profiles", query).await?)
    }

    /// POST /profiles
    pub async fn create(&self, body: &Value) -> Result<Value> {
        self.decode(self.transport.post("/profiles", Some(body)).await?)
    }

    /// POST /profiles/transfer
    pub async fn transfer(&self, body: &Value) -> Result<Value> {
        self.decode(self.transport.post("/profiles/transfer", Some(body)).await?)
    }

    /// GET /profiles/{profile_id}
    pub async fn get(&self, profile_id: &str, query: Option<&Value>) -> Result<Value> {
        let endpoint = format!("/profiles/{profile_id}");
        self.decode(self.transport.get(&endpoint, query).await?)
    }

    /// PUT /profiles/{profile_id}
    pub async fn rename(&self, profile_id: &str, body: &Value) -> Result<Value> {
        let endpoint = format!("/profiles/{profile_id}");
        self.decode(self.transport.put(&endpoint, Some(body)).await?)
    }

    /// PUT /profiles/{profile_id}/deactivate
    pub async fn deactivate(&self, profile_id: &str, body: &Value) -> Result<Value> {
        let endpoint = format!("/profiles/{profile_id}/deactivate");
        self.decode(self.transport.put(&endpoint, Some(body)).await?)
    }
}

impl<T: Transport + ?Sized> Reports<'_, T> {
    /// GET /reports
    pub async fn list(&self, query: Option<&Value>) -> Result<Value> {
        self.decode(self.transport.get("/reports", query).await?)
    }

    /// POST /reports
    pub async fn create(&self, body: &Value) -> Result<Value> {
        self.decode(self.transport.post("/reports", Some(body)).await?)
    }

    /// GET /reports/{report_id}
    pub async fn get(&self, report_id: &str) -> Result<Value> {
        let endpoint = format!("/reports/{report_id}");
        self.decode(self.transport.get(&endpoint, None).await?)
    }
}
