/*
[INPUT]:  Endpoint paths and optional JSON payloads
[OUTPUT]: Raw responses for each HTTP verb and for cursor pagination
[POS]:    HTTP layer - transport abstraction used by resource facades
[UPDATE]: When adding verbs or changing pagination entry points
*/

use async_trait::async_trait;
use serde_json::Value;

use super::pagination;
use super::{RawResponse, Result};

/// Issues requests against the exchange and hands back raw responses
///
/// GET payloads are sent as query parameters, every other verb sends the
/// payload as a JSON body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, endpoint: &str, payload: Option<&Value>) -> Result<RawResponse>;

    async fn post(&self, endpoint: &str, payload: Option<&Value>) -> Result<RawResponse>;

    async fn put(&self, endpoint: &str, payload: Option<&Value>) -> Result<RawResponse>;

    async fn delete(&self, endpoint: &str, payload: Option<&Value>) -> Result<RawResponse>;

    /// Follow `CB-AFTER` cursors and collect every page
    async fn page(&self, endpoint: &str, payload: Option<Value>) -> Result<Vec<RawResponse>> {
        pagination::paginate(self, endpoint, payload).await
    }
}
