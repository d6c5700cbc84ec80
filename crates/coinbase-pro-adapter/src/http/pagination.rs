/*
[INPUT]:  Transport, endpoint and optional query payload
[OUTPUT]: Ordered list of page responses
[POS]:    HTTP layer - cursor-based pagination protocol
[UPDATE]: When page termination rules or cursor handling change
*/

use reqwest::StatusCode;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{CoinbaseError, RawResponse, Result, Transport};

/// Page size used when the caller gives no query
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
/// Query parameter that carries the cursor into the next request
pub const CURSOR_PARAM: &str = "after";

/// Walk the pages of a list endpoint.
///
/// Stops on the first non-200 response (returning only that response), on
/// an empty page (not included), or when a page carries no cursor.
pub(crate) async fn paginate<T>(
    transport: &T,
    endpoint: &str,
    payload: Option<Value>,
) -> Result<Vec<RawResponse>>
where
    T: Transport + ?Sized,
{
    let mut query = page_query(payload)?;
    let mut pages = Vec::new();

    loop {
        let response = transport
            .get(endpoint, Some(&Value::Object(query.clone())))
            .await?;

        if response.status() != StatusCode::OK {
            warn!(
                endpoint,
                status = %response.status(),
                fetched = pages.len(),
                "pagination aborted"
            );
            return Ok(vec![response]);
        }

        let body: Value = response.json()?;
        if is_empty_page(&body) {
            break;
        }

        let cursor = response.cursor().map(str::to_owned);
        pages.push(response);

        match cursor {
            Some(cursor) => {
                debug!(endpoint, page = pages.len(), cursor = %cursor, "following cursor");
                query.insert(CURSOR_PARAM.to_string(), Value::String(cursor));
            }
            None => break,
        }
    }

    Ok(pages)
}

fn page_query(payload: Option<Value>) -> Result<Map<String, Value>> {
    match payload {
        None | Some(Value::Null) => Ok(default_query()),
        Some(Value::Object(map)) if map.is_empty() => Ok(default_query()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(CoinbaseError::InvalidPayload(format!(
            "page query must be a JSON object, got {other}"
        ))),
    }
}

fn default_query() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("limit".to_string(), Value::from(DEFAULT_PAGE_LIMIT));
    map
}

/// A page with nothing in it ends the walk
fn is_empty_page(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
