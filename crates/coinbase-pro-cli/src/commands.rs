/*
[INPUT]:  Transport or stream session plus parsed command arguments
[OUTPUT]: Decoded JSON results for printing
[POS]:    Command layer - one function per subcommand
[UPDATE]: When adding subcommands or changing their output
*/

use anyhow::{Context, Result, bail};
use coinbase_pro_adapter::{RawResponse, Resources, ServerTime, Stream, SubscribeMessage, Transport};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Turn `key=value` arguments into a query object; `None` when empty
pub fn parse_query(pairs: &[String]) -> Result<Option<Value>> {
    if pairs.is_empty() {
        return Ok(None);
    }

    let mut query = Map::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("query argument `{pair}` is not key=value"))?;
        if key.is_empty() {
            bail!("query argument `{pair}` has an empty key");
        }
        query.insert(key.to_string(), Value::String(value.to_string()));
    }
    Ok(Some(Value::Object(query)))
}

pub async fn server_time<T: Transport + ?Sized>(transport: &T) -> Result<ServerTime> {
    transport.time().get().await.context("fetch server time")
}

/// One GET; the status is returned alongside the body, error or not
pub async fn fetch<T: Transport + ?Sized>(
    transport: &T,
    path: &str,
    query: Option<Value>,
) -> Result<(u16, Value)> {
    let response = transport
        .get(path, query.as_ref())
        .await
        .with_context(|| format!("GET {path}"))?;
    Ok((response.status().as_u16(), body_of(&response)))
}

/// Every page of a list endpoint, failing on a non-200 page
pub async fn fetch_pages<T: Transport + ?Sized>(
    transport: &T,
    path: &str,
    query: Option<Value>,
    limit: Option<u32>,
) -> Result<Vec<Value>> {
    let query = match (query, limit) {
        (query, None) => query,
        (Some(Value::Object(mut map)), Some(limit)) => {
            map.insert("limit".to_string(), Value::from(limit));
            Some(Value::Object(map))
        }
        (_, Some(limit)) => {
            let mut map = Map::new();
            map.insert("limit".to_string(), Value::from(limit));
            Some(Value::Object(map))
        }
    };

    let pages = transport
        .page(path, query)
        .await
        .with_context(|| format!("page {path}"))?;

    let mut bodies = Vec::with_capacity(pages.len());
    for page in &pages {
        if !page.is_success() {
            bail!("page {path} failed with {}: {}", page.status(), page.text());
        }
        bodies.push(body_of(page));
    }
    debug!(path, pages = bodies.len(), "pagination complete");
    Ok(bodies)
}

/// Subscribe and hand each frame to `on_message` until `count` frames,
/// the feed closes, or `shutdown` fires. Returns frames delivered.
pub async fn stream_messages<F>(
    stream: &mut Stream,
    subscribe: &SubscribeMessage,
    count: Option<usize>,
    shutdown: CancellationToken,
    mut on_message: F,
) -> Result<usize>
where
    F: FnMut(&Value),
{
    stream.connect().await.context("connect stream")?;
    stream.send(subscribe).await.context("send subscribe")?;
    info!(
        products = ?subscribe.product_ids,
        channels = ?subscribe.channels,
        "subscribed"
    );

    let mut delivered = 0;
    while count.is_none_or(|limit| delivered < limit) {
        let frame = tokio::select! {
            _ = shutdown.cancelled() => break,
            frame = stream.receive() => frame.context("receive frame")?,
        };
        if frame.as_object().is_some_and(Map::is_empty) {
            info!("feed closed");
            break;
        }
        on_message(&frame);
        delivered += 1;
    }

    stream.disconnect().await.context("disconnect stream")?;
    Ok(delivered)
}

/// JSON body, or the raw text as a string when it is not JSON
fn body_of(response: &RawResponse) -> Value {
    response
        .json::<Value>()
        .unwrap_or_else(|_| Value::String(response.text().into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_query() {
        let pairs = vec!["level=2".to_string(), "product_id=BTC-USD".to_string()];
        let query = parse_query(&pairs).unwrap().unwrap();
        assert_eq!(query, json!({"level": "2", "product_id": "BTC-USD"}));
    }

    #[test]
    fn test_parse_query_empty_is_none() {
        assert!(parse_query(&[]).unwrap().is_none());
    }

    #[test]
    fn test_parse_query_rejects_malformed_pairs() {
        assert!(parse_query(&["level".to_string()]).is_err());
        assert!(parse_query(&["=2".to_string()]).is_err());
    }

    #[test]
    fn test_parse_query_keeps_equals_in_value() {
        let query = parse_query(&["after=a=b".to_string()]).unwrap().unwrap();
        assert_eq!(query["after"], "a=b");
    }
}
