/*
[INPUT]:  Product ids, channel names and raw feed frames
[OUTPUT]: Subscribe/unsubscribe requests and typed feed messages
[POS]:    WebSocket layer - message building and parsing
[UPDATE]: When adding new message types or changing format
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::Result;
use crate::types::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionAction {
    Subscribe,
    Unsubscribe,
}

/// Outbound subscription request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeMessage {
    #[serde(rename = "type")]
    pub action: SubscriptionAction,
    pub product_ids: Vec<String>,
    pub channels: Vec<String>,
}

impl SubscribeMessage {
    pub fn subscribe<P, C>(product_ids: P, channels: C) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        C: IntoIterator<Item = Channel>,
    {
        Self::build(SubscriptionAction::Subscribe, product_ids, channels)
    }

    pub fn unsubscribe<P, C>(product_ids: P, channels: C) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        C: IntoIterator<Item = Channel>,
    {
        Self::build(SubscriptionAction::Unsubscribe, product_ids, channels)
    }

    /// Ticker subscription for a single product
    pub fn ticker(product_id: &str) -> Self {
        Self::subscribe([product_id], [Channel::Ticker])
    }

    fn build<P, C>(action: SubscriptionAction, product_ids: P, channels: C) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        C: IntoIterator<Item = Channel>,
    {
        Self {
            action,
            product_ids: product_ids.into_iter().map(Into::into).collect(),
            channels: channels
                .into_iter()
                .map(|channel| channel.as_str().to_string())
                .collect(),
        }
    }
}

/// Channel entry inside a `subscriptions` confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSubscription {
    pub name: String,
    #[serde(default)]
    pub product_ids: Vec<String>,
}

/// `ticker` channel event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerEvent {
    pub product_id: String,
    #[serde(default)]
    pub sequence: Option<u64>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub best_bid: Option<String>,
    #[serde(default)]
    pub best_ask: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub last_size: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub trade_id: Option<u64>,
}

/// Inbound feed message, keyed by its `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamMessage {
    Subscriptions { channels: Vec<ChannelSubscription> },
    Ticker(TickerEvent),
    Heartbeat {
        product_id: String,
        sequence: u64,
        last_trade_id: u64,
        time: String,
    },
    Error {
        message: String,
        #[serde(default)]
        reason: Option<String>,
    },
    #[serde(other)]
    Other,
}

impl StreamMessage {
    /// Interpret a frame returned by `Stream::receive`
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
