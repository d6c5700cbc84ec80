/*
[INPUT]:  Feed URL, credentials and subscription channels
[OUTPUT]: Real-time market data frames
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding new channels or changing connection logic
*/

pub mod client;
pub mod message;

pub use client::Stream;
pub use message::{
    ChannelSubscription, StreamMessage, SubscribeMessage, SubscriptionAction, TickerEvent,
};
