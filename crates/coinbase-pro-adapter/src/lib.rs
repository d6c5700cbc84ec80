/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Coinbase Pro adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod resources;
pub mod types;
pub mod ws;

// Re-export commonly used types from auth
pub use auth::{Credentials, HandshakeHeaders, HmacAuth, RequestAuth, SignedHeaders, StreamToken};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    CoinbaseClient,
    CoinbaseError,
    RawResponse,
    RestApi,
    Result,
    Transport,
};

pub use resources::{Resources, Subscriber};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{Stream, StreamMessage, SubscribeMessage};
