/*
[INPUT]:  API credentials and request parameters
[OUTPUT]: HMAC signatures, REST auth headers, stream handshake headers
[POS]:    Auth layer - handles Coinbase Pro API authentication
[UPDATE]: When auth flow or signature methods change
*/

pub mod authenticator;
pub mod credentials;
pub mod signer;
pub mod token;

pub use authenticator::{HmacAuth, RequestAuth, SignedHeaders};
pub use credentials::Credentials;
pub use signer::{signature, timestamp};
pub use token::{HandshakeHeaders, StreamToken};
