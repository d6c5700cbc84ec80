/*
[INPUT]:  Credentials and the current timestamp
[OUTPUT]: Signed handshake headers for the private WebSocket feed
[POS]:    Auth layer - stream challenge-response token
[UPDATE]: When the feed changes its verification challenge
*/

use serde::Serialize;

use super::{Credentials, signer};
use crate::http::Result;

/// Challenge signed by the feed handshake
pub const VERIFY_CHALLENGE: &str = "GET/users/self/verify";

/// Handshake header set sent on the WebSocket upgrade request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandshakeHeaders {
    pub signature: String,
    pub key: String,
    pub passphrase: String,
    pub timestamp: String,
}

impl HandshakeHeaders {
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("signature", self.signature.as_str()),
            ("key", self.key.as_str()),
            ("passphrase", self.passphrase.as_str()),
            ("timestamp", self.timestamp.as_str()),
        ]
    }
}

/// Builds handshake headers for an authenticated stream
#[derive(Debug, Clone)]
pub struct StreamToken {
    credentials: Credentials,
}

impl StreamToken {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Headers for a handshake happening now
    pub fn header(&self) -> Result<HandshakeHeaders> {
        self.header_at(&signer::timestamp())
    }

    /// Headers for a handshake at an explicit timestamp
    pub fn header_at(&self, timestamp: &str) -> Result<HandshakeHeaders> {
        let message = format!("{timestamp}{VERIFY_CHALLENGE}");
        Ok(HandshakeHeaders {
            signature: signer::signature(self.credentials.secret(), &message)?,
            key: self.credentials.key().to_string(),
            passphrase: self.credentials.passphrase().to_string(),
            timestamp: timestamp.to_string(),
        })
    }
}
