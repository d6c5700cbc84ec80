/*
[INPUT]:  Credentials plus method, path (with query), body and timestamp
[OUTPUT]: CB-ACCESS-* header set for one authenticated request
[POS]:    Auth layer - request authentication for REST endpoints
[UPDATE]: When changing the canonical message or header names
*/

use std::fmt;

use super::{Credentials, signer};
use crate::http::Result;

pub const HEADER_TIMESTAMP: &str = "CB-ACCESS-TIMESTAMP";
pub const HEADER_KEY: &str = "CB-ACCESS-KEY";
pub const HEADER_SIGN: &str = "CB-ACCESS-SIGN";
pub const HEADER_PASSPHRASE: &str = "CB-ACCESS-PASSPHRASE";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Produces authentication headers for an outgoing request
pub trait RequestAuth: fmt::Debug + Send + Sync {
    /// Sign one request. `path` must include the query string exactly as sent.
    fn sign(&self, method: &str, path: &str, body: &str, timestamp: &str)
    -> Result<SignedHeaders>;
}

/// Headers attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub timestamp: String,
    pub key: String,
    pub signature: String,
    pub passphrase: String,
    pub content_type: String,
    pub user_agent: String,
}

impl SignedHeaders {
    /// Header name/value pairs in wire form
    pub fn pairs(&self) -> [(&'static str, &str); 6] {
        [
            ("Content-Type", self.content_type.as_str()),
            ("User-Agent", self.user_agent.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_KEY, self.key.as_str()),
            (HEADER_SIGN, self.signature.as_str()),
            (HEADER_PASSPHRASE, self.passphrase.as_str()),
        ]
    }
}

/// HMAC-SHA256 authenticator for the REST API
#[derive(Debug, Clone)]
pub struct HmacAuth {
    credentials: Credentials,
    user_agent: String,
}

impl HmacAuth {
    pub fn new(credentials: Credentials, user_agent: impl Into<String>) -> Self {
        Self {
            credentials,
            user_agent: user_agent.into(),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Canonical string that gets signed
    ///
    /// Format: "{timestamp}{METHOD}{path_with_query}{body}"
    pub fn message(timestamp: &str, method: &str, path: &str, body: &str) -> String {
        format!("{timestamp}{}{path}{body}", method.to_uppercase())
    }
}

impl RequestAuth for HmacAuth {
    fn sign(
        &self,
        method: &str,
        path: &str,
        body: &str,
        timestamp: &str,
    ) -> Result<SignedHeaders> {
        let message = Self::message(timestamp, method, path, body);
        let signature = signer::signature(self.credentials.secret(), &message)?;

        Ok(SignedHeaders {
            timestamp: timestamp.to_string(),
            key: self.credentials.key().to_string(),
            signature,
            passphrase: self.credentials.passphrase().to_string(),
            content_type: CONTENT_TYPE_JSON.to_string(),
            user_agent: self.user_agent.clone(),
        })
    }
}
