/*
[INPUT]:  Error sources (HTTP, base64, serialization, headers, WebSocket)
[OUTPUT]: Structured error types shared by REST and stream layers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Main error type for the Coinbase Pro adapter
#[derive(Error, Debug)]
pub enum CoinbaseError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status (raised by resource facades only)
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// API secret is not valid base64
    #[error("Invalid API secret encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// Serialization/deserialization failed, including malformed stream frames
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// A credential or signature could not be carried in a header
    #[error("Invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    /// Request payload has the wrong shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// WebSocket connect/send/receive failed
    #[error("WebSocket error: {0}")]
    WebSocket(Box<tungstenite::Error>),
}

impl From<tungstenite::Error> for CoinbaseError {
    fn from(err: tungstenite::Error) -> Self {
        CoinbaseError::WebSocket(Box::new(err))
    }
}

impl CoinbaseError {
    /// Check if error indicates the exchange rejected our credentials
    pub fn is_auth_error(&self) -> bool {
        match self {
            CoinbaseError::Encoding(_) | CoinbaseError::InvalidHeader { .. } => true,
            CoinbaseError::Api { code, .. } => *code == 401 || *code == 403,
            _ => false,
        }
    }

    /// Check if error came from the network rather than from the payload
    pub fn is_connection_error(&self) -> bool {
        matches!(self, CoinbaseError::Http(_) | CoinbaseError::WebSocket(_))
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        CoinbaseError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, CoinbaseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

    #[test]
    fn test_error_is_auth_error() {
        let decode_err = BASE64.decode("not base64!").unwrap_err();
        assert!(CoinbaseError::from(decode_err).is_auth_error());
        assert!(CoinbaseError::api_error(StatusCode::UNAUTHORIZED, "invalid signature").is_auth_error());
        assert!(!CoinbaseError::api_error(StatusCode::NOT_FOUND, "NotFound").is_auth_error());
    }

    #[test]
    fn test_error_is_connection_error() {
        let ws_err = CoinbaseError::from(tungstenite::Error::ConnectionClosed);
        assert!(ws_err.is_connection_error());
    }

    #[test]
    fn test_api_error_creation() {
        let err = CoinbaseError::api_error(StatusCode::BAD_REQUEST, "Invalid product_id");
        match err {
            CoinbaseError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "Invalid product_id");
            }
            _ => panic!("Expected Api error variant"),
        }
    }
}
