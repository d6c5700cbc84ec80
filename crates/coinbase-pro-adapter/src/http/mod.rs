/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: Raw HTTP responses and paginated result sets
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new verbs or changing client behavior
*/

pub mod client;
pub mod endpoint;
pub mod error;
pub mod pagination;
pub mod response;
pub mod transport;

pub use error::{CoinbaseError, Result};
pub use response::{CURSOR_HEADER, RawResponse};
pub use transport::Transport;

pub use client::{ClientConfig, CoinbaseClient, USER_AGENT};
pub use endpoint::{
    ApiEndpoint, PRODUCTION_REST_URL, PRODUCTION_STREAM_URL, RestApi, SANDBOX_REST_URL,
    SANDBOX_STREAM_URL,
};
pub use pagination::{CURSOR_PARAM, DEFAULT_PAGE_LIMIT};
