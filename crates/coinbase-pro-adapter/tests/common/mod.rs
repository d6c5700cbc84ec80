/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for coinbase-pro-adapter tests

#![allow(dead_code)]

use std::time::Duration;

use coinbase_pro_adapter::{ClientConfig, CoinbaseClient, Credentials, RestApi};
use wiremock::MockServer;

pub const TEST_KEY: &str = "test-key";
/// base64("coinbase-pro-test-secret")
pub const TEST_SECRET: &str = "Y29pbmJhc2UtcHJvLXRlc3Qtc2VjcmV0";
pub const TEST_PASSPHRASE: &str = "test-passphrase";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_KEY, TEST_SECRET, TEST_PASSPHRASE)
}

/// Default configuration without the per-request delay
pub fn fast_config() -> ClientConfig {
    ClientConfig {
        rate_limit: Duration::ZERO,
        ..ClientConfig::default()
    }
}

pub fn public_client(server: &MockServer) -> CoinbaseClient {
    CoinbaseClient::with_config(fast_config(), RestApi::new(server.uri()))
        .expect("client should build")
}

pub fn signed_client(server: &MockServer) -> CoinbaseClient {
    CoinbaseClient::with_credentials(fast_config(), RestApi::new(server.uri()), test_credentials())
        .expect("client should build")
}
