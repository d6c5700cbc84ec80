/*
[INPUT]:  Base URLs and endpoint paths
[OUTPUT]: Normalized endpoint paths and absolute request URLs
[POS]:    HTTP layer - API location provider
[UPDATE]: When base URLs or API version change
*/

/// Production REST endpoint
pub const PRODUCTION_REST_URL: &str = "https://api.pro.coinbase.com";
/// Production market-data feed
pub const PRODUCTION_STREAM_URL: &str = "wss://ws-feed.pro.coinbase.com";
/// Public sandbox REST endpoint
pub const SANDBOX_REST_URL: &str = "https://api-public.sandbox.pro.coinbase.com";
/// Public sandbox market-data feed
pub const SANDBOX_STREAM_URL: &str = "wss://ws-feed-public.sandbox.pro.coinbase.com";

/// Describes where a REST API lives
pub trait ApiEndpoint: Send + Sync {
    fn url(&self) -> &str;

    fn version(&self) -> u32;

    /// Endpoint with exactly one leading slash
    fn endpoint(&self, value: &str) -> String {
        format!("/{}", value.trim_start_matches('/'))
    }

    /// Absolute URL for an endpoint
    fn path(&self, value: &str) -> String {
        format!(
            "{}/{}",
            self.url().trim_end_matches('/'),
            self.endpoint(value).trim_start_matches('/')
        )
    }
}

/// REST API location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestApi {
    url: String,
}

impl RestApi {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn production() -> Self {
        Self::new(PRODUCTION_REST_URL)
    }

    pub fn sandbox() -> Self {
        Self::new(SANDBOX_REST_URL)
    }
}

impl Default for RestApi {
    fn default() -> Self {
        Self::production()
    }
}

impl ApiEndpoint for RestApi {
    fn url(&self) -> &str {
        &self.url
    }

    fn version(&self) -> u32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_is_production() {
        let api = RestApi::default();
        assert_eq!(api.url(), PRODUCTION_REST_URL);
        assert_eq!(api.version(), 1);
    }

    #[rstest]
    #[case("/time", "/time")]
    #[case("time", "/time")]
    #[case("//time", "/time")]
    #[case("/products/BTC-USD/book", "/products/BTC-USD/book")]
    fn test_endpoint_normalization(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(RestApi::default().endpoint(input), expected);
    }

    #[rstest]
    #[case("https://api-public.sandbox.pro.coinbase.com", "/time")]
    #[case("https://api-public.sandbox.pro.coinbase.com/", "/time")]
    #[case("https://api-public.sandbox.pro.coinbase.com/", "time")]
    #[case("https://api-public.sandbox.pro.coinbase.com//", "//time")]
    fn test_path_joins_with_single_slash(#[case] base: &str, #[case] endpoint: &str) {
        let api = RestApi::new(base);
        assert_eq!(
            api.path(endpoint),
            "https://api-public.sandbox.pro.coinbase.com/time"
        );
    }

    #[test]
    fn test_path_is_idempotent() {
        let api = RestApi::sandbox();
        let once = api.endpoint("/accounts");
        assert_eq!(api.endpoint(&once), once);
    }
}
