/*
[INPUT]:  HTTP configuration (base URL, timeouts, delay, credentials)
[OUTPUT]: Signed reqwest calls returning raw responses
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Method, Request, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::auth::{Credentials, HmacAuth, RequestAuth, timestamp};
use crate::http::{ApiEndpoint, CoinbaseError, RawResponse, RestApi, Result, Transport};

/// Default `User-Agent`, also carried in the signed header set
pub const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " ",
    env!("CARGO_PKG_REPOSITORY")
);

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Flat sleep before every request
    pub rate_limit: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            rate_limit: Duration::from_secs_f64(1.0 / 3.5),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Main HTTP client for the Coinbase Pro REST API
#[derive(Debug)]
pub struct CoinbaseClient {
    http_client: Client,
    config: ClientConfig,
    api: RestApi,
    auth: Option<Box<dyn RequestAuth>>,
}

impl CoinbaseClient {
    /// Public client against production with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), RestApi::default())
    }

    /// Public client with custom configuration
    pub fn with_config(config: ClientConfig, api: RestApi) -> Result<Self> {
        Self::build(config, api, None)
    }

    /// Authenticated client; incomplete credentials yield a public client
    pub fn with_credentials(
        config: ClientConfig,
        api: RestApi,
        credentials: Credentials,
    ) -> Result<Self> {
        let auth = credentials.is_complete().then(|| {
            Box::new(HmacAuth::new(credentials, config.user_agent.clone())) as Box<dyn RequestAuth>
        });
        Self::build(config, api, auth)
    }

    /// Client driven by a caller supplied authenticator
    pub fn with_auth(
        config: ClientConfig,
        api: RestApi,
        auth: Box<dyn RequestAuth>,
    ) -> Result<Self> {
        Self::build(config, api, Some(auth))
    }

    fn build(config: ClientConfig, api: RestApi, auth: Option<Box<dyn RequestAuth>>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http_client,
            config,
            api,
            auth,
        })
    }

    pub fn api(&self) -> &RestApi {
        &self.api
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Build, sign and send one request
    async fn send(&self, method: Method, endpoint: &str, payload: Option<&Value>) -> Result<RawResponse> {
        tokio::time::sleep(self.config.rate_limit).await;

        let url = Url::parse(&self.api.path(endpoint))?;
        let mut builder = self.http_client.request(method.clone(), url);
        if let Some(payload) = payload {
            builder = if method == Method::GET {
                builder.query(payload)
            } else {
                builder.json(payload)
            };
        }
        let mut request = builder.build()?;

        if let Some(auth) = &self.auth {
            self.authenticate(auth.as_ref(), &mut request)?;
        }

        let response = self.http_client.execute(request).await?;
        let response = RawResponse::read(response).await?;
        debug!(
            method = %method,
            endpoint,
            status = %response.status(),
            bytes = response.body().len(),
            "request completed"
        );
        Ok(response)
    }

    /// Sign the request exactly as it will go on the wire
    fn authenticate(&self, auth: &dyn RequestAuth, request: &mut Request) -> Result<()> {
        let path = path_with_query(request.url());
        let body = request
            .body()
            .and_then(|body| body.as_bytes())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default();

        let headers = auth.sign(request.method().as_str(), &path, &body, &timestamp())?;
        for (name, value) in headers.pairs() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| CoinbaseError::InvalidHeader { name })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| CoinbaseError::InvalidHeader { name })?;
            request.headers_mut().insert(header_name, header_value);
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for CoinbaseClient {
    async fn get(&self, endpoint: &str, payload: Option<&Value>) -> Result<RawResponse> {
        self.send(Method::GET, endpoint, payload).await
    }

    async fn post(&self, endpoint: &str, payload: Option<&Value>) -> Result<RawResponse> {
        self.send(Method::POST, endpoint, payload).await
    }

    async fn put(&self, endpoint: &str, payload: Option<&Value>) -> Result<RawResponse> {
        self.send(Method::PUT, endpoint, payload).await
    }

    async fn delete(&self, endpoint: &str, payload: Option<&Value>) -> Result<RawResponse> {
        self.send(Method::DELETE, endpoint, payload).await
    }
}

fn path_with_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}
