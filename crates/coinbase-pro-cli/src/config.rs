/*
[INPUT]:  YAML settings file
[OUTPUT]: Parsed client settings (credentials and authorities)
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use coinbase_pro_adapter::Credentials;
use coinbase_pro_adapter::http::{
    PRODUCTION_REST_URL, PRODUCTION_STREAM_URL, RestApi, SANDBOX_REST_URL, SANDBOX_STREAM_URL,
};
use serde::{Deserialize, Serialize};

/// Top-level settings for the command line client
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Credentials and production REST authority
    #[serde(default)]
    pub restapi: RestApiSettings,
    /// Production feed authority
    #[serde(default)]
    pub websocket: WebSocketSettings,
    /// Sandbox credentials and authorities, used with `--sandbox`
    #[serde(default)]
    pub sandbox: SandboxSettings,
}

/// REST API section
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RestApiSettings {
    #[serde(default)]
    pub key: String,
    /// Base64 encoded API secret
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub passphrase: String,
    #[serde(default = "default_rest_authority")]
    pub authority: String,
}

impl Default for RestApiSettings {
    fn default() -> Self {
        Self {
            key: String::new(),
            secret: String::new(),
            passphrase: String::new(),
            authority: default_rest_authority(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebSocketSettings {
    #[serde(default = "default_stream_authority")]
    pub authority: String,
}

impl Default for WebSocketSettings {
    fn default() -> Self {
        Self {
            authority: default_stream_authority(),
        }
    }
}

/// Sandbox section; its keys are issued separately from production keys
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SandboxSettings {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub passphrase: String,
    #[serde(default = "default_sandbox_authority")]
    pub authority: String,
    #[serde(default = "default_sandbox_stream")]
    pub stream: String,
}

impl Default for SandboxSettings {
    fn default() -> Self {
        Self {
            key: String::new(),
            secret: String::new(),
            passphrase: String::new(),
            authority: default_sandbox_authority(),
            stream: default_sandbox_stream(),
        }
    }
}

fn default_rest_authority() -> String {
    PRODUCTION_REST_URL.to_string()
}

fn default_stream_authority() -> String {
    PRODUCTION_STREAM_URL.to_string()
}

fn default_sandbox_authority() -> String {
    SANDBOX_REST_URL.to_string()
}

fn default_sandbox_stream() -> String {
    SANDBOX_STREAM_URL.to_string()
}

impl Settings {
    /// Load settings from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let settings: Self = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Credentials for the selected environment; production keys never
    /// reach the sandbox
    pub fn credentials(&self, sandbox: bool) -> Credentials {
        if sandbox {
            Credentials::new(
                self.sandbox.key.as_str(),
                self.sandbox.secret.as_str(),
                self.sandbox.passphrase.as_str(),
            )
        } else {
            Credentials::new(
                self.restapi.key.as_str(),
                self.restapi.secret.as_str(),
                self.restapi.passphrase.as_str(),
            )
        }
    }

    pub fn rest_api(&self, sandbox: bool) -> RestApi {
        if sandbox {
            RestApi::new(self.sandbox.authority.as_str())
        } else {
            RestApi::new(self.restapi.authority.as_str())
        }
    }

    pub fn stream_url(&self, sandbox: bool) -> &str {
        if sandbox {
            &self.sandbox.stream
        } else {
            &self.websocket.authority
        }
    }
}
