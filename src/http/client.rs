//! HTTP transport backed by reqwest
//!
//! Provides the production [`Transport`]:
//! - Resolution of protocol-relative URLs against a configured scheme
//! - A single GET per call, with an optional timeout
//! - Error classification (timeout, HTTP status, connection)
//! - JSON body parsing

use super::transport::Transport;
use crate::config::{ClientConfig, DEFAULT_SCHEME};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Scheme for protocol-relative URLs
    pub scheme: String,
    /// Request timeout; none means wait indefinitely
    pub timeout: Option<Duration>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            timeout: None,
            default_headers: HashMap::new(),
            user_agent: format!("urturn-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpTransportConfig {
    /// Create a new config builder
    pub fn builder() -> HttpTransportConfigBuilder {
        HttpTransportConfigBuilder::default()
    }
}

impl From<&ClientConfig> for HttpTransportConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            scheme: config.scheme.clone(),
            timeout: config.timeout(),
            default_headers: HashMap::new(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Builder for HTTP transport config
#[derive(Default)]
pub struct HttpTransportConfigBuilder {
    config: HttpTransportConfig,
}

impl HttpTransportConfigBuilder {
    /// Set the scheme
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config.scheme = scheme.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpTransportConfig {
        self.config
    }
}

/// Transport that performs real HTTP requests
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::transport_init(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Turn a possibly protocol-relative URL into an absolute one
    pub fn resolve_url(&self, url: &str) -> Result<Url> {
        let absolute = match url.strip_prefix("//") {
            Some(rest) => format!("{}://{rest}", self.config.scheme),
            None => url.to_string(),
        };
        Ok(Url::parse(&absolute)?)
    }

    fn timeout_error(&self) -> Error {
        Error::Timeout {
            timeout_ms: self
                .config
                .timeout
                .map_or(0, |t| t.as_millis() as u64),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_json(&self, url: &str) -> Result<JsonValue> {
        let full_url = self.resolve_url(url)?;

        let mut req = self.client.get(full_url.clone());
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!("Request timeout: GET {}", full_url);
                return Err(self.timeout_error());
            }
            Err(e) => {
                warn!("Request failed: GET {}: {}", full_url, e);
                return Err(Error::Http(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Request failed with {}: GET {}", status.as_u16(), full_url);
            return Err(Error::http_status(status.as_u16(), body));
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error()
            } else {
                Error::Http(e)
            }
        })?;
        debug!("Request succeeded: GET {}", full_url);
        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
