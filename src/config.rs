//! Client configuration
//!
//! Where the API lives and how requests reach it. Configuration can be built
//! in code, or loaded from a YAML or JSON file:
//!
//! ```yaml
//! host: www.urturn.com
//! endpointBase: /api/
//! scheme: https
//! timeout_ms: 10000
//! page_href: https://blog.example.com/post/1
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default API host
pub const DEFAULT_HOST: &str = "www.urturn.com";

/// Default API path prefix
pub const DEFAULT_ENDPOINT_BASE: &str = "/api/";

/// Default scheme used to resolve protocol-relative request URLs
pub const DEFAULT_SCHEME: &str = "https";

/// Configuration for a [`Client`](crate::client::Client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API host, optionally with a port
    pub host: String,

    /// Path prefix for every resource
    #[serde(alias = "endpointBase", alias = "endpoint")]
    pub endpoint_base: String,

    /// Scheme the protocol-relative URLs are resolved with
    pub scheme: String,

    /// Request timeout in milliseconds; none by default
    #[serde(alias = "timeoutMs")]
    pub timeout_ms: Option<u64>,

    /// User agent string
    #[serde(alias = "userAgent")]
    pub user_agent: String,

    /// URL of the embedding page, sent with widget tracking
    #[serde(alias = "pageHref")]
    pub page_href: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            endpoint_base: DEFAULT_ENDPOINT_BASE.to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
            timeout_ms: None,
            user_agent: format!("urturn-client/{}", env!("CARGO_PKG_VERSION")),
            page_href: None,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from a YAML or JSON file (by extension)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }

    /// Parse configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Parse configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Check required fields and normalize the endpoint base
    pub fn validated(mut self) -> Result<Self> {
        self.host = self.host.trim().trim_end_matches('/').to_string();
        if self.host.is_empty() {
            return Err(Error::missing_field("host"));
        }
        if self.host.contains("://") {
            return Err(Error::invalid_value(
                "host",
                "expected a bare host name, set the scheme separately",
            ));
        }
        if self.scheme.is_empty() {
            return Err(Error::missing_field("scheme"));
        }
        self.endpoint_base = normalize_endpoint_base(&self.endpoint_base);
        Ok(self)
    }

    /// Protocol-relative root every request URL starts with
    pub fn endpoint_root(&self) -> String {
        format!(
            "//{}{}",
            self.host,
            normalize_endpoint_base(&self.endpoint_base)
        )
    }

    /// Request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Ensure the base starts and ends with `/`
fn normalize_endpoint_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the endpoint base path
    pub fn endpoint_base(mut self, base: impl Into<String>) -> Self {
        self.config.endpoint_base = normalize_endpoint_base(&base.into());
        self
    }

    /// Set the scheme
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config.scheme = scheme.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the embedding page URL used for widget tracking
    pub fn page_href(mut self, href: impl Into<String>) -> Self {
        self.config.page_href = Some(href.into());
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
