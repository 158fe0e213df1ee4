//! Configuration for the keyword service client

use crate::error::{ClientError, Result};
use url::Url;

/// Default keyword-generation endpoint
pub const DEFAULT_ENDPOINT: &str = "https://script2stock-backend.onrender.com/generate-keywords";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV: &str = "SCRIPT2STOCK_ENDPOINT";

/// Environment variable overriding the timeout
pub const TIMEOUT_ENV: &str = "SCRIPT2STOCK_TIMEOUT_SECS";

/// Configuration for [`HttpKeywordClient`](crate::HttpKeywordClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the generate-keywords endpoint
    pub endpoint: String,

    /// Request timeout in seconds, 0 disables the client-side timeout
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config for a custom endpoint with default settings
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Create config from environment variables
    ///
    /// Reads `SCRIPT2STOCK_ENDPOINT` and `SCRIPT2STOCK_TIMEOUT_SECS` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }

        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            config.timeout_secs = timeout.trim().parse().map_err(|e| {
                ClientError::Config(format!("{TIMEOUT_ENV} must be a number of seconds: {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            ClientError::Config(format!("Invalid endpoint '{}': {e}", self.endpoint))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "Endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("script2stock/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
