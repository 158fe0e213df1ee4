//! HTTP implementation of the keyword service
//!
//! Sends the script as JSON to the generate-keywords endpoint and decodes
//! `{ "keywords": "..." }` or `{ "error": "..." }` from the answer.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use script2stock_core::{KeywordRequest, KeywordService};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Keyword service client over HTTP
pub struct HttpKeywordClient {
    client: Client,
    config: ClientConfig,
}

impl HttpKeywordClient {
    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Create a client around an existing reqwest client
    ///
    /// The reqwest client's own timeout and headers are used as-is.
    pub fn with_http_client(config: ClientConfig, client: Client) -> Result<Self> {
        config.validate()?;
        Ok(Self { client, config })
    }

    /// Create a client for the default endpoint
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one generation request
    ///
    /// # Returns
    ///
    /// The raw newline-separated keyword text
    #[instrument(skip(self, request), fields(endpoint = %self.config.endpoint))]
    pub async fn request_keywords(&self, request: &KeywordRequest) -> Result<String> {
        debug!("Sending request to keyword service");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ServiceResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| body.trim().to_string());
            warn!(status = status.as_u16(), "Keyword service returned an error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ServiceResponse = serde_json::from_str(&body)?;
        if let Some(error) = parsed.error {
            return Err(ClientError::Service(error));
        }

        let keywords = parsed.keywords.ok_or(ClientError::MissingKeywords)?;
        debug!(bytes = keywords.len(), "Received keywords");
        Ok(keywords)
    }
}

#[async_trait]
impl KeywordService for HttpKeywordClient {
    async fn generate(&self, request: KeywordRequest) -> script2stock_core::Result<String> {
        Ok(self.request_keywords(&request).await?)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    keywords: Option<String>,
    error: Option<String>,
}
