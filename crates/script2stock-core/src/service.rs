//! Keyword service abstraction
//!
//! The remote keyword-generation service is reached through the
//! [`KeywordService`] trait so the generation flow can run against the real
//! HTTP client or a test double.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How densely the service should suggest overlay footage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayFrequency {
    Low,
    #[default]
    Medium,
    High,
}

impl OverlayFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for OverlayFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(Error::UnknownOverlayFrequency(other.to_string())),
        }
    }
}

/// Request body sent to the keyword service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRequest {
    /// The video script
    pub script: String,

    /// Optional overlay frequency hint; omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_frequency: Option<OverlayFrequency>,
}

impl KeywordRequest {
    /// Create a request for a script
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            overlay_frequency: None,
        }
    }

    /// Set the overlay frequency hint
    pub fn with_overlay_frequency(mut self, frequency: OverlayFrequency) -> Self {
        self.overlay_frequency = Some(frequency);
        self
    }
}

/// Trait for keyword-generation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeywordService: Send + Sync {
    /// Generate keyword lines for a script
    ///
    /// # Returns
    ///
    /// The raw newline-separated `keywords` text from the service
    async fn generate(&self, request: KeywordRequest) -> Result<String>;

    /// Service name used in logs
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_unset_frequency() {
        let request = KeywordRequest::new("A drone shot over the city.");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "script": "A drone shot over the city." }));
    }

    #[test]
    fn test_request_with_frequency() {
        let request = KeywordRequest::new("Intro").with_overlay_frequency(OverlayFrequency::High);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "script": "Intro", "overlayFrequency": "high" })
        );
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!(OverlayFrequency::default(), OverlayFrequency::Medium);
        assert_eq!("LOW".parse::<OverlayFrequency>().unwrap(), OverlayFrequency::Low);
        assert_eq!(" high ".parse::<OverlayFrequency>().unwrap(), OverlayFrequency::High);
        assert!(matches!(
            "sometimes".parse::<OverlayFrequency>(),
            Err(Error::UnknownOverlayFrequency(_))
        ));
    }
}
