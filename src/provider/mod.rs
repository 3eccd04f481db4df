//! Plan provider abstraction and implementations
//!
//! This module provides a trait-based abstraction for the backends that turn a
//! prompt into travel-plan text: the live Gemini endpoint and the canned
//! keyword responder used when no API key is configured.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod gemini;
pub mod mock;

/// Default generative-language API root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for a plan provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Model name to use
    #[serde(default = "default_model")]
    pub model: String,
    /// API root; the model path is appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Temperature for response generation (0.0-2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Top-k sampling parameter
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    /// Top-p sampling parameter (0.0-1.0)
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Request timeout in seconds; the transport default applies when unset
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timeout_secs: Option<u64>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_k() -> u32 {
    40
}

fn default_top_p() -> f32 {
    0.95
}

fn default_max_output_tokens() -> u32 {
    2048
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(default_model())
    }
}

impl ProviderConfig {
    /// Create a new provider configuration with default sampling values
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: None,
        }
    }

    /// Default configuration, with the model taken from `GEMINI_MODEL` when set
    pub fn from_env() -> Self {
        match std::env::var("GEMINI_MODEL") {
            Ok(model) if !model.trim().is_empty() => Self::new(model.trim()),
            _ => Self::default(),
        }
    }

    /// Set the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Set the top-k sampling parameter
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Set the top-p sampling parameter
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p.clamp(0.0, 1.0);
        self
    }

    /// Set the maximum tokens
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Full `generateContent` URL for the configured model, without the key
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Trait for plan provider implementations
///
/// A provider turns one user prompt into one block of plan text. Providers
/// are stateless per call: conversation history is not forwarded.
#[async_trait]
pub trait PlanProvider: Send + Sync {
    /// Generate plan text for the given prompt
    ///
    /// # Arguments
    ///
    /// * `prompt` - The user's request, already enriched with any trip context
    ///
    /// # Returns
    ///
    /// The generated text or a provider error
    async fn generate(&self, prompt: &str) -> std::result::Result<String, ProviderError>;

    /// Get the name of the provider
    fn name(&self) -> &str;
}

pub use gemini::GeminiProvider;
pub use mock::{CannedProvider, CannedResponder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_k, 40);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.max_output_tokens, 2048);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_provider_config_clamping() {
        let config = ProviderConfig::default()
            .with_temperature(3.0)
            .with_top_p(-0.5)
            .with_top_k(0);
        assert_eq!(config.temperature, 2.0);
        assert_eq!(config.top_p, 0.0);
        assert_eq!(config.top_k, 1);
    }

    #[test]
    fn test_endpoint() {
        let config = ProviderConfig::new("gemini-pro").with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-pro:generateContent"
        );
        assert_eq!(
            ProviderConfig::default().endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_timeout() {
        let config = ProviderConfig::default().with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_provider_config_deserializes_with_defaults() {
        let config: ProviderConfig = serde_json::from_str(r#"{"temperature": 0.2}"#).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_output_tokens, 2048);
    }
}
