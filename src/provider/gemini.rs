//! Gemini plan provider implementation
//!
//! This module implements the PlanProvider trait for the `generateContent`
//! endpoint of the generative-language API.

use crate::error::ProviderError;
use crate::provider::{PlanProvider, ProviderConfig};
use crate::types::ApiKey;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

/// Instruction placed in front of every user query
pub const TRAVEL_AGENT_INSTRUCTION: &str = "You are an expert travel agent AI. Provide helpful, detailed, and personalized travel advice based on user queries. Organize your response with clear headings and bullet points when appropriate. Be conversational and friendly.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Wrap a user prompt in the travel-agent instruction
pub fn templated_prompt(prompt: &str) -> String {
    format!("{}\n\nUser query: {}", TRAVEL_AGENT_INSTRUCTION, prompt)
}

/// Build the JSON request body for `prompt`
pub(crate) fn build_request(config: &ProviderConfig, prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: templated_prompt(prompt),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
        },
    }
}

/// Pull the first candidate's text out of a response body
pub fn extract_text(body: &str) -> Result<String, ProviderError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse("no candidates".to_string()))?;

    candidate
        .content
        .ok_or_else(|| ProviderError::MalformedResponse("candidate has no content".to_string()))?
        .parts
        .into_iter()
        .next()
        .and_then(|part| part.text)
        .ok_or_else(|| ProviderError::MalformedResponse("candidate has no text part".to_string()))
}

/// Gemini plan provider
pub struct GeminiProvider {
    client: Client,
    api_key: ApiKey,
    config: ProviderConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given API key and default configuration
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_config(api_key, ProviderConfig::default())
    }

    /// Create a new Gemini provider with an explicit configuration
    pub fn with_config(api_key: ApiKey, config: ProviderConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            config,
        }
    }

    /// Create a new Gemini provider from environment variable GEMINI_API_KEY
    ///
    /// # Returns
    ///
    /// A new provider or an error if the environment variable is unset or blank
    pub fn from_env() -> Result<Self, ProviderError> {
        let raw = std::env::var("GEMINI_API_KEY").map_err(|_| {
            ProviderError::Configuration("GEMINI_API_KEY environment variable not set".to_string())
        })?;
        let api_key = ApiKey::new(raw).ok_or_else(|| {
            ProviderError::Configuration("GEMINI_API_KEY environment variable is empty".to_string())
        })?;
        Ok(Self::with_config(api_key, ProviderConfig::from_env()))
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Get the provider configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl PlanProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        info!(
            model = %self.config.model,
            prompt_length = prompt.len(),
            "Requesting Gemini completion"
        );

        let body = build_request(&self.config, prompt);

        let mut request = self
            .client
            .post(self.config.endpoint())
            .query(&[("key", self.api_key.expose())])
            .json(&body);
        if let Some(timeout) = self.config.timeout() {
            request = request.timeout(timeout);
        }

        trace!("Sending request to Gemini");

        // Errors carry the request URL, which includes the key.
        let response = request.send().await.map_err(|e| {
            let e = e.without_url();
            warn!(error = %e, "Gemini transport error");
            ProviderError::Transport(e.to_string())
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            let e = e.without_url();
            warn!(error = %e, "Failed to read Gemini response body");
            ProviderError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Gemini returned an error status");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let message = extract_text(&text).map_err(|e| {
            warn!(error = %e, "Unexpected Gemini response format");
            e
        })?;

        debug!(
            response_length = message.len(),
            "Gemini completion successful"
        );

        Ok(message)
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}
