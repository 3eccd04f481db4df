//! Integration test contracts for PlanProvider trait
//!
//! These tests define the contract that all plan provider implementations must satisfy.
//! They use the canned provider and a scripted provider so no network access is needed.

use async_trait::async_trait;
use std::sync::Arc;
use wayfarer::provider::mock::{
    BEACH_RESPONSE, DEFAULT_RESPONSE, JAPAN_RESPONSE, PARIS_RESPONSE, PLAN_RESPONSE,
};
use wayfarer::{
    CannedProvider, FailurePolicy, PlanClient, PlanProvider, ProviderConfig, ProviderError,
    APOLOGY_MESSAGE,
};

/// Scripted provider for testing the PlanProvider contract
#[derive(Debug, Clone)]
struct ScriptedProvider {
    response: String,
    should_fail: bool,
}

impl ScriptedProvider {
    fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            should_fail: false,
        }
    }

    fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

#[async_trait]
impl PlanProvider for ScriptedProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        if self.should_fail {
            Err(ProviderError::Status {
                status: 500,
                body: "internal".to_string(),
            })
        } else {
            Ok(self.response.clone())
        }
    }

    fn name(&self) -> &str {
        "ScriptedProvider"
    }
}

/// Test the contract for PlanProvider::generate
///
/// This test verifies that:
/// - The provider returns a non-empty string for a prompt
/// - Errors are properly propagated
#[tokio::test]
async fn test_plan_provider_generate_contract() {
    let provider = ScriptedProvider::new("A week in Kyoto");
    let result = provider.generate("Plan a trip to Kyoto").await;
    assert!(result.is_ok(), "PlanProvider::generate should succeed");
    assert!(!result.unwrap().is_empty(), "Response should not be empty");

    let failing = provider.with_failure();
    let result = failing.generate("Plan a trip to Kyoto").await;
    assert!(
        matches!(result, Err(ProviderError::Status { status: 500, .. })),
        "PlanProvider::generate should propagate errors"
    );
}

/// Test the canned provider's keyword table
///
/// This test verifies that:
/// - Keywords match case-insensitively as substrings
/// - Rules are checked in order and the first match wins
/// - Unmatched prompts get the default reply
#[tokio::test]
async fn test_canned_provider_keyword_contract() {
    let provider = CannedProvider::new().unwrap();
    assert_eq!(provider.name(), "Canned");

    let cases = [
        ("Is PARIS nice in April?", PARIS_RESPONSE),
        ("What to do in Tokyo", JAPAN_RESPONSE),
        ("japan rail pass", JAPAN_RESPONSE),
        ("tropical island getaway", BEACH_RESPONSE),
        ("Help me build an itinerary", PLAN_RESPONSE),
        // Paris is checked before plan
        ("plan my paris trip", PARIS_RESPONSE),
        // Japan is checked before beach
        ("beaches in japan", JAPAN_RESPONSE),
        ("hello there", DEFAULT_RESPONSE),
        ("", DEFAULT_RESPONSE),
    ];

    for (prompt, expected) in cases {
        assert_eq!(
            provider.generate(prompt).await.unwrap(),
            expected,
            "prompt {:?}",
            prompt
        );
    }
}

/// Test that the canned provider never fails
#[tokio::test]
async fn test_canned_provider_is_infallible() {
    let provider = CannedProvider::new().unwrap();
    let long = "x".repeat(10_000);
    for prompt in ["", "   ", "🌍✈️", long.as_str()] {
        assert!(provider.generate(prompt).await.is_ok());
    }
}

/// Test the failure policy contract of the plan client
///
/// Every live failure is handled the same way under each policy.
#[tokio::test]
async fn test_plan_client_failure_policy_contract() {
    let failing: Arc<dyn PlanProvider> = Arc::new(ScriptedProvider::new("unused").with_failure());

    let fallback = PlanClient::new(FailurePolicy::FallbackToCanned)
        .unwrap()
        .with_provider(failing.clone());
    assert_eq!(fallback.generate_plan("japan").await.unwrap(), JAPAN_RESPONSE);

    let apologize = PlanClient::new(FailurePolicy::Apologize)
        .unwrap()
        .with_provider(failing.clone());
    assert_eq!(apologize.generate_plan("japan").await.unwrap(), APOLOGY_MESSAGE);

    let surface = PlanClient::new(FailurePolicy::Surface)
        .unwrap()
        .with_provider(failing);
    assert!(surface.generate_plan("japan").await.is_err());
}

/// Test that a live provider's reply is passed through unchanged
#[tokio::test]
async fn test_plan_client_live_contract() {
    let client = PlanClient::new(FailurePolicy::default())
        .unwrap()
        .with_provider(Arc::new(ScriptedProvider::new("# Plan\n- Day 1")));
    assert_eq!(client.provider_name().await, "ScriptedProvider");
    assert_eq!(client.generate_plan("paris").await.unwrap(), "# Plan\n- Day 1");
}

/// Test the contract for ProviderConfig
#[test]
fn test_provider_config_contract() {
    let config = ProviderConfig::new("gemini-1.5-pro")
        .with_temperature(0.2)
        .with_max_output_tokens(512);

    assert_eq!(config.model, "gemini-1.5-pro");
    assert_eq!(config.temperature, 0.2);
    assert_eq!(config.max_output_tokens, 512);
    assert!(config.endpoint().ends_with("/models/gemini-1.5-pro:generateContent"));

    let defaults = ProviderConfig::default();
    assert_eq!(defaults.top_k, 40);
    assert_eq!(defaults.top_p, 0.95);
}
