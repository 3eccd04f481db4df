// Plan generation client
//
// Chooses between the live provider and the canned responder and applies a
// single failure policy to every kind of live failure.

use crate::error::{AgentError, ProviderError, Result};
use crate::provider::{CannedProvider, PlanProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Reply used by [`FailurePolicy::Apologize`]
pub const APOLOGY_MESSAGE: &str = "I apologize, but I encountered an issue processing your request. Please try again or refine your query.";

/// What to do when the live provider fails
///
/// Transport errors, error statuses and malformed responses are all treated
/// the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Answer from the canned responder
    FallbackToCanned,
    /// Answer with [`APOLOGY_MESSAGE`]
    Apologize,
    /// Return the error to the caller
    Surface,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::FallbackToCanned
    }
}

/// Client that produces travel-plan text for a prompt
///
/// Without a live provider every prompt is answered by the canned responder.
/// The live provider can be installed or removed at any time, e.g. when the
/// user configures or clears an API key.
pub struct PlanClient {
    live: RwLock<Option<Arc<dyn PlanProvider>>>,
    canned: CannedProvider,
    policy: FailurePolicy,
}

impl PlanClient {
    /// Create a client in canned mode
    pub fn new(policy: FailurePolicy) -> Result<Self> {
        Ok(Self {
            live: RwLock::new(None),
            canned: CannedProvider::new()?,
            policy,
        })
    }

    /// Start with a live provider installed
    pub fn with_provider(mut self, provider: Arc<dyn PlanProvider>) -> Self {
        *self.live.get_mut() = Some(provider);
        self
    }

    /// Install or remove the live provider
    pub async fn set_provider(&self, provider: Option<Arc<dyn PlanProvider>>) {
        let mut live = self.live.write().await;
        info!(
            provider = provider.as_ref().map(|p| p.name()).unwrap_or("none"),
            "Switching live plan provider"
        );
        *live = provider;
    }

    /// Whether a live provider is installed
    pub async fn is_live(&self) -> bool {
        self.live.read().await.is_some()
    }

    /// Name of the provider that would answer the next prompt
    pub async fn provider_name(&self) -> String {
        match self.live.read().await.as_ref() {
            Some(p) => p.name().to_string(),
            None => self.canned.name().to_string(),
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn canned(&self) -> &CannedProvider {
        &self.canned
    }

    /// Produce plan text for `prompt`
    ///
    /// Only returns an error when the live provider fails under
    /// [`FailurePolicy::Surface`].
    pub async fn generate_plan(&self, prompt: &str) -> Result<String> {
        // Clone the handle so the lock is not held across the request.
        let live = self.live.read().await.clone();

        let Some(provider) = live else {
            debug!("No live provider configured, using canned response");
            return Ok(self.canned.responder().respond(prompt).to_string());
        };

        match provider.generate(prompt).await {
            Ok(text) => Ok(text),
            Err(err) => self.recover(prompt, provider.name(), err),
        }
    }

    fn recover(&self, prompt: &str, provider: &str, err: ProviderError) -> Result<String> {
        warn!(provider, error = %err, policy = ?self.policy, "Plan generation failed");
        match self.policy {
            FailurePolicy::FallbackToCanned => Ok(self.canned.responder().respond(prompt).to_string()),
            FailurePolicy::Apologize => Ok(APOLOGY_MESSAGE.to_string()),
            FailurePolicy::Surface => Err(AgentError::Provider(err)),
        }
    }
}

impl std::fmt::Debug for PlanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanClient")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::{DEFAULT_RESPONSE, PARIS_RESPONSE};
    use async_trait::async_trait;

    struct FixedProvider(std::result::Result<&'static str, fn() -> ProviderError>);

    #[async_trait]
    impl PlanProvider for FixedProvider {
        async fn generate(&self, _prompt: &str) -> std::result::Result<String, ProviderError> {
            match &self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(make) => Err(make()),
            }
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    fn failing(make: fn() -> ProviderError) -> Arc<dyn PlanProvider> {
        Arc::new(FixedProvider(Err(make)))
    }

    fn transport() -> ProviderError {
        ProviderError::Transport("connection refused".to_string())
    }

    fn malformed() -> ProviderError {
        ProviderError::MalformedResponse("no candidates".to_string())
    }

    #[tokio::test]
    async fn test_canned_mode() {
        let client = PlanClient::new(FailurePolicy::default()).unwrap();
        assert!(!client.is_live().await);
        assert_eq!(client.provider_name().await, "Canned");
        assert_eq!(client.generate_plan("Paris in May").await.unwrap(), PARIS_RESPONSE);
        assert_eq!(client.generate_plan("hello").await.unwrap(), DEFAULT_RESPONSE);
    }

    #[tokio::test]
    async fn test_live_provider_reply() {
        let client = PlanClient::new(FailurePolicy::default())
            .unwrap()
            .with_provider(Arc::new(FixedProvider(Ok("live answer"))));
        assert!(client.is_live().await);
        assert_eq!(client.generate_plan("Paris").await.unwrap(), "live answer");
    }

    #[tokio::test]
    async fn test_fallback_policy_is_uniform() {
        for make in [transport as fn() -> ProviderError, malformed] {
            let client = PlanClient::new(FailurePolicy::FallbackToCanned)
                .unwrap()
                .with_provider(failing(make));
            assert_eq!(client.generate_plan("paris").await.unwrap(), PARIS_RESPONSE);
        }
    }

    #[tokio::test]
    async fn test_apologize_policy_is_uniform() {
        for make in [transport as fn() -> ProviderError, malformed] {
            let client = PlanClient::new(FailurePolicy::Apologize)
                .unwrap()
                .with_provider(failing(make));
            assert_eq!(client.generate_plan("paris").await.unwrap(), APOLOGY_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_surface_policy() {
        let client = PlanClient::new(FailurePolicy::Surface)
            .unwrap()
            .with_provider(failing(malformed));
        let err = client.generate_plan("paris").await.unwrap_err();
        assert!(matches!(
            err,
            AgentError::Provider(ProviderError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_removing_provider_returns_to_canned() {
        let client = PlanClient::new(FailurePolicy::Surface)
            .unwrap()
            .with_provider(failing(transport));
        client.set_provider(None).await;
        assert_eq!(client.generate_plan("paris").await.unwrap(), PARIS_RESPONSE);
    }

    #[test]
    fn test_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&FailurePolicy::FallbackToCanned).unwrap(),
            "\"fallback_to_canned\""
        );
        let policy: FailurePolicy = serde_json::from_str("\"surface\"").unwrap();
        assert_eq!(policy, FailurePolicy::Surface);
    }
}
