// Travel agent core implementation
//
// This module implements the TravelAgent that owns a conversation session and
// sequences turns through the plan client, flight provider and suggestion
// lookup.

use crate::context::{Context, Message};
use crate::error::{AgentError, Result};
use crate::flight::{FlightOption, FlightProvider, MockFlightProvider};
use crate::form::{FormStage, TravelFormData};
use crate::planner::{FailurePolicy, PlanClient};
use crate::provider::{GeminiProvider, PlanProvider, ProviderConfig};
use crate::session::{Session, SessionPhase, TurnGate};
use crate::storage::{InMemoryStore, KeyValueStore, API_KEY_KEY, MESSAGES_KEY};
use crate::suggestion::{detect_destination, find_suggestion, suggestion_for_trip, Suggestion};
use crate::types::ApiKey;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, trace, warn};

/// Message appended when a turn fails
pub const DEFAULT_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

/// Agent configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Artificial latency of the built-in mock flight provider
    #[serde(default = "default_flight_delay_ms")]
    pub flight_delay_ms: u64,

    #[serde(default = "default_persist_history")]
    pub persist_history: bool,

    #[serde(default = "default_error_message")]
    pub error_message: String,
}

fn default_flight_delay_ms() -> u64 {
    1000
}

fn default_persist_history() -> bool {
    true
}

fn default_error_message() -> String {
    DEFAULT_ERROR_MESSAGE.to_string()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            flight_delay_ms: default_flight_delay_ms(),
            persist_history: default_persist_history(),
            error_message: default_error_message(),
        }
    }
}

/// Result of submitting the trip form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub reply: String,
    pub suggestion: Option<Suggestion>,
    pub flights: Vec<FlightOption>,
}

struct Turn {
    reply: String,
    succeeded: bool,
}

/// Travel-planning conversation agent
///
/// A `TravelAgent` owns one conversation. It appends user turns, keeps a single
/// pending placeholder while a reply is outstanding, enriches follow-up
/// questions with the submitted trip form, and persists history and the API
/// key through a [`KeyValueStore`].
///
/// # Examples
///
/// ```no_run
/// use wayfarer::TravelAgent;
///
/// # #[tokio::main]
/// # async fn main() -> wayfarer::Result<()> {
/// let agent = TravelAgent::builder().name("Travel Assistant").build()?;
/// agent.restore().await?;
/// agent.continue_without_key().await;
///
/// let reply = agent.send_message("Where should I go in Japan?").await?;
/// println!("{}", reply);
/// # Ok(())
/// # }
/// ```
pub struct TravelAgent {
    name: String,
    planner: PlanClient,
    flights: Arc<dyn FlightProvider>,
    store: Arc<dyn KeyValueStore>,
    provider_config: ProviderConfig,
    config: AgentConfig,
    session: RwLock<Session>,
    turns: TurnGate,
    // Held from history snapshot to store write, and across clears.
    persist_lock: Mutex<()>,
}

impl TravelAgent {
    /// Create a new agent builder
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Load the stored API key and conversation history
    ///
    /// A stored key installs the live provider and skips the configuration
    /// phase. Unreadable history is logged and ignored. Fails with
    /// [`AgentError::Busy`] while a turn is in flight.
    pub async fn restore(&self) -> Result<()> {
        if self.turns.is_busy() {
            return Err(AgentError::Busy);
        }

        if let Some(raw) = self.store.get(API_KEY_KEY).await? {
            match ApiKey::new(&raw) {
                Some(key) => {
                    self.install_key(key).await;
                    self.session.write().await.phase = SessionPhase::Interacting;
                    info!(agent = %self.name, "Restored saved API key");
                }
                None => debug!("Stored API key is blank, ignoring"),
            }
        }

        if !self.config.persist_history {
            return Ok(());
        }

        let _persisting = self.persist_lock.lock().await;
        if let Some(json) = self.store.get(MESSAGES_KEY).await? {
            match Context::from_json(&json) {
                Ok(context) => {
                    let mut session = self.session.write().await;
                    if self.turns.is_busy() {
                        return Err(AgentError::Busy);
                    }
                    info!(message_count = context.len(), "Restored conversation history");
                    session.context = context;
                }
                Err(e) => warn!(error = %e, "Failed to parse saved messages"),
            }
        }

        Ok(())
    }

    /// Save an API key and switch to the live provider
    pub async fn configure_api_key(&self, key: &str) -> Result<()> {
        let key = ApiKey::new(key).ok_or_else(|| {
            AgentError::Configuration(
                "Please enter your Gemini API key or continue without one for demo responses."
                    .to_string(),
            )
        })?;

        self.store.set(API_KEY_KEY, key.expose()).await?;
        self.install_key(key).await;

        let mut session = self.session.write().await;
        session.phase = SessionPhase::Interacting;
        session.touch();
        info!(agent = %self.name, "API key configured");
        Ok(())
    }

    async fn install_key(&self, key: ApiKey) {
        let provider = GeminiProvider::with_config(key, self.provider_config.clone());
        self.planner.set_provider(Some(Arc::new(provider))).await;
    }

    /// Leave the configuration phase in canned-response mode
    pub async fn continue_without_key(&self) {
        let mut session = self.session.write().await;
        session.phase = SessionPhase::Interacting;
        info!(agent = %self.name, "Continuing without API key, using sample responses");
    }

    /// Return to the configuration phase
    pub async fn show_configuration(&self) {
        self.session.write().await.phase = SessionPhase::AwaitingConfiguration;
    }

    /// Forget the API key in memory and in storage
    pub async fn clear_api_key(&self) -> Result<()> {
        self.planner.set_provider(None).await;
        self.store.remove(API_KEY_KEY).await?;
        info!(agent = %self.name, "API key cleared");
        Ok(())
    }

    /// Send a chat message and wait for the reply
    ///
    /// Returns the assistant text appended to the conversation, which is the
    /// configured error message if plan generation failed.
    pub async fn send_message(&self, text: &str) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AgentError::InvalidInput("Message is empty".to_string()));
        }

        info!(message_length = text.len(), "Processing user message");

        let turn = self.run_turn(text.to_string(), None).await?;

        if turn.succeeded {
            if let Some(keyword) = detect_destination(text) {
                let mut session = self.session.write().await;
                session.suggestion = find_suggestion(keyword);
                debug!(keyword, "Destination suggestion updated");
            }
        }

        Ok(turn.reply)
    }

    /// Submit the trip form and request a full plan
    pub async fn submit_form(&self, form: TravelFormData) -> Result<PlanOutcome> {
        form.validate()?;
        if self.turns.is_busy() {
            return Err(AgentError::Busy);
        }

        info!(
            source = %form.source,
            destination = %form.destination,
            include_flights = form.include_flights,
            "Submitting trip form"
        );

        let flights = if form.include_flights {
            match self
                .flights
                .get_flights(&form.source, &form.destination, &form.start_date)
                .await
            {
                Ok(options) => options,
                Err(e) => {
                    warn!(provider = self.flights.name(), error = %e, "Flight search failed");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let prompt = form.to_prompt();
        let turn = self.run_turn(prompt.clone(), Some(prompt)).await?;

        let suggestion = suggestion_for_trip(&form);
        {
            let mut session = self.session.write().await;
            session.submitted_form = Some(form);
            session.suggestion = Some(suggestion.clone());
            session.flights = flights.clone();
            session.touch();
        }

        Ok(PlanOutcome {
            reply: turn.reply,
            suggestion: Some(suggestion),
            flights,
        })
    }

    /// One user turn: append, wait for the plan client, append the reply
    ///
    /// `prompt` overrides the outbound text; by default the session adds trip
    /// context to `display`.
    async fn run_turn(&self, display: String, prompt: Option<String>) -> Result<Turn> {
        // The turn ends when the ticket drops, including when this future is dropped.
        let (ticket, prompt) = {
            let mut session = self.session.write().await;
            trace!("Acquired session lock");
            let Some(ticket) = self.turns.try_begin() else {
                return Err(AgentError::Busy);
            };
            let prompt = prompt.unwrap_or_else(|| session.outbound_prompt(&display));
            session.context.add_message(Message::user(display));
            session.touch();
            (ticket, prompt)
        };

        self.persist().await;

        let turn = match self.planner.generate_plan(&prompt).await {
            Ok(reply) => Turn {
                reply,
                succeeded: true,
            },
            Err(e) => {
                warn!(error = %e, "Error getting response");
                Turn {
                    reply: self.config.error_message.clone(),
                    succeeded: false,
                }
            }
        };

        {
            let mut session = self.session.write().await;
            session
                .context
                .add_message(Message::assistant(turn.reply.clone()));
            session.touch();
        }
        drop(ticket);

        self.persist().await;

        debug!(
            reply_length = turn.reply.len(),
            succeeded = turn.succeeded,
            "Turn complete"
        );
        Ok(turn)
    }

    /// Write the committed history to storage
    ///
    /// Failures are logged; the conversation carries on in memory.
    async fn persist(&self) {
        if !self.config.persist_history {
            return;
        }

        let _persisting = self.persist_lock.lock().await;
        let json = {
            let session = self.session.read().await;
            if session.context.is_empty() {
                return;
            }
            session.context.to_json()
        };

        let result = match json {
            Ok(json) => self.store.set(MESSAGES_KEY, &json).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to save messages");
        }
    }

    /// Empty the conversation in memory and in storage
    pub async fn clear_conversation(&self) -> Result<()> {
        let _persisting = self.persist_lock.lock().await;
        {
            let mut session = self.session.write().await;
            if self.turns.is_busy() {
                return Err(AgentError::Busy);
            }
            session.context.clear();
            session.touch();
        }
        self.store.remove(MESSAGES_KEY).await?;
        info!(agent = %self.name, "Conversation cleared");
        Ok(())
    }

    /// Committed messages, oldest first
    pub async fn messages(&self) -> Vec<Message> {
        self.session.read().await.context.messages().to_vec()
    }

    /// Messages for display, including the pending placeholder
    pub async fn transcript(&self) -> Vec<Message> {
        let session = self.session.read().await;
        session.context.transcript(self.turns.is_busy())
    }

    /// Whether a turn is in flight
    pub async fn is_loading(&self) -> bool {
        self.turns.is_busy()
    }

    pub async fn suggestion(&self) -> Option<Suggestion> {
        self.session.read().await.suggestion.clone()
    }

    pub async fn flights(&self) -> Vec<FlightOption> {
        self.session.read().await.flights.clone()
    }

    pub async fn phase(&self) -> SessionPhase {
        self.session.read().await.phase
    }

    pub async fn form_stage(&self) -> FormStage {
        self.session.read().await.form_stage()
    }

    pub async fn submitted_form(&self) -> Option<TravelFormData> {
        self.session.read().await.submitted_form.clone()
    }

    /// Whether replies come from the live provider
    pub async fn is_live(&self) -> bool {
        self.planner.is_live().await
    }
}

/// Builder for [`TravelAgent`]
pub struct AgentBuilder {
    name: Option<String>,
    provider: Option<Arc<dyn PlanProvider>>,
    provider_config: ProviderConfig,
    flights: Option<Arc<dyn FlightProvider>>,
    store: Option<Arc<dyn KeyValueStore>>,
    config: AgentConfig,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            name: None,
            provider: None,
            provider_config: ProviderConfig::default(),
            flights: None,
            store: None,
            config: AgentConfig::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Start with this live provider installed
    pub fn provider(mut self, provider: Arc<dyn PlanProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Configuration for Gemini providers created from API keys
    pub fn provider_config(mut self, config: ProviderConfig) -> Self {
        self.provider_config = config;
        self
    }

    pub fn flight_provider(mut self, flights: Arc<dyn FlightProvider>) -> Self {
        self.flights = Some(flights);
        self
    }

    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<TravelAgent> {
        let name = self.name.unwrap_or_else(|| "Travel Assistant".to_string());

        let mut session = Session::new();
        let mut planner = PlanClient::new(self.config.failure_policy)?;
        if let Some(provider) = self.provider {
            planner = planner.with_provider(provider);
            session.phase = SessionPhase::Interacting;
        }

        let flights = self.flights.unwrap_or_else(|| {
            Arc::new(
                MockFlightProvider::new()
                    .with_delay(Duration::from_millis(self.config.flight_delay_ms)),
            )
        });

        let store = self.store.unwrap_or_else(|| Arc::new(InMemoryStore::new()));

        Ok(TravelAgent {
            name,
            planner,
            flights,
            store,
            provider_config: self.provider_config,
            config: self.config,
            session: RwLock::new(session),
            turns: TurnGate::new(),
            persist_lock: Mutex::new(()),
        })
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
