//! # Wayfarer - Conversational Travel Planning for Rust
//!
//! Wayfarer is the engine behind a travel-planning assistant. It keeps a chat
//! conversation, turns a structured trip form into a plan request, asks a
//! large language model (Google Gemini) for the plan, and falls back to canned
//! replies when no API key is configured.
//!
//! ## Features
//!
//! - 💬 **Conversation Orchestration**: One user and one assistant message per turn, with a single pending placeholder
//! - 🗺️ **Trip Forms**: Validated trip details that give every follow-up question its context
//! - 🔌 **Plan Providers**: Gemini over HTTP, or canned keyword-matched replies without a key
//! - 🛡️ **Failure Policy**: One configurable answer to every kind of provider failure
//! - ✈️ **Flight Options**: A mock flight provider behind a trait
//! - 🌍 **Destination Suggestions**: Keyword lookup over a small destination table
//! - 💾 **Persistence**: History and API key through in-memory or file-backed stores
//!
//! ## Quick Start
//!
//! ```no_run
//! use wayfarer::{TravelAgent, TravelFormData};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let agent = TravelAgent::builder().name("Travel Assistant").build()?;
//! agent.restore().await?;
//!
//! if let Ok(key) = std::env::var("GEMINI_API_KEY") {
//!     agent.configure_api_key(&key).await?;
//! } else {
//!     agent.continue_without_key().await;
//! }
//!
//! let form = TravelFormData::new("New York", "Paris, France")
//!     .with_dates("2025-06-01", "2025-06-08")
//!     .with_budget("$3000")
//!     .with_travelers("2");
//! let outcome = agent.submit_form(form).await?;
//! println!("{}", outcome.reply);
//!
//! let reply = agent.send_message("What should we eat?").await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 TravelAgent                     │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │   Session    │  │  Suggestions │            │
//! │  │  - Messages  │  │  - Keywords  │            │
//! │  │  - Form      │  │  - Trip span │            │
//! │  └──────────────┘  └──────────────┘            │
//! │  ┌──────────────────────────────────┐          │
//! │  │   PlanClient (failure policy)    │          │
//! │  │  - Gemini  - Canned replies      │          │
//! │  └──────────────────────────────────┘          │
//! │  ┌──────────────────────────────────┐          │
//! │  │  Flights         Key/Value Store │          │
//! │  │  - Mock          - Memory - File │          │
//! │  └──────────────────────────────────┘          │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`agent`]: Conversation orchestrator and builder
//! - [`planner`]: Plan client and failure policy
//! - [`provider`]: Plan providers (Gemini, canned)
//! - [`rules`]: Ordered first-match rule tables
//! - [`form`]: Trip form data and prompt building
//! - [`suggestion`]: Destination suggestion lookup
//! - [`flight`]: Flight option types and the mock provider
//! - [`storage`]: Key/value storage backends
//! - [`context`]: Messages and the conversation log
//! - [`session`]: Per-conversation state
//! - [`error`]: Error types and result aliases
//!
//! ## Environment
//!
//! - `GEMINI_API_KEY`: used by [`GeminiProvider::from_env`]
//! - `GEMINI_MODEL`: overrides the model in [`ProviderConfig::from_env`]
//! - `RUST_LOG`: log filter for the demos

// Core type definitions
pub mod types;

// Error types
pub mod error;

// Context management
pub mod context;

// Session management
pub mod session;

// Rule tables
pub mod rules;

// Trip form
pub mod form;

// Destination suggestions
pub mod suggestion;

// Flight options
pub mod flight;

// Provider abstraction
pub mod provider;

// Plan client
pub mod planner;

// Storage backends
pub mod storage;

// Agent core
pub mod agent;

pub use agent::{AgentBuilder, AgentConfig, PlanOutcome, TravelAgent, DEFAULT_ERROR_MESSAGE};
pub use context::{Context, Message, MessageRole};
pub use error::{
    AgentError, FormError, ProviderError, Result, RuleError, StorageError,
};
pub use flight::{
    Airport, CarbonEmissions, FlightOption, FlightProvider, FlightSegment, Layover,
    MockFlightProvider,
};
pub use form::{FormStage, TravelFormData};
pub use planner::{FailurePolicy, PlanClient, APOLOGY_MESSAGE};
pub use provider::{CannedProvider, CannedResponder, GeminiProvider, PlanProvider, ProviderConfig};
pub use rules::{RuleCondition, RuleTable};
pub use session::{Session, SessionPhase};
pub use storage::{FileStore, InMemoryStore, KeyValueStore};
pub use suggestion::Suggestion;
pub use types::*;
