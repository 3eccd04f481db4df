//! Session state for a travel conversation
//!
//! This module provides the mutable state owned by a [`crate::TravelAgent`]:
//! the conversation context, configuration phase, form stage, and the active
//! suggestion and flight options.

use crate::context::Context;
use crate::flight::FlightOption;
use crate::form::{FormStage, TravelFormData};
use crate::suggestion::Suggestion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Configuration phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Asking the user for an API key
    AwaitingConfiguration,
    /// Chatting, with or without a live provider
    Interacting,
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::AwaitingConfiguration
    }
}

/// A travel conversation session
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Committed messages
    pub context: Context,
    /// Configuration phase
    pub phase: SessionPhase,
    /// Last submitted trip form, if any
    pub submitted_form: Option<TravelFormData>,
    /// Active destination suggestion
    pub suggestion: Option<Suggestion>,
    /// Flight options from the last form submission
    pub flights: Vec<FlightOption>,
    /// When the session was last updated
    pub updated_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a new session awaiting configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Form sub-stage
    pub fn form_stage(&self) -> FormStage {
        if self.submitted_form.is_some() {
            FormStage::Submitted
        } else {
            FormStage::AwaitingSubmission
        }
    }

    /// Outbound prompt for a follow-up question
    ///
    /// Once a form has been submitted every question carries its trip details.
    pub fn outbound_prompt(&self, text: &str) -> String {
        match &self.submitted_form {
            Some(form) => form.with_trip_context(text),
            None => text.to_string(),
        }
    }

    /// Update the session's timestamp
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Marks the single turn allowed in flight
///
/// The gate sits outside the session lock so that releasing it never waits
/// on readers. A [`TurnTicket`] holds the gate closed until it is dropped,
/// including when the turn's future is dropped mid-await.
#[derive(Debug, Default)]
pub struct TurnGate {
    busy: AtomicBool,
}

impl TurnGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate, or `None` if a turn is already in flight
    pub fn try_begin(&self) -> Option<TurnTicket<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TurnTicket { gate: self })
    }

    /// Whether a turn is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof of an in-flight turn; reopens the gate on drop
#[derive(Debug)]
pub struct TurnTicket<'a> {
    gate: &'a TurnGate,
}

impl Drop for TurnTicket<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
