//! Conversation context
//!
//! This module provides the message types and the ordered conversation log,
//! plus the transient placeholder message rendered while a reply is pending.

use crate::error::{StorageError, StorageResult};
use crate::types::MessageId;
use serde::{Deserialize, Serialize};

/// Identifier used for the pending placeholder
pub const PENDING_MESSAGE_ID: &str = "loading";

/// Content shown while a reply is pending
pub const PENDING_MESSAGE_CONTENT: &str = "Thinking...";

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user
    User,
    /// Message from the travel assistant
    Assistant,
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for the message
    pub id: MessageId,
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    /// The placeholder rendered while a reply is pending
    pub fn pending() -> Self {
        Self {
            id: MessageId::from(PENDING_MESSAGE_ID),
            role: MessageRole::Assistant,
            content: PENDING_MESSAGE_CONTENT.to_string(),
        }
    }

    /// Whether this is the pending placeholder
    pub fn is_pending(&self) -> bool {
        self.id.as_str() == PENDING_MESSAGE_ID
    }
}

/// Ordered conversation log
///
/// Messages are append-only until [`Context::clear`]. The pending placeholder
/// is never part of the log; see [`crate::session::TurnGate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    messages: Vec<Message>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from a previously persisted log
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Append a message to the log
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Committed messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages for display: the log, followed by the placeholder when a
    /// reply is pending
    pub fn transcript(&self, pending: bool) -> Vec<Message> {
        let mut messages = self.messages.clone();
        if pending {
            messages.push(Message::pending());
        }
        messages
    }

    /// Drop every message
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Number of committed messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Serialize the committed log as a JSON array
    pub fn to_json(&self) -> StorageResult<String> {
        serde_json::to_string(&self.messages)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Rebuild a context from a JSON array
    pub fn from_json(json: &str) -> StorageResult<Self> {
        let messages: Vec<Message> = serde_json::from_str(json)
            .map_err(|e| StorageError::Deserialization(e.to_string()))?;
        Ok(Self::with_messages(messages))
    }
}
