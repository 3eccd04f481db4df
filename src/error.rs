//! Error types for the Wayfarer library
//!
//! This module provides the error types, built with thiserror, for all Wayfarer operations.

use thiserror::Error;

/// Main error type for Wayfarer library operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AgentError {
    /// Plan provider error
    #[error("Plan provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Trip form rejected
    #[error("Trip form error: {0}")]
    Form(#[from] FormError),

    /// Rule table could not be built
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A turn is already in flight
    #[error("A request is already in progress")]
    Busy,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while talking to a plan provider
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProviderError {
    /// Request never produced an HTTP response
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success status
    #[error("Endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not contain a candidate text
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Provider is not usable as configured
    #[error("Provider configuration error: {0}")]
    Configuration(String),
}

/// Storage-related errors
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StorageError {
    /// Reading or writing an entry failed
    #[error("Storage I/O failed for {key}: {message}")]
    Io { key: String, message: String },

    /// Serialization failed
    #[error("Storage serialization failed: {0}")]
    Serialization(String),

    /// Deserialization failed
    #[error("Storage deserialization failed: {0}")]
    Deserialization(String),

    /// Internal storage error
    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// Trip form errors
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FormError {
    /// Required fields left empty
    #[error("Please fill in the required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A date field is not in YYYY-MM-DD form
    #[error("Invalid date for {field}: {value}")]
    InvalidDate { field: String, value: String },
}

/// Rule table errors
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RuleError {
    /// Regex condition failed to compile
    #[error("Invalid rule pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Type alias for Wayfarer library Result
pub type Result<T> = std::result::Result<T, AgentError>;

/// Type alias for Storage Result
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Type alias for Provider Result
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
