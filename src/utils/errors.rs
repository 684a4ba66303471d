//! Error handling for CampusEvents
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;
use crate::models::event::{Event, EventField, EventId, EventStatus};

/// Main error type for CampusEvents
#[derive(Error, Debug)]
pub enum CampusEventsError {
    #[error("{0}")]
    FieldLocked(#[from] FieldLockedError),

    #[error("Event {event_id} changed to {status} before the edit was applied: {message}")]
    StaleStatusMismatch {
        event_id: EventId,
        status: EventStatus,
        message: String,
        event: Box<Event>,
    },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Registration closed for event {event_id}")]
    RegistrationClosed { event_id: EventId },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Raised locally when an edit touches a field the current lifecycle stage locks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Field '{field}' cannot be edited while the event is {status}")]
pub struct FieldLockedError {
    pub field: EventField,
    pub status: EventStatus,
}

/// Result type alias for CampusEvents operations
pub type Result<T> = std::result::Result<T, CampusEventsError>;

impl CampusEventsError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CampusEventsError::FieldLocked(_) => true,
            CampusEventsError::StaleStatusMismatch { .. } => true,
            CampusEventsError::InvalidPayload(_) => false,
            CampusEventsError::InvalidStateTransition { .. } => false,
            CampusEventsError::RegistrationClosed { .. } => false,
            CampusEventsError::PermissionDenied(_) => false,
            CampusEventsError::Unauthorized(_) => false,
            CampusEventsError::NotFound(_) => false,
            CampusEventsError::Api { status, .. } => *status >= 500,
            CampusEventsError::Config(_) => false,
            CampusEventsError::Http(_) => true,
            CampusEventsError::Serialization(_) => false,
            CampusEventsError::Io(_) => true,
            CampusEventsError::UrlParse(_) => false,
            CampusEventsError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CampusEventsError::FieldLocked(_) => ErrorSeverity::Info,
            CampusEventsError::InvalidInput(_) => ErrorSeverity::Info,
            CampusEventsError::StaleStatusMismatch { .. } => ErrorSeverity::Warning,
            CampusEventsError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            CampusEventsError::RegistrationClosed { .. } => ErrorSeverity::Info,
            CampusEventsError::PermissionDenied(_) => ErrorSeverity::Warning,
            CampusEventsError::Unauthorized(_) => ErrorSeverity::Warning,
            CampusEventsError::Config(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
