//! Error types for eventmap.

use thiserror::Error;

use crate::key::EventKey;

/// Errors that can occur in eventmap operations.
#[derive(Error, Debug)]
pub enum EventMapError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("A save toggle for '{0}' is already in flight")]
    ToggleInFlight(EventKey),

    #[error("Event '{0}' has no coordinates")]
    NoCoordinates(EventKey),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EventMapError {
    /// Whether the backend rejected the request rather than failing to answer it.
    pub fn is_semantic(&self) -> bool {
        matches!(self, EventMapError::Conflict(_) | EventMapError::NotFound(_))
    }
}

impl From<reqwest::Error> for EventMapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EventMapError::MalformedResponse(err.to_string())
        } else {
            EventMapError::Transport(err.to_string())
        }
    }
}

/// Result type alias for eventmap operations.
pub type EventMapResult<T> = Result<T, EventMapError>;
