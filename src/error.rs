//! Error taxonomy for the analysis round trip
//!
//! Every variant is terminal where it is raised: nothing retries, each one
//! maps to a single user-visible message, and none of them touches the
//! currently displayed result.

use crate::model::ValidationError;
use std::fmt;

/// Fallback message when the service fails without saying why
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Network or HTTP-level failure talking to the analysis service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Request never completed (connect, timeout, body read)
    Network(String),
    /// Non-success status without an error message in the body
    Status(u16),
    /// Success status but the body was not JSON
    InvalidBody(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status(_) => write!(f, "Server error"),
            Self::InvalidBody(msg) => write!(f, "Invalid response from server: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// Why an analysis request did not produce a new result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// Missing local input or an unusable payload; no result shown
    Validation(ValidationError),
    /// Network or status failure
    Transport(TransportError),
    /// Well-formed response carrying an `error` field
    Application(String),
    /// A request is already in flight
    Busy,
}

impl AnalyzeError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(message))
    }

    /// Message shown to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Application(msg) if msg.trim().is_empty() => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{}", e),
            Self::Transport(e) => write!(f, "{}", e),
            Self::Application(msg) => write!(f, "{}", msg),
            Self::Busy => write!(f, "Analysis already in progress"),
        }
    }
}

impl std::error::Error for AnalyzeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for AnalyzeError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<TransportError> for AnalyzeError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}
