//! Error types for fitspace

use crate::constants::messages::LOCATION_UNAVAILABLE;
use crate::form::FieldErrors;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized transport failure
///
/// Every backend call surfaces network failures, timeouts and non-2xx
/// statuses in this one shape.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable message
    pub message: String,

    /// HTTP status code, absent for network failures and timeouts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Structured response body, when the backend sent one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl TransportError {
    /// Create a transport error with only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            details: None,
        }
    }
}

/// Main error type for fitspace operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{}", LOCATION_UNAVAILABLE)]
    LocationUnavailable,

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    GeolocationDenied(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for fitspace operations
pub type Result<T> = std::result::Result<T, Error>;
