//! Error types for the Personal API application
//!
//! [`DomainError`] is what application logic raises on purpose. Anything
//! that is not a `DomainError` is treated as an unexpected failure by the
//! HTTP layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Errors intentionally raised by application logic
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more input validation failures, in the order they were found
    #[error("{}", .messages.join("; "))]
    Validation { messages: Vec<String> },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("invalid email or password")]
    InvalidCredentials,
}

impl DomainError {
    /// Build a validation error from an ordered list of messages
    pub fn validation<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DomainError::Validation {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn not_found(entity: &str) -> Self {
        DomainError::NotFound(format!("{} not found", entity))
    }
}

/// Body of every error response
///
/// Exactly one of `errors` (validation failures) or `message`
/// (everything else) is present on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponseBody {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            errors: Some(errors),
            message: None,
        }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }
}
