//! Application error handling
//!
//! Every failing request ends here. [`ApiError`] is the single place where
//! errors become HTTP responses:
//!
//! | Error                                   | Status | Body                      |
//! |-----------------------------------------|--------|---------------------------|
//! | `DomainError::Validation`               | 400    | `{"errors": [...]}`       |
//! | any other `DomainError`                 | 400    | `{"errors": [message]}`   |
//! | bad/missing bearer token                | 401    | `{"message": "..."}`      |
//! | anything else (database, internal, panic) | 500  | `{"message": "..."}`      |
//!
//! Handler panics are caught by [`handle_panic`] and answered like any
//! other unexpected error.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, rejection::QueryRejection, Request},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use personal_shared::{DomainError, ErrorResponseBody};
use std::any::Any;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Message sent instead of the raw one when internal messages are hidden
pub const GENERIC_INTERNAL_MESSAGE: &str = "An internal error occurred";

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

/// Marks a response produced for an unexpected error, so outer layers can
/// tell it apart from a handler that chose to answer 500.
#[derive(Debug, Clone, Copy)]
pub struct UnexpectedError;

impl ApiError {
    /// Shorthand for a validation failure with a single message
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Domain(DomainError::validation([message.into()]))
    }

    /// Classify the error into a status code and response body
    pub fn classify(&self) -> (StatusCode, ErrorResponseBody) {
        match self {
            ApiError::Domain(DomainError::Validation { messages }) => {
                debug!(errors = ?messages, "Validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponseBody::from_errors(messages.clone()),
                )
            }
            ApiError::Domain(other) => {
                warn!(error = %other, "Domain error");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponseBody::from_errors(vec![other.to_string()]),
                )
            }
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponseBody::from_message(msg.clone()),
            ),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponseBody::from_message(err.to_string()),
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponseBody::from_message(err.to_string()),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.classify();
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            response.extensions_mut().insert(UnexpectedError);
        }
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Turn a handler panic into a regular 500 response
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`. A payload
/// that is neither `String` nor `&str` yields an empty message.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        String::new()
    };

    error!(panic = %message, "Handler panicked");

    let mut response = (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponseBody::from_message(message)),
    )
        .into_response();
    response.extensions_mut().insert(UnexpectedError);
    response
}

/// Give a JSON body to error responses that were produced without one
///
/// Covers statuses set outside handlers, like the 408 of the timeout layer
/// or axum's 405. The status and headers are kept, and the body becomes
/// `{"message": <reason phrase>}`.
pub async fn json_error_body(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error())
        || response.headers().contains_key(header::CONTENT_TYPE)
    {
        return response;
    }

    let message = status.canonical_reason().unwrap_or_default();
    warn!(status = %status, "Error response without a body");

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    if status.is_server_error() {
        parts.extensions.insert(UnexpectedError);
    }
    (parts, Json(ErrorResponseBody::from_message(message))).into_response()
}

/// Replace the body of unexpected-error responses with a generic message
///
/// Installed only when `errors.expose_internal_messages` is false. The raw
/// message was already logged when the response was built.
pub async fn redact_unexpected_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.extensions().get::<UnexpectedError>().is_some() {
        let mut redacted = (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponseBody::from_message(GENERIC_INTERNAL_MESSAGE)),
        )
            .into_response();
        redacted.extensions_mut().insert(UnexpectedError);
        return redacted;
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let error = ApiError::Domain(DomainError::validation([
            "name is required",
            "age must be positive",
        ]));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "errors": ["name is required", "age must be positive"] })
        );
    }

    #[tokio::test]
    async fn test_unexpected_error_response() {
        let error = ApiError::Internal(anyhow::anyhow!("division by zero"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<UnexpectedError>().is_some());
        assert_eq!(body_json(response).await, json!({ "message": "division by zero" }));
    }

    #[tokio::test]
    async fn test_empty_message_kept_as_empty_string() {
        let response = ApiError::Internal(anyhow::anyhow!("")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "message": "" }));
    }

    #[tokio::test]
    async fn test_database_error_is_unexpected() {
        let response = ApiError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], sqlx::Error::PoolTimedOut.to_string());
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_response() {
        let response = ApiError::Unauthorized("Missing authorization header".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.extensions().get::<UnexpectedError>().is_none());
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Missing authorization header" })
        );
    }

    #[rstest]
    #[case(DomainError::not_found("Exercise"), "Exercise not found")]
    #[case(DomainError::Conflict("email is already registered".into()), "email is already registered")]
    #[case(DomainError::Forbidden("not your training".into()), "not your training")]
    #[case(DomainError::InvalidCredentials, "invalid email or password")]
    #[tokio::test]
    async fn test_other_domain_errors_become_single_item_list(
        #[case] error: DomainError,
        #[case] expected: &str,
    ) {
        for _ in 0..2 {
            let response = ApiError::Domain(error.clone()).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await, json!({ "errors": [expected] }));
        }
    }

    #[tokio::test]
    async fn test_empty_validation_list_stays_empty() {
        let response = ApiError::Domain(DomainError::Validation { messages: vec![] }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "errors": [] }));
    }

    #[tokio::test]
    async fn test_panic_with_string_payload() {
        let response = handle_panic(Box::new("division by zero".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "message": "division by zero" }));
    }

    #[tokio::test]
    async fn test_panic_with_str_payload() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(body_json(response).await, json!({ "message": "boom" }));
    }

    #[tokio::test]
    async fn test_panic_with_opaque_payload() {
        let response = handle_panic(Box::new(42_u64));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<UnexpectedError>().is_some());
        assert_eq!(body_json(response).await, json!({ "message": "" }));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Validation messages come back unchanged and in order
        #[test]
        fn prop_validation_messages_preserved(messages in prop::collection::vec(".{0,40}", 1..10)) {
            let error = ApiError::Domain(DomainError::Validation { messages: messages.clone() });
            let (status, body) = error.classify();
            prop_assert_eq!(status, StatusCode::BAD_REQUEST);
            prop_assert_eq!(body.errors, Some(messages));
            prop_assert_eq!(body.message, None);
        }

        /// Unexpected errors carry their own message byte-for-byte
        #[test]
        fn prop_internal_message_preserved(message in ".{0,80}") {
            let error = ApiError::Internal(anyhow::anyhow!(message.clone()));
            let (status, body) = error.classify();
            prop_assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            prop_assert_eq!(body.message, Some(message));
            prop_assert_eq!(body.errors, None);
        }
    }
}
