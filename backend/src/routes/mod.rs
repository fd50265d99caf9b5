//! Route definitions for the Personal API
//!
//! This module organizes all API routes and applies middleware.

use crate::config::{CorsConfig, ErrorConfig};
use crate::error::{handle_panic, json_error_body, redact_unexpected_errors, ApiError};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method, Uri},
    middleware,
    routing::get,
    Router,
};
use personal_shared::DomainError;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

mod anamnesis;
mod auth;
mod exercise;
mod health;
pub mod openapi;
mod physical_assessment;
mod training;
mod user;

#[cfg(test)]
mod auth_tests;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        .merge(openapi::docs_routes())
        .fallback(route_not_found);

    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);
    with_fault_handling(routes, &config.errors, request_timeout)
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config.cors))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Personal API v1" }))
        .nest("/auth", auth::auth_routes())
        .nest("/users", user::user_routes())
        .nest("/exercises", exercise::exercise_routes())
        .nest("/trainings", training::training_routes())
        .nest(
            "/physical-assessments",
            physical_assessment::physical_assessment_routes(),
        )
        .nest("/anamnesis-questions", anamnesis::anamnesis_question_routes())
        .nest("/anamnesis-answers", anamnesis::anamnesis_answer_routes())
}

async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    DomainError::NotFound(format!("no route for {} {}", method, uri.path())).into()
}

/// Wrap routes so that every failure, including a handler panic or a
/// timeout, leaves as a JSON error response
///
/// Panics become 500 `{"message": ...}` through [`handle_panic`]. Requests
/// exceeding `request_timeout` and framework rejections such as 405 keep
/// their status and get a JSON body from [`json_error_body`]. When
/// `expose_internal_messages` is off, unexpected-error bodies are replaced
/// with a generic message.
pub fn with_fault_handling<S>(
    routes: Router<S>,
    errors: &ErrorConfig,
    request_timeout: Duration,
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let routes = routes
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::map_response(json_error_body));
    if errors.expose_internal_messages {
        routes
    } else {
        routes.layer(middleware::from_fn(redact_unexpected_errors))
    }
}

/// CORS for the configured origins; `*` allows any origin
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
