//! Request extractors whose failures go through [`ApiError`]
//!
//! axum's own `Json`, `Path` and `Query` reject with plain-text bodies.
//! These wrappers turn those rejections into validation errors so every
//! client error has the same JSON shape.

use crate::error::ApiError;
use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    Json,
};
use personal_shared::ValidateRequest;
use serde::de::DeserializeOwned;

/// JSON body that is deserialized and then validated
pub struct ValidJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + ValidateRequest,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Path parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query string parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::IntoResponse,
        routing::post,
        Router,
    };
    use personal_shared::CreateUserRequest;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn accept_user(ValidJson(req): ValidJson<CreateUserRequest>) -> impl IntoResponse {
        Json(json!({ "name": req.name }))
    }

    fn app() -> Router {
        Router::new().route("/users", post(accept_user))
    }

    async fn send(body: &str, content_type: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/users")
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let body = json!({ "name": "Ana", "email": "ana@example.com", "password": "longenough", "age": 30 });
        let (status, json) = send(&body.to_string(), "application/json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Ana");
    }

    #[tokio::test]
    async fn test_invalid_body_reports_violations() {
        let body = json!({ "name": "", "email": "ana@example.com", "password": "longenough", "age": -2 });
        let (status, json) = send(&body.to_string(), "application/json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({ "errors": ["name is required", "age must be positive"] }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_validation_error() {
        let (status, json) = send("{not json", "application/json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"].as_array().unwrap().len(), 1);
        assert!(json.get("message").is_none());
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_a_validation_error() {
        let (status, json) = send("{}", "text/plain").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["errors"][0].as_str().unwrap().contains("Content-Type"));
    }
}
