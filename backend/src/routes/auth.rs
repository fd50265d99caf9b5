//! Authentication routes: login, token refresh and the current user

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::extract::ValidJson;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use personal_shared::{AuthTokens, LoginRequest, RefreshTokenRequest, UserResponse};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/me", get(me))
}

/// Login with email and password
///
/// Unknown email and wrong password produce the same error.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair issued", body = AuthTokens),
        (status = 400, description = "Invalid input or credentials", body = personal_shared::ErrorResponseBody),
        (status = 500, description = "Unexpected server error", body = personal_shared::ErrorResponseBody)
    ),
    security(()),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = UserService::login(state.db(), state.jwt(), &req.email, &req.password).await?;
    Ok(Json(tokens))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = AuthTokens),
        (status = 401, description = "Refresh token rejected", body = personal_shared::ErrorResponseBody)
    ),
    security(()),
    tag = "Auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RefreshTokenRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = UserService::refresh_token(state.db(), state.jwt(), &req.refresh_token).await?;
    Ok(Json(tokens))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = personal_shared::ErrorResponseBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let user = UserService::get_profile(state.db(), auth.user_id).await?;
    Ok(Json(user))
}
