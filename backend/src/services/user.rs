//! User service for registration, authentication and account management
//!
//! Password hashing and verification run on the blocking thread pool; the
//! JWT service is borrowed from `AppState` with its keys already derived.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{
    unique_violation, CreateUser, UserRecord, UserRepository, USERS_EMAIL_KEY,
};
use personal_shared::{
    AuthTokens, CreateUserRequest, DomainError, UpdateUserRequest, UserResponse, UserRole,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

fn email_taken() -> DomainError {
    DomainError::Conflict("email is already registered".to_string())
}

/// User service
pub struct UserService;

impl UserService {
    /// Register a new account. The request has already been validated.
    pub async fn register(pool: &PgPool, req: CreateUserRequest) -> Result<UserResponse, ApiError> {
        let role = match req.role.as_deref() {
            Some(role) => role
                .parse::<UserRole>()
                .map_err(|e| DomainError::validation([e]))?,
            None => UserRole::default(),
        };

        if UserRepository::email_exists(pool, &req.email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(email_taken().into());
        }

        let password_hash = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(
            pool,
            CreateUser {
                name: req.name.trim().to_string(),
                email: req.email.trim().to_lowercase(),
                password_hash,
                age: req.age,
                role: role.as_str().to_string(),
            },
        )
        .await
        .map_err(|e| {
            // A concurrent registration can take the email after the check above
            if unique_violation(&e) == Some(USERS_EMAIL_KEY) {
                ApiError::from(email_taken())
            } else {
                ApiError::Internal(e)
            }
        })?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user.into())
    }

    /// Exchange email and password for a token pair
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let user = UserRepository::find_by_email(pool, email.trim())
            .await
            .map_err(ApiError::Internal)?;

        let valid = PasswordService::verify_async(
            password.to_string(),
            user.as_ref().map(|u| u.password_hash.clone()),
        )
        .await
        .map_err(ApiError::Internal)?;

        let user = match user {
            Some(user) if valid => user,
            _ => return Err(DomainError::InvalidCredentials.into()),
        };

        Self::issue_tokens(jwt_service, user.id, parse_role(&user.role)?)
    }

    /// Issue a fresh token pair for a valid refresh token
    pub async fn refresh_token(
        pool: &PgPool,
        jwt_service: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt_service
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        // The role may have changed since the refresh token was issued
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        Self::issue_tokens(jwt_service, user.id, parse_role(&user.role)?)
    }

    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| DomainError::not_found("user"))?;

        Ok(user.into())
    }

    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        let user = UserRepository::update(pool, user_id, req.name.trim(), req.age)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| DomainError::not_found("user"))?;

        Ok(user.into())
    }

    pub async fn delete_account(pool: &PgPool, user_id: Uuid) -> Result<(), ApiError> {
        let deleted = UserRepository::delete(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(DomainError::not_found("user").into());
        }

        info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    fn issue_tokens(
        jwt_service: &JwtService,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<AuthTokens, ApiError> {
        let access_token = jwt_service
            .generate_access_token(user_id, role)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt_service
            .generate_refresh_token(user_id, role)
            .map_err(ApiError::Internal)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_service.access_token_expiry_secs(),
        })
    }
}

/// Roles in the database are written by this service, so a bad one is a bug
fn parse_role(role: &str) -> Result<UserRole, ApiError> {
    role.parse::<UserRole>()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("stored role is invalid: {}", e)))
}
