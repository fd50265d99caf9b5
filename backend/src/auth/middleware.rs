//! Authentication extractor
//!
//! Validates the bearer token with the pre-computed JWT keys held in
//! AppState and exposes the caller's identity to handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use personal_shared::{DomainError, UserRole};
use uuid::Uuid;

/// Authenticated user extracted from JWT
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_trainer(&self) -> bool {
        self.role == UserRole::Trainer
    }

    /// Fail with a domain error unless the caller is a trainer
    pub fn require_trainer(&self) -> Result<(), DomainError> {
        if self.is_trainer() {
            Ok(())
        } else {
            Err(DomainError::Forbidden(
                "only trainers can perform this action".to_string(),
            ))
        }
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

        let claims = app_state
            .jwt()
            .validate_access_token(token)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        Ok(AuthUser {
            user_id,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_trainer() {
        let trainer = AuthUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Trainer,
        };
        let student = AuthUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Student,
        };

        assert!(trainer.require_trainer().is_ok());
        assert!(matches!(
            student.require_trainer(),
            Err(DomainError::Forbidden(_))
        ));
    }
}
