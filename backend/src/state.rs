//! Application state
//!
//! `AppState::new` is the composition root: it builds every shared
//! collaborator once at startup and handlers receive them through axum's
//! `State` extractor. Nothing is looked up globally at request time.

use crate::auth::JwtService;
use crate::config::AppConfig;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are cheap to clone: `PgPool` and `JwtService` are internally
/// reference counted and the config is wrapped in `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// JWT service with cached keys
    pub jwt: JwtService,
}

impl AppState {
    /// Wire the application's collaborators
    ///
    /// Derives the JWT keys from the configured secret, so call it once.
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.jwt);

        Self {
            db,
            config: Arc::new(config),
            jwt,
        }
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
