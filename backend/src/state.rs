//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything here is built once at startup and read-only afterwards:
//! the database pool, the config snapshot, the JWT keys and the résumé
//! parser client.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::resume_parser::ResumeParserClient;
use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are cheap to clone (`PgPool` and the services are
/// internally reference counted).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// External résumé parser
    pub resume_parser: ResumeParserClient,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_expiry_secs);
        let resume_parser = ResumeParserClient::new(&config.resume_parser)?;

        Ok(Self {
            db,
            config: Arc::new(config),
            jwt,
            resume_parser,
        })
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Get a reference to the résumé parser client
    #[inline]
    pub fn resume_parser(&self) -> &ResumeParserClient {
        &self.resume_parser
    }
}
