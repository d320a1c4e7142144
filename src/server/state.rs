//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - JWT keys for issuing and verifying access tokens
//! - Optional AI completion and media host clients
//! - Request limits and feature switches read from configuration

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    provider::{ai::ChatCompletion, media::MediaStore},
    util::jwt::JwtKeys,
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `JwtKeys` and the provider clients sit behind `Arc`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Signing and verification keys for bearer tokens.
    pub jwt: Arc<JwtKeys>,

    /// Chat completion client; `None` when no AI API key is configured.
    pub ai: Option<Arc<dyn ChatCompletion>>,

    /// Asset host client; `None` when the media host is not configured.
    pub media: Option<Arc<dyn MediaStore>>,

    /// Largest accepted upload in bytes.
    pub media_max_upload_bytes: u64,

    /// Whether forgot-password responses include the raw reset token.
    pub reset_token_in_response: bool,
}

impl AppState {
    /// Creates application state with no external integrations configured.
    ///
    /// Attach clients with [`AppState::with_ai`] and [`AppState::with_media`].
    pub fn new(db: DatabaseConnection, jwt: JwtKeys, media_max_upload_bytes: u64) -> Self {
        Self {
            db,
            jwt: Arc::new(jwt),
            ai: None,
            media: None,
            media_max_upload_bytes,
            reset_token_in_response: false,
        }
    }

    pub fn with_ai(mut self, client: Arc<dyn ChatCompletion>) -> Self {
        self.ai = Some(client);
        self
    }

    pub fn with_media(mut self, client: Arc<dyn MediaStore>) -> Self {
        self.media = Some(client);
        self
    }

    pub fn with_reset_token_in_response(mut self, enabled: bool) -> Self {
        self.reset_token_in_response = enabled;
        self
    }
}
