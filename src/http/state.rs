//! Application state for the HTTP server.

use std::sync::Arc;

use super::auth::AuthConfig;
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Token verification settings
    pub auth: AuthConfig,
}

impl AppState {
    /// Create a new application state with the given repository and auth
    /// configuration.
    pub fn new(repository: Arc<dyn FullRepository>, auth: AuthConfig) -> Self {
        Self { repository, auth }
    }
}
