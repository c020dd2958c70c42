//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn FullRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(repository: Arc<dyn FullRepository>, config: AppConfig) -> Self {
        Self {
            repository,
            config: Arc::new(config),
        }
    }

    pub fn repo(&self) -> &(dyn FullRepository + 'static) {
        self.repository.as_ref()
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.config.auth.bcrypt_cost
    }
}
