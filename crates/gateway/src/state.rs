//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::infra::Database;
use user_service_lib::service::UserService;

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Present only with the Postgres backend
    pub database: Option<Database>,
    pub config: GatewayConfig,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserService>,
        database: Option<Database>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            user_service,
            database,
            config,
        }
    }
}
