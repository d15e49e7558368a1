//! User service configuration.

use common::{DatabaseConfig, StorageBackend};

/// Storage settings for the identity service.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Which user store backs the service
    pub storage: StorageBackend,
    /// Connection settings, used only with the Postgres backend
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            storage: StorageBackend::from_env(),
            database: DatabaseConfig::from_env(),
        }
    }
}
