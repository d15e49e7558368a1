//! User Service Library
//!
//! Identity use cases (sign-up, authentication, password rotation) on top of
//! a pluggable user store. The gateway embeds it in-process.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::{DatabaseConfig, StorageBackend};
use sea_orm::DbErr;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::{Database, Pbkdf2PasswordEncoder};
use crate::repository::{InMemoryUserStore, UserRepository, UserStore};
use crate::service::{UserManager, UserService};

/// A ready user store and, for Postgres, the database behind it.
pub struct Storage {
    pub repository: Arc<dyn UserRepository>,
    pub database: Option<Database>,
}

/// Open the configured user store, applying migrations for Postgres.
pub async fn init_storage(config: &UserServiceConfig) -> Result<Storage, DbErr> {
    match config.storage {
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            Ok(Storage {
                repository: Arc::new(UserStore::new(db.get_connection())),
                database: Some(db),
            })
        }
        StorageBackend::Memory => {
            info!("Using in-memory user store; data is lost on shutdown");
            Ok(Storage {
                repository: Arc::new(InMemoryUserStore::new()),
                database: None,
            })
        }
    }
}

/// Wire the identity service with the PBKDF2 encoder.
pub fn build_user_service(repository: Arc<dyn UserRepository>) -> Arc<dyn UserService> {
    Arc::new(UserManager::new(
        repository,
        Arc::new(Pbkdf2PasswordEncoder::new()),
    ))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &DatabaseConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
