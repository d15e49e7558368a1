//! Infrastructure layer - database, migrations and credential hashing.

mod db;
pub mod migrations;
mod pbkdf2;

pub use db::Database;
pub use migrations::Migrator;
pub use pbkdf2::Pbkdf2PasswordEncoder;
