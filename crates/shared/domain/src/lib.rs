//! Domain layer - Core identity entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the validated identity value objects, the `User` aggregate and the
//! password-encoding port implemented by the user service.

pub mod constants;
pub mod email;
pub mod encoder;
pub mod error;
pub mod login_id;
pub mod masked_name;
pub mod password;
pub mod user;

pub use constants::*;
pub use email::Email;
pub use encoder::PasswordEncoder;
pub use error::{DomainError, DomainResult};
pub use login_id::LoginId;
pub use masked_name::MaskedName;
pub use password::Password;
pub use user::{User, UserProfile, UserResponse};
