//! Common utilities shared across the identity crates.
//!
//! This crate provides:
//! - Unified error handling with HTTP response conversion
//! - Configuration structures
//! - The standard API response envelope

pub mod config;
pub mod error;
pub mod response;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use response::ApiResponse;
