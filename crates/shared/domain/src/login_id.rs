//! Login identifier value object.

use std::fmt;

use crate::error::{DomainError, DomainResult};

/// The unique, human-chosen handle a user authenticates with.
///
/// Always non-blank and made of ASCII letters and digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoginId(String);

impl LoginId {
    /// Validate a raw login identifier.
    ///
    /// # Errors
    /// Returns a validation error if the value is blank or contains anything
    /// other than ASCII letters and digits.
    pub fn of(value: &str) -> DomainResult<Self> {
        if value.trim().is_empty() {
            return Err(DomainError::validation("Login ID must not be blank"));
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::validation(
                "Login ID may only contain letters and digits",
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<LoginId> for String {
    fn from(login_id: LoginId) -> Self {
        login_id.0
    }
}
