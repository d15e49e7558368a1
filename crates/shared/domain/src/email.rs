//! Email value object.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DomainError, DomainResult};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,6}$")
        .expect("email pattern is a valid regex")
});

/// An email address in conventional `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate a raw email address.
    ///
    /// # Errors
    /// Returns a validation error if the value is blank or malformed.
    pub fn of(value: &str) -> DomainResult<Self> {
        if value.trim().is_empty() {
            return Err(DomainError::validation("Email must not be blank"));
        }
        if !EMAIL_PATTERN.is_match(value) {
            return Err(DomainError::validation("Invalid email format"));
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

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
