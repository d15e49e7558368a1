//! Display-name masking.

use std::fmt;

use crate::constants::MASK_CHAR;
use crate::error::{DomainError, DomainResult};

/// A display name with its final character replaced by `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedName(String);

impl MaskedName {
    /// Derive the masked form of a display name.
    ///
    /// Masking works on characters, not bytes, so `홍길동` becomes `홍길*`.
    ///
    /// # Errors
    /// Returns a validation error for an empty name.
    pub fn from_name(name: &str) -> DomainResult<Self> {
        let mut chars = name.chars();
        if chars.next_back().is_none() {
            return Err(DomainError::validation("Name must not be empty"));
        }

        let mut masked = String::with_capacity(name.len());
        masked.push_str(chars.as_str());
        masked.push(MASK_CHAR);
        Ok(Self(masked))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for MaskedName {
    type Error = DomainError;

    fn try_from(name: &str) -> DomainResult<Self> {
        Self::from_name(name)
    }
}

impl fmt::Display for MaskedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
