//! Password value object - raw password policy.
//!
//! A `Password` only ever holds a raw password that passed the policy. It is
//! transient: the user service hashes it through a `PasswordEncoder` and the
//! raw value is never persisted.

use chrono::NaiveDate;

use crate::constants::{
    BIRTHDAY_FORMAT, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PASSWORD_SPECIAL_CHARS,
};
use crate::error::{DomainError, DomainResult};

/// Raw password that satisfies the format and birthdate policy.
#[derive(Clone)]
pub struct Password {
    value: String,
}

// Don't expose the raw value in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Validate a raw password against the policy for a user born on `birthday`.
    ///
    /// # Errors
    /// Returns a validation error if the password is not 8-16 characters of
    /// letters, digits and `@$!%*?&#`, lacks a lowercase letter, uppercase
    /// letter, digit or special character, or embeds the birthdate as
    /// `YYYYMMDD`.
    pub fn of(raw_password: &str, birthday: NaiveDate) -> DomainResult<Self> {
        Self::validate_format(raw_password)?;
        Self::validate_not_contains_birthday(raw_password, birthday)?;
        Ok(Self {
            value: raw_password.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    fn validate_format(password: &str) -> DomainResult<()> {
        let length = password.chars().count();
        let allowed = password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || is_special(c));

        let valid = (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length)
            && allowed
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(is_special);

        if valid {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "Password must be {}-{} characters and include upper and lower case letters, \
                 a digit and one of {}",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH, PASSWORD_SPECIAL_CHARS
            )))
        }
    }

    fn validate_not_contains_birthday(password: &str, birthday: NaiveDate) -> DomainResult<()> {
        let rendered = birthday.format(BIRTHDAY_FORMAT).to_string();
        if password.contains(&rendered) {
            return Err(DomainError::validation(
                "Password must not contain the birthdate",
            ));
        }
        Ok(())
    }
}

fn is_special(c: char) -> bool {
    PASSWORD_SPECIAL_CHARS.contains(c)
}
