//! PBKDF2-HMAC-SHA256 credential encoder.
//!
//! Encoded form is `base64(salt):base64(derived_key)` with standard padded
//! base64, a 16-byte random salt, 10 000 iterations and a 32-byte key.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use domain::{
    PasswordEncoder, DERIVED_KEY_LENGTH, ENCODED_CREDENTIAL_SEPARATOR, PBKDF2_ITERATIONS,
    SALT_LENGTH,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Pbkdf2PasswordEncoder;

impl Pbkdf2PasswordEncoder {
    pub fn new() -> Self {
        Self
    }

    fn generate_salt() -> [u8; SALT_LENGTH] {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);
        salt
    }

    fn derive(raw_password: &str, salt: &[u8]) -> [u8; DERIVED_KEY_LENGTH] {
        let mut key = [0u8; DERIVED_KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(raw_password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
        key
    }
}

impl PasswordEncoder for Pbkdf2PasswordEncoder {
    fn encode(&self, raw_password: &str) -> String {
        let salt = Self::generate_salt();
        let key = Self::derive(raw_password, &salt);
        format!(
            "{}{}{}",
            STANDARD.encode(salt),
            ENCODED_CREDENTIAL_SEPARATOR,
            STANDARD.encode(key)
        )
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        let mut parts = encoded_password.split(ENCODED_CREDENTIAL_SEPARATOR);
        let (Some(salt), Some(expected), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };

        let (Ok(salt), Ok(expected)) = (STANDARD.decode(salt), STANDARD.decode(expected)) else {
            return false;
        };

        if expected.len() != DERIVED_KEY_LENGTH {
            return false;
        }

        let actual = Self::derive(raw_password, &salt);
        actual[..].ct_eq(&expected[..]).into()
    }
}
