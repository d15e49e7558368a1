//! Password encoding port.
//!
//! The domain only knows that a raw password can be turned into a
//! self-describing encoded credential and checked against one. The concrete
//! algorithm lives in the user service infrastructure.

/// One-way password encoder.
pub trait PasswordEncoder: Send + Sync {
    /// Encode a raw password into a persisted credential string.
    fn encode(&self, raw_password: &str) -> String;

    /// Check a raw password against an encoded credential.
    ///
    /// Malformed credentials never match.
    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;
}
