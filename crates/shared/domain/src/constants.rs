//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Password Policy
// =============================================================================

/// Minimum raw password length (characters)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum raw password length (characters)
pub const MAX_PASSWORD_LENGTH: usize = 16;

/// Special characters a password may (and must at least once) contain
pub const PASSWORD_SPECIAL_CHARS: &str = "@$!%*?&#";

/// Birthdate rendering that must never appear inside a password
pub const BIRTHDAY_FORMAT: &str = "%Y%m%d";

// =============================================================================
// Credential Hashing
// =============================================================================

/// PBKDF2-HMAC-SHA256 iteration count
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Derived key length in bytes (256 bits)
pub const DERIVED_KEY_LENGTH: usize = 32;

/// Random salt length in bytes
pub const SALT_LENGTH: usize = 16;

/// Separator between the encoded salt and the encoded derived key
pub const ENCODED_CREDENTIAL_SEPARATOR: char = ':';

// =============================================================================
// Authentication
// =============================================================================

/// Request header carrying the caller's login identifier
pub const LOGIN_ID_HEADER: &str = "X-Loopers-LoginId";

/// Request header carrying the caller's raw password
pub const LOGIN_PW_HEADER: &str = "X-Loopers-LoginPw";

/// Rejection when the supplied current password is not the stored one,
/// including when another change replaced it first
pub const CURRENT_PASSWORD_MISMATCH: &str = "Current password does not match";

/// Path prefixes that bypass the authentication gate
pub const AUTH_EXCLUDE_PATHS: &[&str] = &[
    "/api/v1/users/signup",
    "/health",
    "/swagger-ui",
    "/api-docs",
];

/// Check if a request path must pass the authentication gate
pub fn requires_authentication(path: &str) -> bool {
    !AUTH_EXCLUDE_PATHS
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

// =============================================================================
// Masking
// =============================================================================

/// Character replacing the last character of a masked display name
pub const MASK_CHAR: char = '*';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_paths_skip_authentication() {
        assert!(!requires_authentication("/api/v1/users/signup"));
        assert!(!requires_authentication("/health"));
        assert!(!requires_authentication("/swagger-ui/index.html"));
        assert!(!requires_authentication("/api-docs/openapi.json"));
    }

    #[test]
    fn test_protected_paths_require_authentication() {
        assert!(requires_authentication("/api/v1/users/me"));
        assert!(requires_authentication("/api/v1/users/me/password"));
        assert!(requires_authentication("/"));
    }
}
