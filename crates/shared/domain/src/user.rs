//! User aggregate and its presentation views.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::email::Email;
use crate::error::{DomainError, DomainResult};
use crate::login_id::LoginId;
use crate::masked_name::MaskedName;

/// User aggregate.
///
/// Login id, name, email and birthday are fixed at creation. The password
/// hash is the only field that changes afterwards, through
/// [`User::change_password`].
#[derive(Clone)]
pub struct User {
    id: Option<Uuid>,
    login_id: String,
    password_hash: String,
    name: String,
    email: String,
    birthday: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

// Don't expose the credential in debug output (security)
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("login_id", &self.login_id)
            .field("password_hash", &"[REDACTED]")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("birthday", &self.birthday)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl User {
    /// Create a new, not yet persisted user.
    ///
    /// The password hash is taken as-is: password policy is checked against
    /// the raw password before hashing, never here.
    ///
    /// # Errors
    /// Returns a validation error if the login id or email is malformed or
    /// the name is blank.
    pub fn create(
        login_id: &str,
        password_hash: String,
        name: &str,
        email: &str,
        birthday: NaiveDate,
    ) -> DomainResult<Self> {
        let login_id = LoginId::of(login_id)?;
        if name.trim().is_empty() {
            return Err(DomainError::validation("Name must not be blank"));
        }
        let email = Email::of(email)?;

        let now = Utc::now();
        Ok(Self {
            id: None,
            login_id: login_id.into_string(),
            password_hash,
            name: name.to_string(),
            email: email.into_string(),
            birthday,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a persisted user from storage.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        login_id: String,
        password_hash: String,
        name: String,
        email: String,
        birthday: NaiveDate,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            login_id,
            password_hash,
            name,
            email,
            birthday,
            created_at,
            updated_at,
        }
    }

    /// Attach the storage-assigned identifier.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Replace the stored password hash.
    ///
    /// Whether the new password differs from the current one is decided on
    /// raw passwords by the caller; hashes are salted and never comparable.
    pub fn change_password(&mut self, new_password_hash: String) {
        self.password_hash = new_password_hash;
        self.updated_at = Utc::now();
    }

    /// Storage identifier, `None` until first saved
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn login_id(&self) -> &str {
        &self.login_id
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Display name with its last character masked
    pub fn masked_name(&self) -> DomainResult<MaskedName> {
        MaskedName::from_name(&self.name)
    }
}

/// User returned after sign-up (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Option<Uuid>,
    /// Login identifier
    pub login_id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            login_id: user.login_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login_id: user.login_id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Profile of the authenticated user, with the display name masked
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Login identifier
    pub login_id: String,
    /// Masked display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Birthdate
    pub birthday: NaiveDate,
}

impl TryFrom<&User> for UserProfile {
    type Error = DomainError;

    fn try_from(user: &User) -> DomainResult<Self> {
        Ok(Self {
            login_id: user.login_id.clone(),
            name: user.masked_name()?.into_string(),
            email: user.email.clone(),
            birthday: user.birthday,
        })
    }
}
