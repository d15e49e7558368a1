//! Identity service - sign-up, credential verification and password rotation.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Password, PasswordEncoder, User, CURRENT_PASSWORD_MISMATCH};

use crate::repository::UserRepository;

/// Public message for every failed login, whatever the cause.
const INVALID_CREDENTIALS: &str = "Invalid login ID or password";

/// Well-formed credential (zero salt, zero key) verified when the login ID
/// is unknown, so both failure paths pay for one key derivation.
const DUMMY_CREDENTIAL: &str =
    "AAAAAAAAAAAAAAAAAAAAAA==:AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user and return it with its storage-assigned id.
    async fn sign_up(
        &self,
        login_id: &str,
        raw_password: &str,
        name: &str,
        email: &str,
        birthday: NaiveDate,
    ) -> AppResult<User>;

    /// Resolve a user from raw credentials.
    ///
    /// Unknown login IDs and wrong passwords both fail with `Unauthorized`.
    async fn authenticate(&self, login_id: &str, raw_password: &str) -> AppResult<User>;

    /// Replace a user's password after verifying the current one.
    async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()>;
}

/// Concrete implementation of UserService using the storage and hashing ports.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    encoder: Arc<dyn PasswordEncoder>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>, encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self { repo, encoder }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn sign_up(
        &self,
        login_id: &str,
        raw_password: &str,
        name: &str,
        email: &str,
        birthday: NaiveDate,
    ) -> AppResult<User> {
        if self.repo.exists_by_login_id(login_id).await? {
            return Err(AppError::conflict("Login ID"));
        }

        let password = Password::of(raw_password, birthday)?;
        let password_hash = self.encoder.encode(password.as_str());

        let user = User::create(login_id, password_hash, name, email, birthday)?;
        let saved = self.repo.save(user).await?;

        info!(login_id = %saved.login_id(), user_id = ?saved.id(), "User signed up");
        Ok(saved)
    }

    async fn authenticate(&self, login_id: &str, raw_password: &str) -> AppResult<User> {
        let Some(user) = self.repo.find_by_login_id(login_id).await? else {
            self.encoder.matches(raw_password, DUMMY_CREDENTIAL);
            debug!(login_id, "Authentication failed: unknown login ID");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.encoder.matches(raw_password, user.password_hash()) {
            debug!(login_id, "Authentication failed: password mismatch");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(user)
    }

    async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")?;

        if !self.encoder.matches(current_password, user.password_hash()) {
            debug!(%user_id, "Password change rejected: current password mismatch");
            return Err(AppError::unauthorized(CURRENT_PASSWORD_MISMATCH));
        }

        if current_password == new_password {
            return Err(AppError::validation(
                "New password must differ from the current password",
            ));
        }

        let password = Password::of(new_password, user.birthday())?;
        let previous_hash = user.password_hash().to_string();
        user.change_password(self.encoder.encode(password.as_str()));
        self.repo.update_password(&user, &previous_hash).await?;

        info!(%user_id, "Password changed");
        Ok(())
    }
}
