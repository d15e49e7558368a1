//! User repository port and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{User, CURRENT_PASSWORD_MISMATCH};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Exact, case-sensitive lookup
    async fn find_by_login_id(&self, login_id: &str) -> AppResult<Option<User>>;

    async fn exists_by_login_id(&self, login_id: &str) -> AppResult<bool>;

    /// Insert a user without an id (assigning one) or overwrite an existing one.
    ///
    /// Inserting a login ID that is already taken fails with `Conflict`,
    /// even when a concurrent sign-up slipped past the service pre-check.
    async fn save(&self, user: User) -> AppResult<User>;

    /// Store `changed`'s new password hash only if the stored hash is still
    /// `previous_hash`.
    ///
    /// The check and the write are one atomic step, so of two concurrent
    /// changes from the same old password exactly one wins; the other fails
    /// with `Unauthorized`.
    async fn update_password(&self, changed: &User, previous_hash: &str) -> AppResult<()>;
}

/// Postgres-backed user store
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            login_id: Set(user.login_id().to_string()),
            password_hash: Set(user.password_hash().to_string()),
            name: Set(user.name().to_string()),
            email: Set(user.email().to_string()),
            birthday: Set(user.birthday()),
            created_at: Set(user.created_at()),
            updated_at: Set(user.updated_at()),
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Login ID"),
            _ => AppError::from(e),
        })?;

        Ok(User::from(result))
    }

    /// Only the credential and its timestamp are mutable after sign-up.
    async fn update(&self, id: Uuid, user: User) -> AppResult<User> {
        let model = ActiveModel {
            id: Set(id),
            password_hash: Set(user.password_hash().to_string()),
            updated_at: Set(user.updated_at()),
            ..Default::default()
        };

        let result = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound("User".to_string()),
            other => AppError::from(other),
        })?;

        Ok(User::from(result))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_login_id(&self, login_id: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::LoginId.eq(login_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn exists_by_login_id(&self, login_id: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::LoginId.eq(login_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn save(&self, user: User) -> AppResult<User> {
        match user.id() {
            None => self.insert(user).await,
            Some(id) => self.update(id, user).await,
        }
    }

    async fn update_password(&self, changed: &User, previous_hash: &str) -> AppResult<()> {
        let id = changed.id().ok_or_not_found("User")?;

        let result = UserEntity::update_many()
            .col_expr(
                user::Column::PasswordHash,
                Expr::value(changed.password_hash().to_string()),
            )
            .col_expr(user::Column::UpdatedAt, Expr::value(changed.updated_at()))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::PasswordHash.eq(previous_hash))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::unauthorized(CURRENT_PASSWORD_MISMATCH));
        }
        Ok(())
    }
}
