//! In-memory user store for local runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserRepository;
use common::{AppError, AppResult, OptionExt};
use domain::{User, CURRENT_PASSWORD_MISMATCH};

#[derive(Debug, Default)]
struct Users {
    by_id: HashMap<Uuid, User>,
    /// login_id -> id
    login_index: HashMap<String, Uuid>,
}

/// Thread-safe store keeping users in process memory.
///
/// Both maps sit behind one lock, so the uniqueness check and the insert in
/// `save`, and the hash comparison and write in `update_password`, each
/// happen atomically.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Users>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.by_id.get(&id).cloned())
    }

    async fn find_by_login_id(&self, login_id: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .login_index
            .get(login_id)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn exists_by_login_id(&self, login_id: &str) -> AppResult<bool> {
        let users = self.users.read().await;
        Ok(users.login_index.contains_key(login_id))
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        let id = match user.id() {
            Some(id) => {
                if !users.by_id.contains_key(&id) {
                    return Err(AppError::NotFound("User".to_string()));
                }
                id
            }
            None => {
                if users.login_index.contains_key(user.login_id()) {
                    return Err(AppError::conflict("Login ID"));
                }
                let id = Uuid::new_v4();
                users.login_index.insert(user.login_id().to_string(), id);
                id
            }
        };

        let user = user.with_id(id);
        users.by_id.insert(id, user.clone());
        Ok(user)
    }

    async fn update_password(&self, changed: &User, previous_hash: &str) -> AppResult<()> {
        let id = changed.id().ok_or_not_found("User")?;

        let mut users = self.users.write().await;
        let stored = users.by_id.get_mut(&id).ok_or_not_found("User")?;

        if stored.password_hash() != previous_hash {
            return Err(AppError::unauthorized(CURRENT_PASSWORD_MISMATCH));
        }
        *stored = changed.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_user(login_id: &str) -> User {
        User::create(
            login_id,
            "salt:hash".to_string(),
            "홍길동",
            "test@example.com",
            NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_id() {
        let store = InMemoryUserStore::new();

        let saved = store.save(new_user("testuser123")).await.unwrap();

        let id = saved.id().expect("id assigned");
        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.login_id(), "testuser123");
        assert!(store.exists_by_login_id("testuser123").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_duplicate_login_id_conflicts() {
        let store = InMemoryUserStore::new();
        store.save(new_user("testuser123")).await.unwrap();

        let result = store.save(new_user("testuser123")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_find_by_login_id_is_case_sensitive() {
        let store = InMemoryUserStore::new();
        store.save(new_user("testuser123")).await.unwrap();

        assert!(store.find_by_login_id("TestUser123").await.unwrap().is_none());
        assert!(!store.exists_by_login_id("TestUser123").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_existing_user_overwrites() {
        let store = InMemoryUserStore::new();
        let mut saved = store.save(new_user("testuser123")).await.unwrap();

        saved.change_password("new:hash".to_string());
        store.save(saved.clone()).await.unwrap();

        let found = store
            .find_by_login_id("testuser123")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.password_hash(), "new:hash");
        assert_eq!(found.id(), saved.id());
    }

    #[tokio::test]
    async fn test_save_unknown_id_not_found() {
        let store = InMemoryUserStore::new();
        let ghost = new_user("ghost").with_id(Uuid::new_v4());

        let result = store.save(ghost).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_password_replaces_matching_hash() {
        let store = InMemoryUserStore::new();
        let mut user = store.save(new_user("testuser123")).await.unwrap();

        user.change_password("new:hash".to_string());
        store.update_password(&user, "salt:hash").await.unwrap();

        let found = store.find_by_id(user.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.password_hash(), "new:hash");
    }

    #[tokio::test]
    async fn test_update_password_rejects_stale_hash() {
        let store = InMemoryUserStore::new();
        let saved = store.save(new_user("testuser123")).await.unwrap();

        let mut first = saved.clone();
        first.change_password("first:hash".to_string());
        store.update_password(&first, "salt:hash").await.unwrap();

        // Second writer read the user before the first change landed
        let mut second = saved;
        second.change_password("second:hash".to_string());
        let result = store.update_password(&second, "salt:hash").await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        let found = store.find_by_id(first.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.password_hash(), "first:hash");
    }

    #[tokio::test]
    async fn test_update_password_unknown_user_not_found() {
        let store = InMemoryUserStore::new();
        let ghost = new_user("ghost").with_id(Uuid::new_v4());

        let result = store.update_password(&ghost, "salt:hash").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
