#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use crate::AuthError;

use super::user::{StoredUser, UserRepository};

/// In-memory user store for tests and demos.
#[derive(Clone, Default)]
pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<StoredUser>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(vec![])),
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_user_by_login(&self, login: &str) -> Result<Option<StoredUser>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.login == login).cloned())
    }

    async fn update_last_login_time(
        &self,
        user_id: i64,
        at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
            user.last_login = Some(at);
            Ok(())
        } else {
            Err(AuthError::StoreError(format!(
                "no user with id {user_id}"
            )))
        }
    }
}
