use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// A user account as persisted by the book market user store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: i64,
    pub login: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// Role names without the internal `ROLE_` prefix.
    pub roles: Vec<String>,
    pub blocked: bool,
    pub last_login: Option<DateTime<Utc>>,
}

#[cfg(any(test, feature = "mocks"))]
impl StoredUser {
    pub fn mock_from_credentials(login: &str, hashed_password: &str) -> Self {
        StoredUser {
            id: 1,
            login: login.to_owned(),
            hashed_password: hashed_password.to_owned(),
            roles: vec!["USER".to_owned()],
            blocked: false,
            last_login: None,
        }
    }

    pub fn mock_with_roles(login: &str, hashed_password: &str, roles: &[&str]) -> Self {
        StoredUser {
            roles: roles.iter().map(|&role| role.to_owned()).collect(),
            ..Self::mock_from_credentials(login, hashed_password)
        }
    }
}

/// Lookup and last-login bookkeeping against the user store.
#[async_trait]
pub trait UserRepository {
    async fn find_user_by_login(&self, login: &str) -> Result<Option<StoredUser>, AuthError>;
    async fn update_last_login_time(
        &self,
        user_id: i64,
        at: DateTime<Utc>,
    ) -> Result<(), AuthError>;
}
