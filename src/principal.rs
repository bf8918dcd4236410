//! The in-memory representation of an authenticated request identity.

use std::collections::BTreeSet;

use crate::crypto::SecretString;

/// Prefix applied to every authority held by an [`AuthenticatedUser`].
pub const ROLE_PREFIX: &str = "ROLE_";

/// Account status flags attached to a principal. All default to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountStatus {
    pub account_non_expired: bool,
    pub account_non_locked: bool,
    pub credentials_non_expired: bool,
    pub enabled: bool,
}

impl Default for AccountStatus {
    fn default() -> Self {
        Self {
            account_non_expired: true,
            account_non_locked: true,
            credentials_non_expired: true,
            enabled: true,
        }
    }
}

/// The identity making the current request.
///
/// Constructed fresh on every successful login (from stored user data) and on
/// every successful access-token decode (from token claims). Never persisted,
/// never shared across requests; the only mutation allowed after construction
/// is [`erase_credentials`](Self::erase_credentials).
///
/// Authorities are supplied WITHOUT the `ROLE_` prefix and stored with it,
/// sorted. The constructor rejects pre-prefixed input to catch
/// double-prefixing bugs that would silently break role checks.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    id: i64,
    username: String,
    password: Option<SecretString>,
    authorities: BTreeSet<String>,
    status: AccountStatus,
}

impl AuthenticatedUser {
    /// Creates a principal with default account status.
    ///
    /// # Panics
    ///
    /// Panics if `username` or `password` is empty, if `authorities` is
    /// empty, or if any authority already starts with `ROLE_`. These are
    /// wiring defects, not runtime-recoverable conditions.
    #[must_use]
    pub fn new(
        id: i64,
        username: impl Into<String>,
        password: impl Into<SecretString>,
        authorities: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::with_status(id, username, password, authorities, AccountStatus::default())
    }

    /// Creates a principal with explicit account status flags.
    ///
    /// # Panics
    ///
    /// Same invariants as [`new`](Self::new).
    #[must_use]
    pub fn with_status(
        id: i64,
        username: impl Into<String>,
        password: impl Into<SecretString>,
        authorities: impl IntoIterator<Item = impl Into<String>>,
        status: AccountStatus,
    ) -> Self {
        let username = username.into();
        let password = password.into();
        assert!(!username.is_empty(), "username must not be empty");
        assert!(!password.is_empty(), "password must not be empty");

        let authorities: BTreeSet<String> = authorities
            .into_iter()
            .map(|authority| {
                let authority = authority.into();
                assert!(
                    !authority.starts_with(ROLE_PREFIX),
                    "authority must not start with the {ROLE_PREFIX} prefix"
                );
                format!("{ROLE_PREFIX}{authority}")
            })
            .collect();
        assert!(!authorities.is_empty(), "must contain at least 1 authority");

        Self {
            id,
            username,
            password: Some(password),
            authorities,
            status,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The stored password hash, or `None` once credentials were erased.
    pub fn password(&self) -> Option<&SecretString> {
        self.password.as_ref()
    }

    /// Authorities in canonical `ROLE_`-prefixed form, sorted.
    pub fn authorities(&self) -> &BTreeSet<String> {
        &self.authorities
    }

    /// Role names with the internal prefix stripped, in sorted order.
    /// This is the form carried in access-token claims and API responses.
    pub fn role_names(&self) -> Vec<String> {
        self.authorities
            .iter()
            .map(|authority| authority[ROLE_PREFIX.len()..].to_owned())
            .collect()
    }

    /// Checks for an authority by its unprefixed role name.
    pub fn has_role(&self, role: &str) -> bool {
        self.authorities.contains(&format!("{ROLE_PREFIX}{role}"))
    }

    /// Drops the password hash so it cannot leak into logs or responses.
    /// Called once authentication is complete.
    pub fn erase_credentials(&mut self) {
        self.password = None;
    }

    pub fn is_account_non_expired(&self) -> bool {
        self.status.account_non_expired
    }

    pub fn is_account_non_locked(&self) -> bool {
        self.status.account_non_locked
    }

    pub fn is_credentials_non_expired(&self) -> bool {
        self.status.credentials_non_expired
    }

    pub fn is_enabled(&self) -> bool {
        self.status.enabled
    }
}
