use chrono::Utc;

use crate::crypto::{Argon2Hasher, PasswordHasher, SecretString};
use crate::events::{dispatch, AuthEvent};
use crate::jwt::JwtService;
use crate::principal::AuthenticatedUser;
use crate::repository::UserRepository;
use crate::AuthError;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated principal. Credentials are already erased.
    pub user: AuthenticatedUser,
    /// Short-lived access token to be returned in the response body.
    pub access_token: String,
    /// Long-lived refresh token to be set as an HTTP-only cookie.
    pub refresh_token: SecretString,
}

/// Credential login.
///
/// Looks the user up by login, verifies the password, rejects blocked
/// accounts, mints an access/refresh token pair and records the last login
/// time. An unknown login and a wrong password produce the same
/// `InvalidCredentials` error so responses cannot be used to probe for
/// account existence.
pub struct LoginAction<U: UserRepository, H: PasswordHasher = Argon2Hasher> {
    user_repository: U,
    jwt_service: JwtService,
    hasher: H,
}

impl<U: UserRepository> LoginAction<U> {
    /// Creates a login action with the default Argon2 password hasher.
    pub fn new(user_repository: U, jwt_service: JwtService) -> Self {
        Self::with_hasher(user_repository, jwt_service, Argon2Hasher::default())
    }
}

impl<U: UserRepository, H: PasswordHasher> LoginAction<U, H> {
    /// Creates a login action with a custom password hasher.
    pub fn with_hasher(user_repository: U, jwt_service: JwtService, hasher: H) -> Self {
        Self {
            user_repository,
            jwt_service,
            hasher,
        }
    }

    /// Executes the login, returning the principal and token pair on success.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "login", skip_all, err))]
    pub async fn execute(
        &self,
        login: &str,
        password: &SecretString,
    ) -> Result<LoginOutcome, AuthError> {
        let user = match self.user_repository.find_user_by_login(login).await? {
            Some(user) => user,
            None => {
                self.login_failed(login, "unknown login").await;
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self
            .hasher
            .verify(password.expose_secret(), &user.hashed_password)?
        {
            self.login_failed(login, "password mismatch").await;
            return Err(AuthError::InvalidCredentials);
        }

        if user.blocked {
            self.login_failed(login, "account blocked").await;
            return Err(AuthError::AccountBlocked);
        }

        let mut principal = AuthenticatedUser::new(
            user.id,
            user.login.clone(),
            user.hashed_password.as_str(),
            user.roles.clone(),
        );

        let access_token = self.jwt_service.generate_access_token(&principal)?;
        let refresh_token =
            SecretString::new(self.jwt_service.generate_refresh_token(&principal)?);

        self.user_repository
            .update_last_login_time(user.id, Utc::now())
            .await?;

        // the hash served its purpose; keep it out of everything downstream
        principal.erase_credentials();

        dispatch(AuthEvent::LoginSuccess {
            user_id: user.id,
            login: user.login,
            at: Utc::now(),
        })
        .await;

        Ok(LoginOutcome {
            user: principal,
            access_token,
            refresh_token,
        })
    }

    async fn login_failed(&self, login: &str, reason: &str) {
        dispatch(AuthEvent::LoginFailed {
            login: login.to_owned(),
            reason: reason.to_owned(),
            at: Utc::now(),
        })
        .await;
    }
}
