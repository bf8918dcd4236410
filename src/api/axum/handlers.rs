//! HTTP handlers for the authentication endpoints.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::error::AppError;
use super::middleware::extract_bearer_token;
use super::routes::AppState;
use crate::actions::{LoginAction, RefreshTokenAction};
use crate::api::{LoginRequest, LoginResponse, RefreshResponse};
use crate::config::RefreshCookieConfig;
use crate::repository::UserRepository;
use crate::{AuthError, SecretString};

/// Authenticate with credentials and receive an access token plus a
/// refresh-token cookie.
///
/// POST /login
pub async fn login<U>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let action = LoginAction::new(state.user_repo, state.jwt_service);
    let password = SecretString::new(&body.password);

    let outcome = action.execute(&body.username, &password).await?;

    let cookie = refresh_cookie(
        &state.security.refresh_cookie,
        outcome.refresh_token.expose_secret().to_owned(),
    );

    Ok((jar.add(cookie), Json(LoginResponse::from(outcome))))
}

/// Exchange a refresh-token cookie plus the old access token for a fresh
/// access token.
///
/// POST /refresh-token
pub async fn refresh_token<U>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AppError>
where
    U: Clone + Send + Sync + 'static,
{
    let refresh = jar
        .get(&state.security.refresh_cookie.name)
        .map(|cookie| cookie.value().to_owned())
        .ok_or_else(|| {
            AppError(AuthError::BearerToken(
                "refresh token cookie is missing".to_owned(),
            ))
        })?;

    let access = extract_bearer_token(&headers, &state.security.bearer_prefix).ok_or_else(|| {
        AppError(AuthError::BearerToken(
            "bearer access token is missing".to_owned(),
        ))
    })?;

    let action = RefreshTokenAction::new(state.jwt_service);
    let access_token = action.execute(&refresh, &access).await?;

    Ok(Json(RefreshResponse { access_token }))
}

fn refresh_cookie(config: &RefreshCookieConfig, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(config.name.clone(), value);
    cookie.set_path(config.path.clone());
    cookie.set_secure(config.secure);
    cookie.set_http_only(config.http_only);
    cookie.set_max_age(time::Duration::seconds(config.max_age.num_seconds()));
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_attributes() {
        let config = RefreshCookieConfig::default();
        let cookie = refresh_cookie(&config, "token-value".to_owned());

        assert_eq!(cookie.name(), "refreshToken");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.path(), Some("/api/auth/refresh-token"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(24 * 60 * 60))
        );
    }
}
