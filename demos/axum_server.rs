#![allow(
    clippy::print_stdout,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::str_to_string
)]

//! Book market authentication server example.
//!
//! Serves the login and refresh endpoints over a mock user store, with the
//! bearer-token middleware guarding a sample protected route.
//!
//! Run with: `cargo run --example axum_server`
//!
//! Test endpoints:
//!   curl -X POST http://localhost:8080/api/auth/login \
//!     -H "Content-Type: application/json" \
//!     -d '{"username": "reader", "password": "securepassword"}'
//!
//!   curl http://localhost:8080/api/me \
//!     -H "Authorization: Bearer <access_token>"
//!
//!   curl -X POST http://localhost:8080/api/auth/refresh-token \
//!     -H "Authorization: Bearer <access_token>" \
//!     --cookie "refreshToken=<refresh_token>"

use axum::routing::get;
use axum::{middleware, Json, Router};
use tokio::net::TcpListener;

use bookmarket_auth::api::axum::{auth_routes, authenticate, AppState, CurrentUser};
use bookmarket_auth::config::SecurityConfig;
use bookmarket_auth::crypto::{Argon2Hasher, PasswordHasher};
use bookmarket_auth::events::listeners::LoggingListener;
use bookmarket_auth::jwt::{JwtConfig, JwtService};
use bookmarket_auth::{register_event_listeners, MockUserRepository, StoredUser};

#[tokio::main]
async fn main() {
    // In production, load the secret from the environment or a secret store.
    // A secret generated per process invalidates all tokens on restart.
    let jwt_secret = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "your-super-secret-key-at-least-32-bytes!".to_string());

    let jwt_config = JwtConfig::new(jwt_secret)
        .expect("signing secret must be at least 32 bytes")
        .with_access_expiry(chrono::Duration::minutes(15))
        .with_refresh_expiry(chrono::Duration::hours(24));
    let jwt_service = JwtService::new(jwt_config);

    register_event_listeners(|registry| {
        registry.listen(LoggingListener::new());
    });

    // Mock store with one seeded account. In production, implement
    // UserRepository against your database.
    let user_repo = MockUserRepository::new();
    let hashed = Argon2Hasher::default().hash("securepassword").unwrap();
    user_repo
        .users
        .lock()
        .unwrap()
        .push(StoredUser::mock_with_roles(
            "reader",
            &hashed,
            &["USER", "ADMIN"],
        ));

    let state = AppState {
        user_repo,
        jwt_service,
        security: SecurityConfig::default(),
    };

    let app = Router::new()
        .nest("/api/auth", auth_routes::<MockUserRepository>())
        .route("/api/me", get(me))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::<MockUserRepository>,
        ))
        .with_state(state);

    println!("Starting book market auth server on http://localhost:8080");
    println!("Endpoints:");
    println!("  POST /api/auth/login         - Login (returns access token + refresh cookie)");
    println!("  POST /api/auth/refresh-token - Mint a new access token");
    println!("  GET  /api/me                 - Current principal (requires access token)");

    let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn me(user: CurrentUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "userId": user.user().id(),
        "authorities": user.user().authorities(),
    }))
}
