// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use ticketdesk_backend::config::{AppEnvironment, MockEnvironment, SecretManager, Settings};
use ticketdesk_backend::coordinators::AuthCoordinator;
use ticketdesk_backend::types::internal::{RequestContext, RequestId};
use ticketdesk_backend::AppData;

pub const ELEVATION_SECRET: &str = "integration-elevation-secret";
pub const PASSWORD: &str = "correct horse battery staple";

/// Creates an in-memory database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Environment with every required variable set
pub fn test_environment(app_env: AppEnvironment) -> MockEnvironment {
    MockEnvironment::empty().with_vars(&[
        ("DATABASE_URL", "sqlite::memory:"),
        ("APP_ENV", &app_env.to_string()),
        ("SECRET_KEY", "integration-secret-key-of-at-least-32-chars"),
        ("PASSWORD_PEPPER", "integration-pepper"),
        ("ELEVATE_ADMIN_SECRET", ELEVATION_SECRET),
    ])
}

/// Application state wired the same way `main` does it
pub async fn setup_app(app_env: AppEnvironment) -> Arc<AppData> {
    let env = test_environment(app_env);
    let settings = Settings::from_env_provider(&env).expect("Failed to load settings");
    let secret_manager = Arc::new(SecretManager::init(&env).expect("Failed to init secrets"));
    let db = setup_test_db().await;

    Arc::new(AppData::new(db, settings, secret_manager))
}

/// Registers `username` and logs in, returning the context and session token
pub async fn register_and_login(auth: &AuthCoordinator, username: &str) -> (RequestContext, String) {
    let request_id = RequestId::new();
    auth.register(&request_id, username, PASSWORD)
        .await
        .expect("Failed to register user");

    let outcome = auth
        .login(&request_id, username, PASSWORD)
        .await
        .expect("Failed to log in");

    (RequestContext::for_actor(outcome.actor), outcome.token)
}

/// Creates an admin through the bootstrap path and logs in as them
pub async fn bootstrap_and_login(auth: &AuthCoordinator, username: &str) -> (RequestContext, String) {
    let (_, password) = auth
        .bootstrap_admin(username)
        .await
        .expect("Failed to bootstrap admin");

    let outcome = auth
        .login(&RequestId::new(), username, &password)
        .await
        .expect("Failed to log in as admin");

    (RequestContext::for_actor(outcome.actor), outcome.token)
}
