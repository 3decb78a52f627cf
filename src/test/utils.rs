// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Database, DatabaseConnection, Set};

use crate::app_data::AppData;
use crate::config::{AppEnvironment, MockEnvironment, SecretManager, Settings};
use crate::providers::CryptoProvider;
use crate::types::db::user;
use crate::types::internal::{Actor, RequestContext, Role};

pub const TEST_ELEVATION_SECRET: &str = "let-me-in";

/// In-memory database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    let env = MockEnvironment::empty().with_vars(&[
        ("SECRET_KEY", "test-secret-key-that-is-at-least-32-chars"),
        ("PASSWORD_PEPPER", "test-pepper-for-unit-tests"),
        ("ELEVATE_ADMIN_SECRET", TEST_ELEVATION_SECRET),
    ]);
    Arc::new(SecretManager::init(&env).expect("Failed to init test secrets"))
}

pub fn test_crypto_provider() -> Arc<CryptoProvider> {
    Arc::new(CryptoProvider::new(test_secret_manager()))
}

pub fn test_settings(app_env: AppEnvironment) -> Settings {
    let env = MockEnvironment::empty()
        .with_var("DATABASE_URL", "sqlite::memory:")
        .with_var("APP_ENV", &app_env.to_string());
    Settings::from_env_provider(&env).expect("Failed to load test settings")
}

/// Fully wired application state over a fresh in-memory database
pub async fn setup_test_app(app_env: AppEnvironment) -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::new(db, test_settings(app_env), test_secret_manager()))
}

/// Insert a user row directly, skipping password hashing
pub async fn insert_user(db: &DatabaseConnection, username: &str, role: Role) -> user::Model {
    user::ActiveModel {
        id: NotSet,
        username: Set(username.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        role: Set(role.as_str().to_string()),
        created_at: Set(0),
    }
    .insert(db)
    .await
    .expect("Failed to insert test user")
}

/// Request context acting as the given user
pub fn ctx_for(user: &user::Model) -> RequestContext {
    let actor = Actor::try_from(user.clone()).expect("Test user has a valid role");
    RequestContext::for_actor(actor)
}
