use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{SecretManager, Settings};
use crate::providers::{AuthorizationProvider, CryptoProvider};
use crate::stores::{
    AssignmentStore, CommentStore, CredentialStore, SessionStore, TicketStore, UserStore,
};

/// Centralized application data following the main-owned stores pattern
///
/// Everything is created once at startup and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::new(db, settings, secret_manager)
///   ↓ creates once
///   ├─ crypto_provider, authorization_provider
///   └─ credential/user/session/ticket/assignment/comment stores
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   └─ XCoordinator::new(app_data) → picks what it needs
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Arc<Settings>,
    pub secret_manager: Arc<SecretManager>,
    pub crypto_provider: Arc<CryptoProvider>,
    pub authorization_provider: Arc<AuthorizationProvider>,
    pub credential_store: Arc<CredentialStore>,
    pub user_store: Arc<UserStore>,
    pub session_store: Arc<SessionStore>,
    pub ticket_store: Arc<TicketStore>,
    pub assignment_store: Arc<AssignmentStore>,
    pub comment_store: Arc<CommentStore>,
}

impl AppData {
    /// Wire providers and stores over an already migrated connection
    pub fn new(db: DatabaseConnection, settings: Settings, secret_manager: Arc<SecretManager>) -> Self {
        tracing::debug!("Initializing AppData...");

        let crypto_provider = Arc::new(CryptoProvider::new(secret_manager.clone()));
        let credential_store = Arc::new(CredentialStore::new(crypto_provider.clone()));

        tracing::debug!("AppData initialization complete");

        Self {
            db,
            settings: Arc::new(settings),
            secret_manager,
            crypto_provider,
            authorization_provider: Arc::new(AuthorizationProvider::new()),
            credential_store,
            user_store: Arc::new(UserStore::new()),
            session_store: Arc::new(SessionStore::new()),
            ticket_store: Arc::new(TicketStore::new()),
            assignment_store: Arc::new(AssignmentStore::new()),
            comment_store: Arc::new(CommentStore::new()),
        }
    }
}
