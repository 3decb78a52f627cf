use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::internal::SessionError;
use crate::errors::InternalError;
use crate::providers::{validation, CryptoProvider};
use crate::stores::{CredentialStore, SessionStore, UserStore};
use crate::types::db::user;
use crate::types::internal::{Actor, RequestContext, RequestId, Role};

use super::now;

/// A freshly issued session
#[derive(Debug)]
pub struct LoginOutcome {
    pub actor: Actor,
    /// Cookie value; only its digest is stored
    pub token: String,
    pub max_age_seconds: i64,
}

/// Registration, login, logout and session resolution
pub struct AuthCoordinator {
    db: DatabaseConnection,
    crypto_provider: Arc<CryptoProvider>,
    credential_store: Arc<CredentialStore>,
    session_store: Arc<SessionStore>,
    user_store: Arc<UserStore>,
    session_ttl_seconds: i64,
}

impl AuthCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            crypto_provider: app_data.crypto_provider.clone(),
            credential_store: app_data.credential_store.clone(),
            session_store: app_data.session_store.clone(),
            user_store: app_data.user_store.clone(),
            session_ttl_seconds: app_data.settings.session_ttl_hours() * 3600,
        }
    }

    /// Create a standard account
    pub async fn register(
        &self,
        request_id: &RequestId,
        username: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        validation::validate_username(username)?;
        validation::validate_password(password)?;

        let user = self
            .credential_store
            .add_user(&self.db, username, password, Role::Standard, now())
            .await?;

        tracing::info!(request_id = %request_id, user_id = user.id, "User registered");

        Ok(user)
    }

    /// Verify credentials and open a server-side session
    pub async fn login(
        &self,
        request_id: &RequestId,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, InternalError> {
        validation::require_non_empty("username", username)?;
        validation::validate_password(password)?;

        let user = self
            .credential_store
            .verify_credentials(&self.db, username, password)
            .await?;
        let actor = Actor::try_from(user)?;

        let issued_at = now();
        let purged = self
            .session_store
            .purge_expired_for_user(&self.db, actor.user_id, issued_at)
            .await?;
        if purged > 0 {
            tracing::debug!(user_id = actor.user_id, purged, "Removed expired sessions");
        }

        let token = self.crypto_provider.generate_session_token();
        let token_hash = self.crypto_provider.session_token_hash(&token)?;
        self.session_store
            .create(
                &self.db,
                &token_hash,
                actor.user_id,
                issued_at,
                issued_at + self.session_ttl_seconds,
            )
            .await?;

        tracing::info!(request_id = %request_id, user_id = actor.user_id, "User logged in");

        Ok(LoginOutcome {
            actor,
            token,
            max_age_seconds: self.session_ttl_seconds,
        })
    }

    /// Revoke the session carried by `token`
    pub async fn logout(&self, ctx: &RequestContext, token: &str) -> Result<(), InternalError> {
        let token_hash = self.crypto_provider.session_token_hash(token)?;
        self.session_store.revoke(&self.db, &token_hash).await?;

        tracing::info!(request_id = %ctx.request_id, user_id = ctx.actor_id(), "User logged out");

        Ok(())
    }

    /// Resolve a cookie token into the acting user
    ///
    /// The role comes from the users table on every call so a role change
    /// applies to sessions that are already open. Expired rows are removed.
    pub async fn resolve_session(&self, token: &str) -> Result<Actor, InternalError> {
        if token.is_empty() {
            return Err(SessionError::Missing.into());
        }

        let token_hash = self.crypto_provider.session_token_hash(token)?;
        let session = self
            .session_store
            .find(&self.db, &token_hash)
            .await?
            .ok_or(SessionError::NotFound)?;

        if session.expires_at <= now() {
            self.session_store.revoke(&self.db, &token_hash).await?;
            return Err(SessionError::Expired.into());
        }

        let user = self
            .user_store
            .find_by_id(&self.db, session.user_id)
            .await?
            .ok_or(SessionError::UserGone(session.user_id))?;

        Actor::try_from(user)
    }

    /// Create an admin account with a generated password
    ///
    /// Returns the user and the plaintext password, which is not stored anywhere.
    pub async fn bootstrap_admin(&self, username: &str) -> Result<(user::Model, String), InternalError> {
        validation::validate_username(username)?;

        let password = self.crypto_provider.generate_secure_password();
        let user = self
            .credential_store
            .add_user(&self.db, username, &password, Role::Admin, now())
            .await?;

        tracing::info!(user_id = user.id, "Admin account created from CLI");

        Ok((user, password))
    }
}
