use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::config::{SecretManager, Settings};
use crate::errors::InternalError;
use crate::providers::AuthorizationProvider;
use crate::stores::UserStore;
use crate::types::db::user;
use crate::types::internal::{Action, RequestContext, RequestId, Role};

use super::enforce;

/// User directory and break-glass elevation
pub struct UserCoordinator {
    db: DatabaseConnection,
    settings: Arc<Settings>,
    secret_manager: Arc<SecretManager>,
    authorization_provider: Arc<AuthorizationProvider>,
    user_store: Arc<UserStore>,
}

impl UserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            settings: app_data.settings.clone(),
            secret_manager: app_data.secret_manager.clone(),
            authorization_provider: app_data.authorization_provider.clone(),
            user_store: app_data.user_store.clone(),
        }
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<user::Model>, InternalError> {
        enforce(&self.authorization_provider, ctx, Action::ListUsers)?;
        self.user_store.list(&self.db).await
    }

    pub async fn get(&self, ctx: &RequestContext, user_id: i32) -> Result<user::Model, InternalError> {
        enforce(&self.authorization_provider, ctx, Action::LookupUser)?;
        self.user_store.get(&self.db, user_id).await
    }

    /// Promote a user to admin with the shared elevation secret
    ///
    /// Gated on the deployment mode and the secret only; no session is involved.
    pub async fn elevate(
        &self,
        request_id: &RequestId,
        user_id: i32,
        dev_password: &str,
    ) -> Result<user::Model, InternalError> {
        let decision = self.authorization_provider.authorize_elevation(
            self.settings.app_env(),
            self.secret_manager.elevate_admin_secret(),
            dev_password,
        );
        if let Err(reason) = decision.into_result() {
            tracing::warn!(
                request_id = %request_id,
                target_user_id = user_id,
                reason = reason.code(),
                "Elevation refused"
            );
            return Err(reason.into());
        }

        let user = self.user_store.set_role(&self.db, user_id, Role::Admin).await?;

        tracing::warn!(request_id = %request_id, user_id, "User elevated to admin");

        Ok(user)
    }
}
