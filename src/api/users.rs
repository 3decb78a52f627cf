use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::helpers::{authenticate, SessionAuth};
use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, UserCoordinator};
use crate::errors::ApiError;
use crate::types::dto::users::UserSummary;

/// User directory endpoints
pub struct UsersApi {
    auth_coordinator: Arc<AuthCoordinator>,
    user_coordinator: Arc<UserCoordinator>,
}

impl UsersApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: Arc::new(AuthCoordinator::new(app_data.clone())),
            user_coordinator: Arc::new(UserCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum UserTags {
    /// Users
    Users,
}

#[OpenApi]
impl UsersApi {
    /// All users (admin only)
    #[oai(path = "/users", method = "get", tag = "UserTags::Users")]
    async fn list_users(&self, auth: SessionAuth) -> Result<Json<Vec<UserSummary>>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        let users = self.user_coordinator.list(&ctx).await?;
        Ok(Json(users.into_iter().map(Into::into).collect()))
    }

    /// Username for a user id
    #[oai(path = "/users/:user_id", method = "get", tag = "UserTags::Users")]
    async fn get_user(&self, auth: SessionAuth, user_id: Path<i32>) -> Result<Json<UserSummary>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        let user = self.user_coordinator.get(&ctx, user_id.0).await?;
        Ok(Json(user.into()))
    }
}
