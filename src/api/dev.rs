use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::app_data::AppData;
use crate::coordinators::UserCoordinator;
use crate::errors::ApiError;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::users::ElevateUserRequest;
use crate::types::internal::RequestId;

/// Development-only break-glass endpoints
pub struct DevApi {
    user_coordinator: Arc<UserCoordinator>,
}

impl DevApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_coordinator: Arc::new(UserCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum DevTags {
    /// Development helpers, disabled in production
    Dev,
}

#[OpenApi]
impl DevApi {
    /// Promote a user to admin with the shared elevation secret
    ///
    /// Refused with 403 in production and 401 on a wrong or unset secret.
    #[oai(path = "/dev/elevate-user", method = "post", tag = "DevTags::Dev")]
    async fn elevate_user(&self, body: Json<ElevateUserRequest>) -> Result<Json<MessageResponse>, ApiError> {
        let user = self
            .user_coordinator
            .elevate(&RequestId::new(), body.user_id, &body.dev_password)
            .await?;

        Ok(Json(MessageResponse::new(format!(
            "User {} elevated to admin.",
            user.username
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppEnvironment;
    use crate::test::utils::{insert_user, setup_test_app, TEST_ELEVATION_SECRET};
    use crate::types::internal::Role;

    fn request(user_id: i32, dev_password: &str) -> Json<ElevateUserRequest> {
        Json(ElevateUserRequest {
            user_id,
            dev_password: dev_password.to_string(),
        })
    }

    #[tokio::test]
    async fn test_wrong_secret_in_development_is_401() {
        let app_data = setup_test_app(AppEnvironment::Development).await;
        let alice = insert_user(&app_data.db, "alice", Role::Standard).await;

        let err = DevApi::new(app_data).elevate_user(request(alice.id, "nope")).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_correct_secret_in_production_is_403() {
        let app_data = setup_test_app(AppEnvironment::Production).await;
        let alice = insert_user(&app_data.db, "alice", Role::Standard).await;

        let err = DevApi::new(app_data)
            .elevate_user(request(alice.id, TEST_ELEVATION_SECRET))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.code(), "production_mode");
    }

    #[tokio::test]
    async fn test_correct_secret_in_development_elevates() {
        let app_data = setup_test_app(AppEnvironment::Development).await;
        let alice = insert_user(&app_data.db, "alice", Role::Standard).await;

        let response = DevApi::new(app_data)
            .elevate_user(request(alice.id, TEST_ELEVATION_SECRET))
            .await
            .unwrap();
        assert_eq!(response.0.message, "User alice elevated to admin.");
    }
}
