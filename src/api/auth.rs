use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::helpers::{authenticate, expired_session_cookie, session_cookie, SessionAuth};
use crate::app_data::AppData;
use crate::coordinators::AuthCoordinator;
use crate::errors::ApiError;
use crate::types::dto::auth::{
    CredentialsRequest, LoginApiResponse, LoginResponse, LogoutApiResponse, RegisterApiResponse,
    RegisterResponse, SessionResponse,
};
use crate::types::dto::common::MessageResponse;
use crate::types::internal::RequestId;

/// Authentication API endpoints
pub struct AuthApi {
    auth_coordinator: Arc<AuthCoordinator>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: Arc::new(AuthCoordinator::new(app_data)),
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi]
impl AuthApi {
    /// Create a standard account
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(&self, body: Json<CredentialsRequest>) -> Result<RegisterApiResponse, ApiError> {
        let user = self
            .auth_coordinator
            .register(&RequestId::new(), &body.username, &body.password)
            .await?;

        Ok(RegisterApiResponse::Created(Json(RegisterResponse {
            message: "User registered successfully!".to_string(),
            user_id: user.id,
        })))
    }

    /// Log in and receive a session cookie
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<CredentialsRequest>) -> Result<LoginApiResponse, ApiError> {
        let outcome = self
            .auth_coordinator
            .login(&RequestId::new(), &body.username, &body.password)
            .await?;

        let cookie = session_cookie(&outcome.token, outcome.max_age_seconds);
        Ok(LoginApiResponse::Ok(
            Json(LoginResponse {
                message: "Logged in successfully!".to_string(),
                user_id: outcome.actor.user_id,
                username: outcome.actor.username,
                role: outcome.actor.role.to_string(),
            }),
            cookie,
        ))
    }

    /// End the current session
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, auth: SessionAuth) -> Result<LogoutApiResponse, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        self.auth_coordinator.logout(&ctx, auth.token()).await?;

        Ok(LogoutApiResponse::Ok(
            Json(MessageResponse::new("Logged out successfully!")),
            expired_session_cookie(),
        ))
    }

    /// Identity behind the current session
    #[oai(path = "/session", method = "get", tag = "AuthTags::Authentication")]
    async fn session(&self, auth: SessionAuth) -> Result<Json<SessionResponse>, ApiError> {
        let ctx = authenticate(&self.auth_coordinator, &auth).await?;
        Ok(Json(SessionResponse::from(&ctx.actor)))
    }
}
