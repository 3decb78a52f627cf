use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::types::dto::common::MessageResponse;
use crate::types::internal::Actor;

/// Credentials for register and login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i32,
}

#[derive(ApiResponse, Debug)]
pub enum RegisterApiResponse {
    /// Account created
    #[oai(status = 201)]
    Created(Json<RegisterResponse>),
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: i32,
    pub username: String,
    pub role: String,
}

#[derive(ApiResponse, Debug)]
pub enum LoginApiResponse {
    /// Logged in; the session cookie is set
    #[oai(status = 200)]
    Ok(Json<LoginResponse>, #[oai(header = "Set-Cookie")] String),
}

#[derive(ApiResponse, Debug)]
pub enum LogoutApiResponse {
    /// Logged out; the session cookie is expired
    #[oai(status = 200)]
    Ok(Json<MessageResponse>, #[oai(header = "Set-Cookie")] String),
}

/// Identity behind the current session
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub username: String,
    pub role: String,
    pub user_id: i32,
}

impl From<&Actor> for SessionResponse {
    fn from(actor: &Actor) -> Self {
        Self {
            username: actor.username.clone(),
            role: actor.role.to_string(),
            user_id: actor.user_id,
        }
    }
}
