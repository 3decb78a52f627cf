use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user;

/// Public view of a user
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: i32,
    pub username: String,
}

impl From<user::Model> for UserSummary {
    fn from(model: user::Model) -> Self {
        Self {
            user_id: model.id,
            username: model.username,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ElevateUserRequest {
    pub user_id: i32,
    /// Shared elevation secret
    pub dev_password: String,
}
