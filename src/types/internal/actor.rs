use std::fmt;
use std::str::FromStr;

use crate::errors::InternalError;
use crate::types::db::user;

/// Role stored on a user row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Standard,
    Admin,
    Master,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Admin => "admin",
            Role::Master => "master",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "standard" => Ok(Role::Standard),
            "admin" => Ok(Role::Admin),
            "master" => Ok(Role::Master),
            other => Err(InternalError::parse("role", format!("unknown role '{}'", other))),
        }
    }
}

/// The authenticated user a request acts on behalf of
///
/// Resolved from the session on every request; the role is read fresh from
/// the users table so elevation takes effect without logging in again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl TryFrom<user::Model> for Actor {
    type Error = InternalError;

    fn try_from(user: user::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            role: user.role.parse()?,
            user_id: user.id,
            username: user.username,
        })
    }
}
