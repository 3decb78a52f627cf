use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::internal::TicketError;
use crate::errors::InternalError;
use crate::types::db::user;
use crate::types::internal::Role;

/// Read access to user rows plus role changes
pub struct UserStore;

impl UserStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find_by_id(user_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    /// Like `find_by_id` but a missing user is an error
    pub async fn get(&self, conn: &impl ConnectionTrait, user_id: i32) -> Result<user::Model, InternalError> {
        self.find_by_id(conn, user_id)
            .await?
            .ok_or(InternalError::Ticket(TicketError::UserNotFound(user_id)))
    }

    pub async fn find_by_username(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))
    }

    pub async fn list(&self, conn: &impl ConnectionTrait) -> Result<Vec<user::Model>, InternalError> {
        user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    pub async fn set_role(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        role: Role,
    ) -> Result<user::Model, InternalError> {
        let mut active: user::ActiveModel = self.get(conn, user_id).await?.into();
        active.role = Set(role.as_str().to_string());
        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("set_user_role", e))
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
