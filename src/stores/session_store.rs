use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::errors::InternalError;
use crate::types::db::session;

/// Server-side session rows keyed by token digest
pub struct SessionStore;

impl SessionStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        token_hash: &str,
        user_id: i32,
        created_at: i64,
        expires_at: i64,
    ) -> Result<session::Model, InternalError> {
        session::ActiveModel {
            token_hash: Set(token_hash.to_owned()),
            user_id: Set(user_id),
            created_at: Set(created_at),
            expires_at: Set(expires_at),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_session", e))
    }

    pub async fn find(
        &self,
        conn: &impl ConnectionTrait,
        token_hash: &str,
    ) -> Result<Option<session::Model>, InternalError> {
        session::Entity::find_by_id(token_hash.to_owned())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_session", e))
    }

    /// Returns whether a row was removed
    pub async fn revoke(&self, conn: &impl ConnectionTrait, token_hash: &str) -> Result<bool, InternalError> {
        let result = session::Entity::delete_by_id(token_hash.to_owned())
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("revoke_session", e))?;
        Ok(result.rows_affected > 0)
    }

    /// Drop a user's sessions that expired at or before `now`
    pub async fn purge_expired_for_user(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        now: i64,
    ) -> Result<u64, InternalError> {
        let result = session::Entity::delete_many()
            .filter(session::Column::UserId.eq(user_id))
            .filter(session::Column::ExpiresAt.lte(now))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("purge_expired_sessions", e))?;
        Ok(result.rows_affected)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
