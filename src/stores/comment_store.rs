use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::errors::internal::TicketError;
use crate::errors::InternalError;
use crate::types::db::comment;

pub struct CommentStore;

impl CommentStore {
    pub fn new() -> Self {
        Self
    }

    /// Comments of a ticket, oldest first
    pub async fn list_for_ticket(
        &self,
        conn: &impl ConnectionTrait,
        ticket_id: i32,
    ) -> Result<Vec<comment::Model>, InternalError> {
        comment::Entity::find()
            .filter(comment::Column::TicketId.eq(ticket_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_comments", e))
    }

    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        ticket_id: i32,
        user_id: i32,
        content: String,
        created_at: i64,
    ) -> Result<comment::Model, InternalError> {
        comment::ActiveModel {
            id: NotSet,
            content: Set(content),
            created_at: Set(created_at),
            ticket_id: Set(ticket_id),
            user_id: Set(user_id),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_comment", e))
    }

    pub async fn get(&self, conn: &impl ConnectionTrait, comment_id: i32) -> Result<comment::Model, InternalError> {
        comment::Entity::find_by_id(comment_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_comment", e))?
            .ok_or(InternalError::Ticket(TicketError::CommentNotFound(comment_id)))
    }

    pub async fn delete(&self, conn: &impl ConnectionTrait, comment: comment::Model) -> Result<(), InternalError> {
        comment
            .delete(conn)
            .await
            .map_err(|e| InternalError::database("delete_comment", e))?;
        Ok(())
    }
}

impl Default for CommentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::ticket_store::{NewTicket, TicketStore};
    use crate::test::utils::{insert_user, setup_test_db};
    use crate::types::internal::Role;

    #[tokio::test]
    async fn test_comments_listed_oldest_first_then_by_id() {
        let db = setup_test_db().await;
        let admin = insert_user(&db, "admin", Role::Admin).await;
        let draft = NewTicket {
            title: "T".to_string(),
            description: None,
            status: "Open".to_string(),
            creator_id: admin.id,
        };
        let ticket = TicketStore::new()
            .create_with_assignments(&db, draft, &[admin.id], 0)
            .await
            .unwrap();
        let store = CommentStore::new();

        store.create(&db, ticket.id, admin.id, "late".into(), 20).await.unwrap();
        store.create(&db, ticket.id, admin.id, "early-a".into(), 10).await.unwrap();
        store.create(&db, ticket.id, admin.id, "early-b".into(), 10).await.unwrap();

        let contents: Vec<_> = store
            .list_for_ticket(&db, ticket.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.content)
            .collect();
        assert_eq!(contents, vec!["early-a", "early-b", "late"]);
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let db = setup_test_db().await;
        let admin = insert_user(&db, "admin", Role::Admin).await;
        let draft = NewTicket {
            title: "T".to_string(),
            description: None,
            status: "Open".to_string(),
            creator_id: admin.id,
        };
        let ticket = TicketStore::new()
            .create_with_assignments(&db, draft, &[admin.id], 0)
            .await
            .unwrap();
        let store = CommentStore::new();

        let comment = store.create(&db, ticket.id, admin.id, "hi".into(), 1).await.unwrap();
        let fetched = store.get(&db, comment.id).await.unwrap();
        store.delete(&db, fetched).await.unwrap();

        assert!(matches!(
            store.get(&db, comment.id).await,
            Err(InternalError::Ticket(TicketError::CommentNotFound(_)))
        ));
    }
}
