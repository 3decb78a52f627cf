use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::{validation, AuthorizationProvider};
use crate::stores::{AssignmentStore, CommentStore, TicketStore};
use crate::types::db::comment;
use crate::types::internal::{Action, RequestContext};

use super::{enforce, now, ticket_facts};

pub struct CommentCoordinator {
    db: DatabaseConnection,
    authorization_provider: Arc<AuthorizationProvider>,
    ticket_store: Arc<TicketStore>,
    assignment_store: Arc<AssignmentStore>,
    comment_store: Arc<CommentStore>,
}

impl CommentCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            authorization_provider: app_data.authorization_provider.clone(),
            ticket_store: app_data.ticket_store.clone(),
            assignment_store: app_data.assignment_store.clone(),
            comment_store: app_data.comment_store.clone(),
        }
    }

    pub async fn list(&self, ctx: &RequestContext, ticket_id: i32) -> Result<Vec<comment::Model>, InternalError> {
        let ticket = self.ticket_store.get(&self.db, ticket_id).await?;
        let facts = ticket_facts(&self.assignment_store, &self.db, ctx, &ticket).await?;
        enforce(&self.authorization_provider, ctx, Action::ReadComments(facts))?;

        self.comment_store.list_for_ticket(&self.db, ticket_id).await
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
        content: String,
    ) -> Result<comment::Model, InternalError> {
        let ticket = self.ticket_store.get(&self.db, ticket_id).await?;
        let facts = ticket_facts(&self.assignment_store, &self.db, ctx, &ticket).await?;
        enforce(&self.authorization_provider, ctx, Action::CreateComment(facts))?;

        validation::require_non_empty("content", &content)?;

        let comment = self
            .comment_store
            .create(&self.db, ticket_id, ctx.actor_id(), content, now())
            .await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor_id = ctx.actor_id(),
            ticket_id,
            comment_id = comment.id,
            "Comment added"
        );

        Ok(comment)
    }

    /// Delete a comment as its author or as the admin who created its ticket
    pub async fn delete(&self, ctx: &RequestContext, comment_id: i32) -> Result<(), InternalError> {
        let comment = self.comment_store.get(&self.db, comment_id).await?;
        let ticket = self.ticket_store.get(&self.db, comment.ticket_id).await?;
        let facts = ticket_facts(&self.assignment_store, &self.db, ctx, &ticket).await?;
        enforce(
            &self.authorization_provider,
            ctx,
            Action::DeleteComment {
                author_id: comment.user_id,
                ticket: facts,
            },
        )?;

        self.comment_store.delete(&self.db, comment).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor_id = ctx.actor_id(),
            comment_id,
            "Comment deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppEnvironment;
    use crate::coordinators::{CreateTicketInput, TicketCoordinator};
    use crate::errors::internal::TicketError;
    use crate::test::utils::{ctx_for, insert_user, setup_test_app};
    use crate::types::internal::{DenyReason, Role};

    #[tokio::test]
    async fn test_comment_rules() {
        let app_data = setup_test_app(AppEnvironment::Development).await;
        let owner = insert_user(&app_data.db, "owner", Role::Admin).await;
        let other_admin = insert_user(&app_data.db, "other", Role::Admin).await;
        let alice = insert_user(&app_data.db, "alice", Role::Standard).await;
        let bob = insert_user(&app_data.db, "bob", Role::Standard).await;
        let ticket = TicketCoordinator::new(app_data.clone())
            .create(
                &ctx_for(&owner),
                CreateTicketInput {
                    title: "T".to_string(),
                    description: None,
                    status: None,
                    assigned_user_ids: vec![alice.id],
                },
            )
            .await
            .unwrap()
            .ticket;
        let comments = CommentCoordinator::new(app_data);

        // assigned user comments, unassigned user cannot
        let by_alice = comments
            .create(&ctx_for(&alice), ticket.id, "on it".to_string())
            .await
            .unwrap();
        assert_eq!(by_alice.user_id, alice.id);
        assert!(matches!(
            comments.create(&ctx_for(&bob), ticket.id, "me too".to_string()).await,
            Err(InternalError::AccessDenied(DenyReason::NotAssigned))
        ));
        assert!(matches!(
            comments.list(&ctx_for(&bob), ticket.id).await,
            Err(InternalError::AccessDenied(DenyReason::NotAssigned))
        ));

        // blank content after permission
        assert!(matches!(
            comments.create(&ctx_for(&alice), ticket.id, "  ".to_string()).await,
            Err(InternalError::Validation { .. })
        ));

        // admins read and comment without an assignment
        comments
            .create(&ctx_for(&other_admin), ticket.id, "fyi".to_string())
            .await
            .unwrap();
        assert_eq!(comments.list(&ctx_for(&other_admin), ticket.id).await.unwrap().len(), 2);

        // a non-creator admin cannot delete someone else's comment
        assert!(matches!(
            comments.delete(&ctx_for(&other_admin), by_alice.id).await,
            Err(InternalError::AccessDenied(DenyReason::NotCommentAuthor))
        ));
        // the creator admin can
        comments.delete(&ctx_for(&owner), by_alice.id).await.unwrap();
        assert!(matches!(
            comments.delete(&ctx_for(&owner), by_alice.id).await,
            Err(InternalError::Ticket(TicketError::CommentNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_author_deletes_own_comment() {
        let app_data = setup_test_app(AppEnvironment::Development).await;
        let owner = insert_user(&app_data.db, "owner", Role::Admin).await;
        let alice = insert_user(&app_data.db, "alice", Role::Standard).await;
        let ticket = TicketCoordinator::new(app_data.clone())
            .create(
                &ctx_for(&owner),
                CreateTicketInput {
                    title: "T".to_string(),
                    description: None,
                    status: None,
                    assigned_user_ids: vec![alice.id],
                },
            )
            .await
            .unwrap()
            .ticket;
        let comments = CommentCoordinator::new(app_data);
        let comment = comments
            .create(&ctx_for(&alice), ticket.id, "mine".to_string())
            .await
            .unwrap();

        comments.delete(&ctx_for(&alice), comment.id).await.unwrap();
        assert!(comments.list(&ctx_for(&alice), ticket.id).await.unwrap().is_empty());
    }
}
