use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::AuthorizationProvider;
use crate::stores::{AssignmentStore, TicketStore, UserStore};
use crate::types::db::ticket_assignment;
use crate::types::internal::{Action, AssignmentScope, RequestContext};

use super::{enforce, now, ticket_facts};

pub struct AssignmentCoordinator {
    db: DatabaseConnection,
    authorization_provider: Arc<AuthorizationProvider>,
    ticket_store: Arc<TicketStore>,
    assignment_store: Arc<AssignmentStore>,
    user_store: Arc<UserStore>,
}

impl AssignmentCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            authorization_provider: app_data.authorization_provider.clone(),
            ticket_store: app_data.ticket_store.clone(),
            assignment_store: app_data.assignment_store.clone(),
            user_store: app_data.user_store.clone(),
        }
    }

    /// Assignments of a ticket as the actor may see them
    ///
    /// Admins get every assignment; anyone else gets only their own, and is
    /// denied outright when they have none.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
    ) -> Result<Vec<ticket_assignment::Model>, InternalError> {
        let ticket = self.ticket_store.get(&self.db, ticket_id).await?;
        let facts = ticket_facts(&self.assignment_store, &self.db, ctx, &ticket).await?;
        enforce(&self.authorization_provider, ctx, Action::ReadAssignments(facts))?;

        match self.authorization_provider.assignment_scope(&ctx.actor) {
            AssignmentScope::All => self.assignment_store.list_for_ticket(&self.db, ticket_id).await,
            AssignmentScope::OwnOnly(user_id) => Ok(self
                .assignment_store
                .find_for_user(&self.db, ticket_id, user_id)
                .await?
                .into_iter()
                .collect()),
        }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
        user_id: i32,
        assignment_note: Option<String>,
    ) -> Result<ticket_assignment::Model, InternalError> {
        let ticket = self.ticket_store.get(&self.db, ticket_id).await?;
        let facts = ticket_facts(&self.assignment_store, &self.db, ctx, &ticket).await?;
        enforce(&self.authorization_provider, ctx, Action::ManageAssignments(facts))?;

        self.user_store.get(&self.db, user_id).await?;
        let assignment = self
            .assignment_store
            .create(&self.db, ticket_id, user_id, assignment_note, now())
            .await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor_id = ctx.actor_id(),
            ticket_id,
            assignee_id = user_id,
            "User assigned to ticket"
        );

        Ok(assignment)
    }

    /// Change an assignment's note; `None` leaves it as is, `Some(None)` clears it
    pub async fn update(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
        assignment_id: i32,
        assignment_note: Option<Option<String>>,
    ) -> Result<ticket_assignment::Model, InternalError> {
        let ticket = self.ticket_store.get(&self.db, ticket_id).await?;
        let assignment = self
            .assignment_store
            .get_in_ticket(&self.db, ticket_id, assignment_id)
            .await?;
        let facts = ticket_facts(&self.assignment_store, &self.db, ctx, &ticket).await?;
        enforce(&self.authorization_provider, ctx, Action::ManageAssignments(facts))?;

        let Some(note) = assignment_note else {
            return Ok(assignment);
        };
        let updated = self.assignment_store.update_note(&self.db, assignment, note).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor_id = ctx.actor_id(),
            ticket_id,
            assignment_id,
            "Assignment updated"
        );

        Ok(updated)
    }

    pub async fn delete(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
        assignment_id: i32,
    ) -> Result<(), InternalError> {
        let ticket = self.ticket_store.get(&self.db, ticket_id).await?;
        let assignment = self
            .assignment_store
            .get_in_ticket(&self.db, ticket_id, assignment_id)
            .await?;
        let facts = ticket_facts(&self.assignment_store, &self.db, ctx, &ticket).await?;
        enforce(&self.authorization_provider, ctx, Action::ManageAssignments(facts))?;

        self.assignment_store.delete(&self.db, assignment).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor_id = ctx.actor_id(),
            ticket_id,
            assignment_id,
            "Assignment deleted"
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
    use crate::types::db::user;
    use crate::types::internal::{DenyReason, Role};

    struct Fixture {
        coordinator: AssignmentCoordinator,
        owner: user::Model,
        alice: user::Model,
        bob: user::Model,
        ticket_id: i32,
    }

    async fn fixture() -> Fixture {
        let app_data = setup_test_app(AppEnvironment::Development).await;
        let owner = insert_user(&app_data.db, "owner", Role::Admin).await;
        let alice = insert_user(&app_data.db, "alice", Role::Standard).await;
        let bob = insert_user(&app_data.db, "bob", Role::Standard).await;
        let created = TicketCoordinator::new(app_data.clone())
            .create(
                &ctx_for(&owner),
                CreateTicketInput {
                    title: "T".to_string(),
                    description: None,
                    status: None,
                    assigned_user_ids: vec![alice.id, bob.id],
                },
            )
            .await
            .unwrap();

        Fixture {
            coordinator: AssignmentCoordinator::new(app_data),
            owner,
            alice,
            bob,
            ticket_id: created.ticket.id,
        }
    }

    #[tokio::test]
    async fn test_admin_sees_all_assignments_standard_user_sees_own() {
        let f = fixture().await;

        let all = f.coordinator.list(&ctx_for(&f.owner), f.ticket_id).await.unwrap();
        assert_eq!(all.len(), 2);

        let own = f.coordinator.list(&ctx_for(&f.alice), f.ticket_id).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].user_id, f.alice.id);
    }

    #[tokio::test]
    async fn test_unassigned_reader_is_forbidden_not_empty() {
        let f = fixture().await;
        let own = f.coordinator.list(&ctx_for(&f.alice), f.ticket_id).await.unwrap();
        f.coordinator
            .delete(&ctx_for(&f.owner), f.ticket_id, own[0].id)
            .await
            .unwrap();

        let result = f.coordinator.list(&ctx_for(&f.alice), f.ticket_id).await;
        assert!(matches!(
            result,
            Err(InternalError::AccessDenied(DenyReason::NotAssigned))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_assignment_is_rejected() {
        let f = fixture().await;

        let result = f
            .coordinator
            .create(&ctx_for(&f.owner), f.ticket_id, f.bob.id, None)
            .await;
        assert!(matches!(
            result,
            Err(InternalError::Ticket(TicketError::DuplicateAssignment { .. }))
        ));
    }

    #[tokio::test]
    async fn test_assigning_unknown_user_is_not_found() {
        let f = fixture().await;

        let result = f
            .coordinator
            .create(&ctx_for(&f.owner), f.ticket_id, 4242, None)
            .await;
        assert!(matches!(
            result,
            Err(InternalError::Ticket(TicketError::UserNotFound(4242)))
        ));
    }

    #[tokio::test]
    async fn test_update_note_requires_ownership() {
        let f = fixture().await;
        let own = f.coordinator.list(&ctx_for(&f.alice), f.ticket_id).await.unwrap();

        let denied = f
            .coordinator
            .update(&ctx_for(&f.alice), f.ticket_id, own[0].id, Some(Some("x".into())))
            .await;
        assert!(matches!(
            denied,
            Err(InternalError::AccessDenied(DenyReason::AdminRequired))
        ));

        let updated = f
            .coordinator
            .update(&ctx_for(&f.owner), f.ticket_id, own[0].id, Some(Some("x".into())))
            .await
            .unwrap();
        assert_eq!(updated.assignment_note.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_missing_assignment_precedes_permission() {
        let f = fixture().await;

        let result = f.coordinator.delete(&ctx_for(&f.alice), f.ticket_id, 999).await;
        assert!(matches!(
            result,
            Err(InternalError::Ticket(TicketError::AssignmentNotFound(999)))
        ));
    }
}
