use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::{validation, AuthorizationProvider};
use crate::stores::{AssignedUser, AssignmentStore, NewTicket, TicketChanges, TicketStore};
use crate::types::db::ticket;
use crate::types::internal::{Action, RequestContext};

use super::{enforce, now, ticket_facts};

pub const DEFAULT_STATUS: &str = "Open";

/// A ticket together with everyone assigned to it
#[derive(Debug, Clone)]
pub struct TicketWithAssignees {
    pub ticket: ticket::Model,
    pub assigned_users: Vec<AssignedUser>,
}

#[derive(Debug, Clone)]
pub struct CreateTicketInput {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub assigned_user_ids: Vec<i32>,
}

pub struct TicketCoordinator {
    db: DatabaseConnection,
    authorization_provider: Arc<AuthorizationProvider>,
    ticket_store: Arc<TicketStore>,
    assignment_store: Arc<AssignmentStore>,
}

impl TicketCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            authorization_provider: app_data.authorization_provider.clone(),
            ticket_store: app_data.ticket_store.clone(),
            assignment_store: app_data.assignment_store.clone(),
        }
    }

    async fn with_assignees(
        &self,
        tickets: Vec<ticket::Model>,
    ) -> Result<Vec<TicketWithAssignees>, InternalError> {
        let ids: Vec<i32> = tickets.iter().map(|t| t.id).collect();
        let mut assignees = self.assignment_store.assigned_users(&self.db, &ids).await?;

        Ok(tickets
            .into_iter()
            .map(|ticket| TicketWithAssignees {
                assigned_users: assignees.remove(&ticket.id).unwrap_or_default(),
                ticket,
            })
            .collect())
    }

    async fn attach_assignees(&self, ticket: ticket::Model) -> Result<TicketWithAssignees, InternalError> {
        let mut assignees = self.assignment_store.assigned_users(&self.db, &[ticket.id]).await?;
        Ok(TicketWithAssignees {
            assigned_users: assignees.remove(&ticket.id).unwrap_or_default(),
            ticket,
        })
    }

    /// Tickets visible to the actor: all for admins, assigned ones otherwise
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<TicketWithAssignees>, InternalError> {
        let scope = self.authorization_provider.ticket_scope(&ctx.actor);
        let tickets = self.ticket_store.list(&self.db, scope).await?;

        tracing::debug!(
            request_id = %ctx.request_id,
            actor_id = ctx.actor_id(),
            count = tickets.len(),
            "Listed tickets with scope {:?}",
            scope
        );

        self.with_assignees(tickets).await
    }

    pub async fn get(&self, ctx: &RequestContext, ticket_id: i32) -> Result<TicketWithAssignees, InternalError> {
        let ticket = self.ticket_store.get(&self.db, ticket_id).await?;
        let facts = ticket_facts(&self.assignment_store, &self.db, ctx, &ticket).await?;
        enforce(&self.authorization_provider, ctx, Action::ReadTicket(facts))?;

        self.attach_assignees(ticket).await
    }

    /// Create a ticket and its initial assignments atomically
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateTicketInput,
    ) -> Result<TicketWithAssignees, InternalError> {
        enforce(&self.authorization_provider, ctx, Action::CreateTicket)?;

        validation::validate_title(&input.title)?;
        if let Some(description) = &input.description {
            validation::validate_description(description)?;
        }
        let status = input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());
        validation::validate_status(&status)?;
        if input.assigned_user_ids.is_empty() {
            return Err(InternalError::validation(
                "assigned_user_ids",
                "at least one assigned user is required",
            ));
        }

        let draft = NewTicket {
            title: input.title,
            description: input.description,
            status,
            creator_id: ctx.actor_id(),
        };
        let ticket = self
            .ticket_store
            .create_with_assignments(&self.db, draft, &input.assigned_user_ids, now())
            .await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor_id = ctx.actor_id(),
            ticket_id = ticket.id,
            "Ticket created"
        );

        self.attach_assignees(ticket).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
        changes: TicketChanges,
    ) -> Result<ticket::Model, InternalError> {
        let ticket = self.ticket_store.get(&self.db, ticket_id).await?;
        let facts = ticket_facts(&self.assignment_store, &self.db, ctx, &ticket).await?;
        enforce(&self.authorization_provider, ctx, Action::UpdateTicket(facts))?;

        if let Some(title) = &changes.title {
            validation::validate_title(title)?;
        }
        if let Some(Some(description)) = &changes.description {
            validation::validate_description(description)?;
        }
        if let Some(status) = &changes.status {
            validation::validate_status(status)?;
        }

        let updated = self.ticket_store.update(&self.db, ticket, changes, now()).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor_id = ctx.actor_id(),
            ticket_id,
            "Ticket updated"
        );

        Ok(updated)
    }

    /// Delete a ticket along with its assignments and comments
    pub async fn delete(&self, ctx: &RequestContext, ticket_id: i32) -> Result<(), InternalError> {
        let ticket = self.ticket_store.get(&self.db, ticket_id).await?;
        let facts = ticket_facts(&self.assignment_store, &self.db, ctx, &ticket).await?;
        enforce(&self.authorization_provider, ctx, Action::DeleteTicket(facts))?;

        self.ticket_store.delete_with_children(&self.db, ticket_id).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor_id = ctx.actor_id(),
            ticket_id,
            "Ticket deleted"
        );

        Ok(())
    }
}
