use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use sea_orm::sea_query::JoinType;

use crate::errors::internal::TicketError;
use crate::errors::InternalError;
use crate::types::db::{comment, ticket, ticket_assignment, user};
use crate::types::internal::TicketScope;

/// Fields of a ticket about to be created
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub creator_id: i32,
}

/// Partial update; `None` leaves a field untouched
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct TicketChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<String>,
}

impl TicketChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

pub struct TicketStore;

impl TicketStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        scope: TicketScope,
    ) -> Result<Vec<ticket::Model>, InternalError> {
        let query = ticket::Entity::find().order_by_asc(ticket::Column::Id);
        let query = match scope {
            TicketScope::All => query,
            TicketScope::AssignedTo(user_id) => query
                .join(JoinType::InnerJoin, ticket::Relation::TicketAssignment.def())
                .filter(ticket_assignment::Column::UserId.eq(user_id)),
        };

        query
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_tickets", e))
    }

    pub async fn find(
        &self,
        conn: &impl ConnectionTrait,
        ticket_id: i32,
    ) -> Result<Option<ticket::Model>, InternalError> {
        ticket::Entity::find_by_id(ticket_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_ticket", e))
    }

    /// Like `find` but a missing ticket is an error
    pub async fn get(&self, conn: &impl ConnectionTrait, ticket_id: i32) -> Result<ticket::Model, InternalError> {
        self.find(conn, ticket_id)
            .await?
            .ok_or(InternalError::Ticket(TicketError::TicketNotFound(ticket_id)))
    }

    /// Insert a ticket and its initial assignments in one transaction
    ///
    /// Users are checked in the order given; the first unknown id aborts with
    /// `UserNotFound` and nothing is written. Repeated ids collapse onto their
    /// first occurrence.
    pub async fn create_with_assignments(
        &self,
        conn: &impl TransactionTrait,
        new_ticket: NewTicket,
        assigned_user_ids: &[i32],
        now: i64,
    ) -> Result<ticket::Model, InternalError> {
        let txn = conn.begin().await.map_err(InternalError::transaction_begin)?;

        let mut user_ids: Vec<i32> = Vec::with_capacity(assigned_user_ids.len());
        for &user_id in assigned_user_ids {
            if user_ids.contains(&user_id) {
                continue;
            }
            let exists = user::Entity::find_by_id(user_id)
                .one(&txn)
                .await
                .map_err(|e| InternalError::database("check_assigned_user", e))?
                .is_some();
            if !exists {
                return Err(TicketError::UserNotFound(user_id).into());
            }
            user_ids.push(user_id);
        }

        let ticket = ticket::ActiveModel {
            id: NotSet,
            title: Set(new_ticket.title),
            description: Set(new_ticket.description),
            status: Set(new_ticket.status),
            creator_id: Set(new_ticket.creator_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| InternalError::database("insert_ticket", e))?;

        for user_id in user_ids {
            ticket_assignment::ActiveModel {
                id: NotSet,
                ticket_id: Set(ticket.id),
                user_id: Set(user_id),
                assignment_note: Set(None),
                created_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("insert_initial_assignment", e))?;
        }

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        Ok(ticket)
    }

    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        ticket: ticket::Model,
        changes: TicketChanges,
        now: i64,
    ) -> Result<ticket::Model, InternalError> {
        if changes.is_empty() {
            return Ok(ticket);
        }

        let mut active: ticket::ActiveModel = ticket.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(status) = changes.status {
            active.status = Set(status);
        }
        active.updated_at = Set(now);

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_ticket", e))
    }

    /// Remove a ticket with its comments and assignments in one transaction
    pub async fn delete_with_children(
        &self,
        conn: &impl TransactionTrait,
        ticket_id: i32,
    ) -> Result<(), InternalError> {
        let txn = conn.begin().await.map_err(InternalError::transaction_begin)?;

        comment::Entity::delete_many()
            .filter(comment::Column::TicketId.eq(ticket_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_ticket_comments", e))?;

        ticket_assignment::Entity::delete_many()
            .filter(ticket_assignment::Column::TicketId.eq(ticket_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_ticket_assignments", e))?;

        let deleted = ticket::Entity::delete_by_id(ticket_id)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_ticket", e))?;

        if deleted.rows_affected == 0 {
            return Err(TicketError::TicketNotFound(ticket_id).into());
        }

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        Ok(())
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}
