use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::errors::internal::TicketError;
use crate::errors::InternalError;
use crate::types::db::{ticket_assignment, user};

/// A user holding an assignment, as shown on a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedUser {
    pub user_id: i32,
    pub username: String,
}

pub struct AssignmentStore;

impl AssignmentStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_for_ticket(
        &self,
        conn: &impl ConnectionTrait,
        ticket_id: i32,
    ) -> Result<Vec<ticket_assignment::Model>, InternalError> {
        ticket_assignment::Entity::find()
            .filter(ticket_assignment::Column::TicketId.eq(ticket_id))
            .order_by_asc(ticket_assignment::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_assignments", e))
    }

    pub async fn find_for_user(
        &self,
        conn: &impl ConnectionTrait,
        ticket_id: i32,
        user_id: i32,
    ) -> Result<Option<ticket_assignment::Model>, InternalError> {
        ticket_assignment::Entity::find()
            .filter(ticket_assignment::Column::TicketId.eq(ticket_id))
            .filter(ticket_assignment::Column::UserId.eq(user_id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_assignment_for_user", e))
    }

    pub async fn is_assigned(
        &self,
        conn: &impl ConnectionTrait,
        ticket_id: i32,
        user_id: i32,
    ) -> Result<bool, InternalError> {
        Ok(self.find_for_user(conn, ticket_id, user_id).await?.is_some())
    }

    /// Look up an assignment by id, scoped to its ticket
    ///
    /// An assignment that exists but belongs to another ticket is not found.
    pub async fn get_in_ticket(
        &self,
        conn: &impl ConnectionTrait,
        ticket_id: i32,
        assignment_id: i32,
    ) -> Result<ticket_assignment::Model, InternalError> {
        ticket_assignment::Entity::find_by_id(assignment_id)
            .filter(ticket_assignment::Column::TicketId.eq(ticket_id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_assignment", e))?
            .ok_or(InternalError::Ticket(TicketError::AssignmentNotFound(assignment_id)))
    }

    /// Assign a user to a ticket
    ///
    /// Duplicate (ticket, user) pairs are rejected before the insert; the
    /// unique index maps to the same error if two requests race.
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        ticket_id: i32,
        user_id: i32,
        assignment_note: Option<String>,
        created_at: i64,
    ) -> Result<ticket_assignment::Model, InternalError> {
        if self.is_assigned(conn, ticket_id, user_id).await? {
            return Err(TicketError::DuplicateAssignment { ticket_id, user_id }.into());
        }

        ticket_assignment::ActiveModel {
            id: NotSet,
            ticket_id: Set(ticket_id),
            user_id: Set(user_id),
            assignment_note: Set(assignment_note),
            created_at: Set(created_at),
        }
        .insert(conn)
        .await
        .map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                TicketError::DuplicateAssignment { ticket_id, user_id }.into()
            } else {
                InternalError::database("insert_assignment", e)
            }
        })
    }

    pub async fn update_note(
        &self,
        conn: &impl ConnectionTrait,
        assignment: ticket_assignment::Model,
        assignment_note: Option<String>,
    ) -> Result<ticket_assignment::Model, InternalError> {
        let mut active: ticket_assignment::ActiveModel = assignment.into();
        active.assignment_note = Set(assignment_note);
        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_assignment", e))
    }

    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        assignment: ticket_assignment::Model,
    ) -> Result<(), InternalError> {
        assignment
            .delete(conn)
            .await
            .map_err(|e| InternalError::database("delete_assignment", e))?;
        Ok(())
    }

    /// Assigned users for each of the given tickets, in assignment order
    ///
    /// Tickets without assignments map to an empty list.
    pub async fn assigned_users(
        &self,
        conn: &impl ConnectionTrait,
        ticket_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<AssignedUser>>, InternalError> {
        let mut by_ticket: HashMap<i32, Vec<AssignedUser>> =
            ticket_ids.iter().map(|id| (*id, Vec::new())).collect();
        if ticket_ids.is_empty() {
            return Ok(by_ticket);
        }

        let rows = ticket_assignment::Entity::find()
            .filter(ticket_assignment::Column::TicketId.is_in(ticket_ids.iter().copied()))
            .order_by_asc(ticket_assignment::Column::Id)
            .find_also_related(user::Entity)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_assigned_users", e))?;

        for (assignment, user) in rows {
            let Some(user) = user else {
                tracing::warn!("Assignment {} references missing user {}", assignment.id, assignment.user_id);
                continue;
            };
            by_ticket.entry(assignment.ticket_id).or_default().push(AssignedUser {
                user_id: user.id,
                username: user.username,
            });
        }

        Ok(by_ticket)
    }
}

impl Default for AssignmentStore {
    fn default() -> Self {
        Self::new()
    }
}
