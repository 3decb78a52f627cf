// Coordinators layer - Workflow orchestration
//
// Coordinators sequence store and provider calls for one API operation:
// load the target, ask the authorization engine, validate input, then write.

pub mod assignment_coordinator;
pub mod auth_coordinator;
pub mod comment_coordinator;
pub mod ticket_coordinator;
pub mod user_coordinator;

pub use assignment_coordinator::AssignmentCoordinator;
pub use auth_coordinator::{AuthCoordinator, LoginOutcome};
pub use comment_coordinator::CommentCoordinator;
pub use ticket_coordinator::{CreateTicketInput, TicketCoordinator, TicketWithAssignees};
pub use user_coordinator::UserCoordinator;

use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::providers::AuthorizationProvider;
use crate::stores::AssignmentStore;
use crate::types::db::ticket;
use crate::types::internal::{Action, RequestContext, TicketFacts};

/// Ask the engine and turn a denial into an error
fn enforce(
    engine: &AuthorizationProvider,
    ctx: &RequestContext,
    action: Action,
) -> Result<(), InternalError> {
    engine.can_access(&ctx.actor, action).into_result().map_err(|reason| {
        tracing::debug!(
            request_id = %ctx.request_id,
            actor_id = ctx.actor_id(),
            reason = reason.code(),
            "Access denied for {:?}",
            action
        );
        InternalError::AccessDenied(reason)
    })
}

/// Collect what the engine needs to know about `ticket` for this actor
async fn ticket_facts(
    assignment_store: &AssignmentStore,
    conn: &impl ConnectionTrait,
    ctx: &RequestContext,
    ticket: &ticket::Model,
) -> Result<TicketFacts, InternalError> {
    Ok(TicketFacts {
        ticket_id: ticket.id,
        creator_id: ticket.creator_id,
        actor_assigned: assignment_store
            .is_assigned(conn, ticket.id, ctx.actor_id())
            .await?,
    })
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
