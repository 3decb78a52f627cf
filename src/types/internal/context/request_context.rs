use crate::types::internal::actor::Actor;

use super::request_id::RequestId;

/// Request context that flows from the API layer into coordinators
///
/// Carries the resolved actor explicitly; nothing downstream reads identity
/// from anywhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Authenticated user the request acts for
    pub actor: Actor,
}

impl RequestContext {
    pub fn for_actor(actor: Actor) -> Self {
        Self {
            request_id: RequestId::new(),
            actor,
        }
    }

    pub fn actor_id(&self) -> i32 {
        self.actor.user_id
    }
}
