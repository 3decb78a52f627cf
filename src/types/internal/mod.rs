// Internal types - never serialized over the wire
pub mod actor;
pub mod authorization;
pub mod context;

pub use actor::{Actor, Role};
pub use authorization::{Action, AssignmentScope, Decision, DenyReason, TicketFacts, TicketScope};
pub use context::{RequestContext, RequestId};
