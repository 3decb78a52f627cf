use thiserror::Error;

/// Why the authorization engine refused an action
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    #[error("Admin access required")]
    AdminRequired,

    #[error("You can only modify tickets you created")]
    NotTicketCreator,

    #[error("You are not assigned to this ticket")]
    NotAssigned,

    #[error("You are not authorized to delete this comment")]
    NotCommentAuthor,

    #[error("Not allowed in production")]
    ProductionMode,

    #[error("Invalid elevation secret")]
    InvalidElevationSecret,
}

impl DenyReason {
    /// Stable machine-readable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            DenyReason::AdminRequired => "admin_required",
            DenyReason::NotTicketCreator => "not_ticket_creator",
            DenyReason::NotAssigned => "not_assigned",
            DenyReason::NotCommentAuthor => "not_comment_author",
            DenyReason::ProductionMode => "production_mode",
            DenyReason::InvalidElevationSecret => "invalid_elevation_secret",
        }
    }
}

/// Result of evaluating a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Evaluate `next` only when this decision allows
    pub fn and_then(self, next: impl FnOnce() -> Decision) -> Decision {
        match self {
            Decision::Allow => next(),
            denied => denied,
        }
    }

    /// Evaluate `alternative` only when this decision denies.
    /// The first denial reason is kept if both deny.
    pub fn or_else(self, alternative: impl FnOnce() -> Decision) -> Decision {
        match self {
            Decision::Allow => Decision::Allow,
            Decision::Deny(reason) => match alternative() {
                Decision::Allow => Decision::Allow,
                Decision::Deny(_) => Decision::Deny(reason),
            },
        }
    }

    pub fn into_result(self) -> Result<(), DenyReason> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(reason),
        }
    }
}

/// What the engine needs to know about a ticket to decide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketFacts {
    pub ticket_id: i32,
    pub creator_id: i32,
    /// Whether the acting user holds an assignment on this ticket
    pub actor_assigned: bool,
}

/// An operation together with the facts about its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadTicket(TicketFacts),
    CreateTicket,
    UpdateTicket(TicketFacts),
    DeleteTicket(TicketFacts),
    ReadAssignments(TicketFacts),
    ManageAssignments(TicketFacts),
    ReadComments(TicketFacts),
    CreateComment(TicketFacts),
    DeleteComment { author_id: i32, ticket: TicketFacts },
    ListUsers,
    LookupUser,
}

/// Which tickets a listing may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketScope {
    All,
    AssignedTo(i32),
}

/// Which assignments of a ticket a reader may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentScope {
    All,
    OwnOnly(i32),
}
