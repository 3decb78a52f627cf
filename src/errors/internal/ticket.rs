use thiserror::Error;

/// Lookup and consistency failures in the ticket, assignment and comment stores
#[derive(Error, Debug)]
pub enum TicketError {
    #[error("Ticket not found")]
    TicketNotFound(i32),

    #[error("User with id {0} not found")]
    UserNotFound(i32),

    #[error("Assignment not found")]
    AssignmentNotFound(i32),

    #[error("Comment not found")]
    CommentNotFound(i32),

    #[error("User is already assigned to this ticket")]
    DuplicateAssignment { ticket_id: i32, user_id: i32 },
}
