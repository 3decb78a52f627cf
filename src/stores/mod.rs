// Stores layer - persistence
//
// Stores are stateless and take the connection per call so coordinators can
// run them against a pooled connection or inside a transaction.

pub mod assignment_store;
pub mod comment_store;
pub mod credential_store;
pub mod session_store;
pub mod ticket_store;
pub mod user_store;

pub use assignment_store::{AssignedUser, AssignmentStore};
pub use comment_store::CommentStore;
pub use credential_store::CredentialStore;
pub use session_store::SessionStore;
pub use ticket_store::{NewTicket, TicketChanges, TicketStore};
pub use user_store::UserStore;
