// Database entities (sea-orm)
pub mod comment;
pub mod session;
pub mod ticket;
pub mod ticket_assignment;
pub mod user;
