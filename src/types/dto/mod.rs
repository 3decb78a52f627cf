// Wire types for the HTTP API
pub mod assignments;
pub mod auth;
pub mod comments;
pub mod common;
pub mod tickets;
pub mod users;
