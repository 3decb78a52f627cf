use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No session token presented")]
    Missing,

    #[error("Session not found")]
    NotFound,

    #[error("Session expired")]
    Expired,

    /// Session row points at a user that no longer exists
    #[error("Session user {0} not found")]
    UserGone(i32),
}
