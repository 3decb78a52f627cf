use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// Unknown username or wrong password; callers cannot tell which
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    DuplicateUsername(String),

    #[error("Password hashing failed: {0}")]
    PasswordHashingFailed(String),
}
