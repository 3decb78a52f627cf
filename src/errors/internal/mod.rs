use thiserror::Error;

use crate::types::internal::DenyReason;

pub mod credential;
pub mod database;
pub mod session;
pub mod ticket;

pub use credential::CredentialError;
pub use database::{DatabaseError, TransactionStage};
pub use session::SessionError;
pub use ticket::TicketError;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors (database, crypto, parse) are shared; domain errors
/// are grouped per concern. Not exposed via API - endpoints convert to
/// `ApiError`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error("Validation error: {field}: {message}")]
    Validation {
        field: String,
        message: String,
    },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Ticket(#[from] TicketError),

    #[error("Access denied: {0}")]
    AccessDenied(#[from] DenyReason),
}

impl InternalError {
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database(DatabaseError::Query {
            operation: operation.into(),
            source,
        })
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> Self {
        Self::Database(DatabaseError::Transaction {
            stage: TransactionStage::Begin,
            source,
        })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> Self {
        Self::Database(DatabaseError::Transaction {
            stage: TransactionStage::Commit,
            source,
        })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
