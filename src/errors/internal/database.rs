use std::fmt;

use sea_orm::DbErr;
use thiserror::Error;

/// Point in a transaction's life where it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStage {
    Begin,
    Commit,
}

impl fmt::Display for TransactionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStage::Begin => f.write_str("begin"),
            TransactionStage::Commit => f.write_str("commit"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {operation} failed: {source}")]
    Query {
        operation: String,
        #[source]
        source: DbErr,
    },

    #[error("Transaction {stage} failed: {source}")]
    Transaction {
        stage: TransactionStage,
        #[source]
        source: DbErr,
    },
}
