use error_common::{codes, Classify, ErrorClass};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Transaction is read-only")]
    ReadOnly,

    #[error("Transaction already committed or rolled back")]
    TransactionClosed,

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl Classify for StorageError {
    fn class(&self) -> ErrorClass {
        match self {
            StorageError::NotFound(_) => ErrorClass::NotFound,
            StorageError::AlreadyExists(_) => ErrorClass::AlreadyExists,
            StorageError::InvalidArgument(_) => ErrorClass::InvalidArgument,
            StorageError::ReadOnly | StorageError::TransactionClosed => {
                ErrorClass::FailedPrecondition
            }
            StorageError::Backend(_) => ErrorClass::Unavailable,
            StorageError::Internal(_) => ErrorClass::Internal,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            StorageError::NotFound(_) => codes::storage::NOT_FOUND,
            StorageError::AlreadyExists(_) => codes::storage::ALREADY_EXISTS,
            StorageError::InvalidArgument(_) => codes::argument::INVALID_IDENTIFIER,
            StorageError::ReadOnly => codes::storage::READ_ONLY,
            StorageError::TransactionClosed => codes::storage::TRANSACTION_CLOSED,
            StorageError::Backend(_) | StorageError::Internal(_) => {
                codes::storage::BACKEND_FAILURE
            }
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
