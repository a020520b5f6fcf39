use serde::{Deserialize, Serialize};
use std::fmt;
use tonic::{Code, Status};

/// Outcome category shared by every error in the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// The caller sent something malformed (bad payload, unknown operation)
    InvalidArgument,
    /// The referenced network or entity does not exist
    NotFound,
    /// A create collided with an existing record
    AlreadyExists,
    /// The request is valid but cannot run in the current state
    FailedPrecondition,
    /// The backend could not be reached or could not start work
    Unavailable,
    /// The backend refused to make the work durable
    Aborted,
    /// Anything else
    Internal,
}

impl ErrorClass {
    /// gRPC status code for this class
    pub fn grpc_code(self) -> Code {
        match self {
            ErrorClass::InvalidArgument => Code::InvalidArgument,
            ErrorClass::NotFound => Code::NotFound,
            ErrorClass::AlreadyExists => Code::AlreadyExists,
            ErrorClass::FailedPrecondition => Code::FailedPrecondition,
            ErrorClass::Unavailable => Code::Unavailable,
            ErrorClass::Aborted => Code::Aborted,
            ErrorClass::Internal => Code::Internal,
        }
    }

    /// Whether the caller, rather than the system, caused the error
    pub fn is_client_error(self) -> bool {
        matches!(
            self,
            ErrorClass::InvalidArgument
                | ErrorClass::NotFound
                | ErrorClass::AlreadyExists
                | ErrorClass::FailedPrecondition
        )
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClass::InvalidArgument => "invalid_argument",
            ErrorClass::NotFound => "not_found",
            ErrorClass::AlreadyExists => "already_exists",
            ErrorClass::FailedPrecondition => "failed_precondition",
            ErrorClass::Unavailable => "unavailable",
            ErrorClass::Aborted => "aborted",
            ErrorClass::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Implemented by every crate error so it can be reported uniformly
pub trait Classify {
    fn class(&self) -> ErrorClass;

    /// Stable error code, see [`crate::codes`]
    fn code(&self) -> &'static str;
}

/// Convert a classified error into a gRPC status.
///
/// The message carries the error code as a prefix so clients that only see the
/// status string can still correlate it with server logs.
pub fn to_status<E>(error: &E) -> Status
where
    E: Classify + fmt::Display + ?Sized,
{
    Status::new(
        error.class().grpc_code(),
        format!("[{}] {}", error.code(), error),
    )
}
