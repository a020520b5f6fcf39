//! Common error handling utilities for the Configurator Gateway
//!
//! Every crate in the workspace owns its own `thiserror` enum. This crate gives
//! those enums a shared vocabulary so the northbound surface can report them
//! consistently:
//!
//! - **Error Classes**: a small closed set of outcome categories (`ErrorClass`)
//!   that map one-to-one onto gRPC status codes
//! - **Error Codes**: stable string codes for log correlation and API responses
//! - **Error Context**: structured request context attached to error logs
//!
//! # Example
//!
//! ```ignore
//! use error_common::{Classify, ErrorClass, codes};
//!
//! impl Classify for StorageError {
//!     fn class(&self) -> ErrorClass {
//!         match self {
//!             StorageError::NotFound(_) => ErrorClass::NotFound,
//!             _ => ErrorClass::Internal,
//!         }
//!     }
//!
//!     fn code(&self) -> &'static str {
//!         codes::storage::NOT_FOUND
//!     }
//! }
//!
//! let status = error_common::to_status(&StorageError::NotFound("n1".into()));
//! assert_eq!(status.code(), tonic::Code::NotFound);
//! ```

pub mod types;
pub mod context;
pub mod codes;

pub use types::*;
pub use context::*;
