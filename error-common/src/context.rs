use crate::types::Classify;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Error context information attached to error logs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    pub request_id: Option<Uuid>,
    pub network_id: Option<String>,
    pub operation: Option<String>,
    /// Zero-based position of the failing item inside a batch
    pub batch_index: Option<usize>,
    pub additional: HashMap<String, String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_network_id(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = Some(network_id.into());
        self
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn with_batch_index(mut self, index: usize) -> Self {
        self.batch_index = Some(index);
        self
    }

    pub fn add_context<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }
}

/// Emit a structured event for a classified error.
///
/// Client errors are logged at `warn`, everything else at `error`.
pub fn log_error<E>(context: &ErrorContext, error: &E)
where
    E: Classify + fmt::Display + ?Sized,
{
    let class = error.class();
    let request_id = context.request_id.as_ref().map(tracing::field::display);
    let batch_index = context.batch_index.map(|index| index as u64);
    let network_id = context.network_id.as_deref().unwrap_or("");
    let operation = context.operation.as_deref().unwrap_or("");

    if class.is_client_error() {
        tracing::warn!(
            request_id,
            network_id,
            operation,
            batch_index,
            additional = ?context.additional,
            error_code = error.code(),
            error_class = %class,
            error = %error,
            "request failed"
        );
    } else {
        tracing::error!(
            request_id,
            network_id,
            operation,
            batch_index,
            additional = ?context.additional,
            error_code = error.code(),
            error_class = %class,
            error = %error,
            "request failed"
        );
    }
}
