use configurator_serde::SerdeError;
use configurator_storage::StorageError;
use error_common::{codes, to_status, Classify, ErrorClass};
use thiserror::Error;

/// Everything a northbound request can fail with
#[derive(Error, Debug)]
pub enum ConfiguratorError {
    /// The storage transaction could not be opened; nothing to roll back
    #[error("Failed to open storage transaction: {0}")]
    TransactionOpen(#[source] StorageError),

    /// A configuration payload failed schema validation
    #[error("Invalid configuration payload at batch index {index}: {source}")]
    Validation {
        index: usize,
        #[source]
        source: SerdeError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Write request {0} not recognized")]
    UnrecognizedWrite(String),

    /// All steps succeeded but the backend refused to commit
    #[error("Failed to commit storage transaction: {0}")]
    Commit(#[source] StorageError),
}

impl Classify for ConfiguratorError {
    fn class(&self) -> ErrorClass {
        match self {
            ConfiguratorError::TransactionOpen(_) => ErrorClass::Unavailable,
            ConfiguratorError::Validation { source, .. } => source.class(),
            ConfiguratorError::Storage(source) => source.class(),
            ConfiguratorError::UnrecognizedWrite(_) => ErrorClass::InvalidArgument,
            ConfiguratorError::Commit(_) => ErrorClass::Aborted,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ConfiguratorError::TransactionOpen(_) => codes::transaction::OPEN_FAILED,
            ConfiguratorError::Validation { source, .. } => source.code(),
            ConfiguratorError::Storage(source) => source.code(),
            ConfiguratorError::UnrecognizedWrite(_) => codes::argument::UNRECOGNIZED_WRITE,
            ConfiguratorError::Commit(_) => codes::transaction::COMMIT_FAILED,
        }
    }
}

impl From<ConfiguratorError> for tonic::Status {
    fn from(error: ConfiguratorError) -> Self {
        to_status(&error)
    }
}

pub type Result<T> = std::result::Result<T, ConfiguratorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use configurator_serde::Domain;
    use tonic::Code;

    #[test]
    fn test_status_mapping() {
        let validation = ConfiguratorError::Validation {
            index: 1,
            source: SerdeError::UnknownType {
                domain: Domain::new("configurator_entity_configs"),
                type_tag: "cfg".to_string(),
                known: String::new(),
            },
        };
        let status: tonic::Status = validation.into();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().starts_with("[VALIDATION_1001]"));

        let status: tonic::Status =
            ConfiguratorError::Storage(StorageError::NotFound("entity cfg/e1".into())).into();
        assert_eq!(status.code(), Code::NotFound);

        let status: tonic::Status =
            ConfiguratorError::TransactionOpen(StorageError::Backend("down".into())).into();
        assert_eq!(status.code(), Code::Unavailable);

        let status: tonic::Status =
            ConfiguratorError::Commit(StorageError::Backend("conflict".into())).into();
        assert_eq!(status.code(), Code::Aborted);
        assert!(status.message().starts_with("[TX_4002]"));

        let status: tonic::Status = ConfiguratorError::UnrecognizedWrite("upsert".into()).into();
        assert_eq!(status.code(), Code::InvalidArgument);
    }
}
