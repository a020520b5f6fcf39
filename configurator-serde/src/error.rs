use crate::domain::Domain;
use error_common::{codes, Classify, ErrorClass};
use thiserror::Error;

/// Failure reported by a single [`crate::Serde`] decoder
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum SerdeError {
    #[error("No serde registered for type {type_tag} in domain {domain} (registered: {known})")]
    UnknownType {
        domain: Domain,
        type_tag: String,
        /// Comma-separated type tags the domain does have
        known: String,
    },

    #[error("Malformed {type_tag} payload in domain {domain}: {source}")]
    Malformed {
        domain: Domain,
        type_tag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{type_tag} payload in domain {domain} rejected: {reason}")]
    Rejected {
        domain: Domain,
        type_tag: String,
        reason: String,
    },

    #[error("Serde for type {type_tag} already registered in domain {domain}")]
    DuplicateRegistration { domain: Domain, type_tag: String },

    #[error("Invalid serde domains: {0}")]
    InvalidDomains(String),
}

impl SerdeError {
    pub(crate) fn from_payload(domain: &Domain, type_tag: &str, error: PayloadError) -> Self {
        match error {
            PayloadError::Malformed(source) => SerdeError::Malformed {
                domain: domain.clone(),
                type_tag: type_tag.to_string(),
                source,
            },
            PayloadError::Rejected(reason) => SerdeError::Rejected {
                domain: domain.clone(),
                type_tag: type_tag.to_string(),
                reason,
            },
        }
    }

    /// Type tag of the payload that failed, when the error concerns one
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            SerdeError::UnknownType { type_tag, .. }
            | SerdeError::Malformed { type_tag, .. }
            | SerdeError::Rejected { type_tag, .. }
            | SerdeError::DuplicateRegistration { type_tag, .. } => Some(type_tag),
            SerdeError::InvalidDomains(_) => None,
        }
    }
}

impl Classify for SerdeError {
    fn class(&self) -> ErrorClass {
        match self {
            SerdeError::UnknownType { .. }
            | SerdeError::Malformed { .. }
            | SerdeError::Rejected { .. } => ErrorClass::InvalidArgument,
            SerdeError::DuplicateRegistration { .. } | SerdeError::InvalidDomains(_) => {
                ErrorClass::Internal
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            SerdeError::UnknownType { .. } => codes::validation::UNKNOWN_CONFIG_TYPE,
            SerdeError::Malformed { .. } => codes::validation::MALFORMED_PAYLOAD,
            SerdeError::Rejected { .. } => codes::validation::PAYLOAD_REJECTED,
            SerdeError::DuplicateRegistration { .. } | SerdeError::InvalidDomains(_) => {
                codes::config::INVALID_CONFIG
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SerdeError>;
