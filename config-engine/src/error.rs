use configurator_serde::SerdeError;
use error_common::{codes, Classify, ErrorClass};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Configuration parsing failed: {0}")]
    Extract(#[source] Box<figment::Error>),

    #[error("Configuration validation failed: {0}")]
    InvalidDomains(#[from] SerdeError),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Extract(Box::new(error))
    }
}

impl Classify for ConfigError {
    fn class(&self) -> ErrorClass {
        ErrorClass::Internal
    }

    fn code(&self) -> &'static str {
        codes::config::INVALID_CONFIG
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
