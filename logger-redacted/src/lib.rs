pub mod redactor;
pub mod config;
pub mod error;

pub use redactor::*;
pub use config::*;
pub use error::*;

use tracing_subscriber::EnvFilter;

/// Logging for the Configurator Gateway with configuration payload redaction
///
/// Network and entity configuration payloads are opaque to the gateway and may
/// contain credentials, so they never reach log output verbatim. Components log
/// through `tracing` and render payloads with [`PayloadRedactor`].
///
/// # Key Features
///
/// - **Payload Digests**: payloads are logged as `len=N sha256=...`
/// - **Hash-based Correlation**: identical payloads produce identical digests
/// - **Address Scrubbing**: IP and email addresses in messages are hashed
/// - **Custom Patterns**: configurable regex replacements
/// - **Structured Logging**: plain or JSON output via `tracing-subscriber`
///
/// # Example
///
/// ```ignore
/// use logger_redacted::{LoggerConfig, PayloadRedactor};
///
/// let config = LoggerConfig::default();
/// logger_redacted::init(&config)?;
///
/// let redactor = PayloadRedactor::from_logger_config(&config)?;
/// tracing::debug!(payload = %redactor.summarize(b"{}"), "validating config");
/// ```
pub fn init(config: &LoggerConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| LoggerError::InvalidFilter(format!("{}: {}", config.level, e)))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}
