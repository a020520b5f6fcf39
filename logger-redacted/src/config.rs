// Logger configuration
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionPattern {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG` when set
    pub level: String,
    pub json: bool,
    /// Render configuration payloads as digests instead of their contents
    pub redact_payloads: bool,
    pub custom_patterns: Vec<RedactionPattern>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            redact_payloads: true,
            custom_patterns: Vec::new(),
        }
    }
}
