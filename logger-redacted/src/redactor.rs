use crate::config::LoggerConfig;
use crate::error::{LoggerError, Result};
use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    static ref IP_REGEX: Regex = Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").unwrap();
}

const PREVIEW_LIMIT: usize = 64;

/// Redaction settings compiled from [`LoggerConfig`]
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_payloads: bool,
    pub redact_emails: bool,
    pub redact_ip_addresses: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_payloads: true,
            redact_emails: true,
            redact_ip_addresses: true,
            custom_patterns: Vec::new(),
        }
    }
}

impl RedactionConfig {
    pub fn from_logger_config(config: &LoggerConfig) -> Result<Self> {
        let custom_patterns = config
            .custom_patterns
            .iter()
            .map(|p| {
                Regex::new(&p.pattern)
                    .map(|re| (re, p.replacement.clone()))
                    .map_err(|e| LoggerError::InvalidPattern(format!("{}: {}", p.pattern, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            redact_payloads: config.redact_payloads,
            custom_patterns,
            ..Default::default()
        })
    }
}

/// Keeps configuration payloads and addresses out of log output.
///
/// Payloads are opaque bytes that may carry credentials; they are logged as a
/// length plus a short SHA-256 digest, which is enough to correlate two log
/// lines that saw the same payload.
#[derive(Debug, Clone, Default)]
pub struct PayloadRedactor {
    config: RedactionConfig,
}

impl PayloadRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn from_logger_config(config: &LoggerConfig) -> Result<Self> {
        Ok(Self::new(RedactionConfig::from_logger_config(config)?))
    }

    /// Render a payload for a log field
    pub fn summarize(&self, payload: &[u8]) -> String {
        if self.config.redact_payloads {
            return format!("len={} sha256={}", payload.len(), digest(payload));
        }

        let text = String::from_utf8_lossy(payload);
        if text.chars().count() > PREVIEW_LIMIT {
            let preview: String = text.chars().take(PREVIEW_LIMIT).collect();
            format!("{}...", self.redact_text(&preview))
        } else {
            self.redact_text(&text)
        }
    }

    /// Scrub addresses and custom patterns from a free-form message
    pub fn redact_text(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_emails {
            result = EMAIL_REGEX
                .replace_all(&result, |caps: &regex::Captures| {
                    format!("EMAIL[{}]", digest(caps[0].as_bytes()))
                })
                .to_string();
        }

        if self.config.redact_ip_addresses {
            result = IP_REGEX
                .replace_all(&result, |caps: &regex::Captures| {
                    format!("IP[{}]", digest(caps[0].as_bytes()))
                })
                .to_string();
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }
}

fn digest(value: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value);
    let result = hasher.finalize();
    general_purpose::STANDARD.encode(&result[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedactionPattern;

    #[test]
    fn test_payload_is_digested() {
        let redactor = PayloadRedactor::default();
        let summary = redactor.summarize(br#"{"secret":"hunter2"}"#);

        assert!(summary.starts_with("len=20 sha256="));
        assert!(!summary.contains("hunter2"));
        assert_eq!(summary, redactor.summarize(br#"{"secret":"hunter2"}"#));
    }

    #[test]
    fn test_payload_preview_when_redaction_disabled() {
        let redactor = PayloadRedactor::new(RedactionConfig {
            redact_payloads: false,
            ..Default::default()
        });

        let summary = redactor.summarize(br#"{"gateway":"10.0.0.1"}"#);
        assert!(summary.starts_with(r#"{"gateway":"IP["#));
        assert!(!summary.contains("10.0.0.1"));

        let long = vec![b'a'; 200];
        assert!(redactor.summarize(&long).ends_with("..."));
    }

    #[test]
    fn test_custom_patterns() {
        let config = LoggerConfig {
            custom_patterns: vec![RedactionPattern {
                pattern: r"psk=\w+".to_string(),
                replacement: "psk=[REDACTED]".to_string(),
            }],
            ..Default::default()
        };
        let redactor = PayloadRedactor::from_logger_config(&config).unwrap();

        assert_eq!(redactor.redact_text("wifi psk=abc123 set"), "wifi psk=[REDACTED] set");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let config = LoggerConfig {
            custom_patterns: vec![RedactionPattern {
                pattern: "(".to_string(),
                replacement: String::new(),
            }],
            ..Default::default()
        };

        assert!(matches!(
            PayloadRedactor::from_logger_config(&config),
            Err(LoggerError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_email_redaction() {
        let redactor = PayloadRedactor::default();
        let redacted = redactor.redact_text("owner ops@example.com");
        assert!(redacted.starts_with("owner EMAIL["));
    }
}
