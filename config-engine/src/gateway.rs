// Gateway configuration and its layered sources
use crate::error::{ConfigError, Result};
use configurator_serde::SerdeDomains;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Prefix of environment overrides, e.g. `CONFIGURATOR_LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "CONFIGURATOR_";

/// Separates nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Schema domains for network-level and entity configs
    pub serde_domains: SerdeDomains,
    pub logging: LoggerConfig,
}

impl GatewayConfig {
    /// Sources in increasing priority: defaults, then `path` if given, then
    /// the environment.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(GatewayConfig::default()));

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                Some("toml") => figment.merge(Toml::file(path)),
                _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
            };
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR)))
    }

    /// Load and check the gateway configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: GatewayConfig = Self::figment(path)?.extract()?;
        config.serde_domains.check()?;

        debug!(
            network_domain = %config.serde_domains.network,
            entity_domain = %config.serde_domains.entity,
            log_level = %config.logging.level,
            "Loaded gateway configuration"
        );
        Ok(config)
    }
}
