use crate::error::{Result, SerdeError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_NETWORK_DOMAIN: &str = "configurator_network_configs";
pub const DEFAULT_ENTITY_DOMAIN: &str = "configurator_entity_configs";

/// Named category of configuration schema
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Domain {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The two schema domains the gateway validates against.
///
/// Loaded once from configuration and handed to whoever validates payloads;
/// there is no process-wide registry of domain names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerdeDomains {
    /// Domain for network-level configs, keyed by config type
    pub network: Domain,
    /// Domain for entity configs, keyed by entity type
    pub entity: Domain,
}

impl Default for SerdeDomains {
    fn default() -> Self {
        Self {
            network: Domain::new(DEFAULT_NETWORK_DOMAIN),
            entity: Domain::new(DEFAULT_ENTITY_DOMAIN),
        }
    }
}

impl SerdeDomains {
    pub fn new(network: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            network: Domain::new(network),
            entity: Domain::new(entity),
        }
    }

    /// Both domains must be named and distinct
    pub fn check(&self) -> Result<()> {
        if self.network.as_str().trim().is_empty() || self.entity.as_str().trim().is_empty() {
            return Err(SerdeError::InvalidDomains("domain names must not be empty".to_string()));
        }
        if self.network == self.entity {
            return Err(SerdeError::InvalidDomains(format!(
                "network and entity domains are both {}",
                self.network
            )));
        }
        Ok(())
    }
}
