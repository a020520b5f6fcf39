//! Configuration for the Configurator Gateway
//!
//! Settings are layered with `figment`, later sources overriding earlier ones:
//! - compiled defaults
//! - an optional YAML or TOML file
//! - `CONFIGURATOR_`-prefixed environment variables, `__` separating nested keys
//!
//! # Example
//!
//! ```ignore
//! use config_engine::GatewayConfig;
//! use std::path::Path;
//!
//! // CONFIGURATOR_SERDE_DOMAINS__ENTITY=lab_entity_configs overrides the file
//! let config = GatewayConfig::load(Some(Path::new("gateway.yaml")))?;
//! logger_redacted::init(&config.logging)?;
//! ```

pub mod gateway;
pub mod error;

pub use gateway::*;
pub use error::*;
