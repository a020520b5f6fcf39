//! Configuration payload validation for the Configurator Gateway
//!
//! Network and entity configs are stored as opaque bytes tagged with a type.
//! Before any payload is written, the gateway asks a [`SchemaValidator`]
//! whether the bytes decode as the declared type within the matching domain.
//!
//! # Core Concepts
//!
//! - **Domain**: category of schema (network-level vs entity-level configs)
//! - **Type tag**: the schema a payload claims to conform to
//! - **Serde**: decoder registered for one (domain, type tag) pair
//! - **Registry**: the set of decoders; unknown pairs fail validation
//!
//! # Example
//!
//! ```ignore
//! use configurator_serde::{JsonSerde, RawJsonSerde, SchemaValidator, SerdeDomains, SerdeRegistry};
//!
//! let domains = SerdeDomains::default();
//! let registry = SerdeRegistry::new()
//!     .with(&domains.network, JsonSerde::<DnsConfig>::new("dns"))?
//!     .with(&domains.entity, RawJsonSerde::new("gateway"))?;
//!
//! registry.validate(&domains.network, "dns", br#"{"domain": "lan"}"#)?;
//! ```

pub mod domain;
pub mod decoder;
pub mod registry;
pub mod schema_validator;
pub mod error;

pub use domain::*;
pub use decoder::*;
pub use registry::*;
pub use schema_validator::*;
pub use error::*;
