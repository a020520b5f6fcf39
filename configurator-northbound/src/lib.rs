//! Northbound configurator for the Configurator Gateway
//!
//! Exposes network and entity configuration CRUD over a transactional storage
//! backend. Every request runs in exactly one storage transaction, and every
//! configuration payload is validated against its schema before it is written.
//!
//! # Request Flow
//!
//! 1. [`TransactionOrchestrator`] opens a transaction, read-only for loads
//! 2. [`ValidationGate`] checks each payload attached to a mutation
//! 3. [`BatchWriteDispatcher`] issues one storage call per write, in order
//! 4. The orchestrator commits on success and rolls back on the first error
//!
//! # Example
//!
//! ```ignore
//! use configurator_northbound::*;
//! use configurator_storage::{InMemoryStorageFactory, Network, RequestContext};
//!
//! let config = config_engine::GatewayConfig::load(None)?;
//! let servicer = NorthboundServicer::from_config(
//!     Arc::new(InMemoryStorageFactory::new()),
//!     Arc::new(registry),
//!     &config,
//! )?;
//!
//! let ctx = RequestContext::new();
//! servicer
//!     .create_networks(&ctx, vec![Network::new("lab").with_config("dns", dns_bytes)])
//!     .await?;
//! ```

pub mod error;
pub mod gate;
pub mod dispatcher;
pub mod orchestrator;
pub mod protocol;
pub mod servicer;

pub use error::*;
pub use gate::*;
pub use dispatcher::*;
pub use orchestrator::*;
pub use protocol::*;
pub use servicer::*;
