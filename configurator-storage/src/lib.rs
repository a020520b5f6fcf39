//! Transactional storage layer for the Configurator Gateway
//!
//! This crate defines what the gateway expects from a storage backend and
//! ships an in-memory backend that honours those expectations:
//!
//! - **Data Model**: networks with per-type configs, entities keyed by
//!   (type, key) within a network, and the update criteria that mutate them
//! - **Transactions**: [`StorageFactory`] opens read-only or read-write
//!   [`ConfiguratorStorage`] transactions, each ending in exactly one of
//!   `commit` or `rollback`
//! - **In-memory Backend**: serialised writers, snapshot readers, atomic
//!   publish on commit
//!
//! How a production backend stores rows, indexes them or isolates concurrent
//! writers is its own business; the gateway only sequences calls.
//!
//! # Example
//!
//! ```ignore
//! use configurator_storage::*;
//!
//! let factory = InMemoryStorageFactory::new();
//! let ctx = RequestContext::new();
//!
//! let mut tx = factory.start_transaction(&ctx, TxOptions::read_write()).await?;
//! tx.create_network(Network::new("lab").with_config("dns", br#"{}"#.to_vec())).await?;
//! tx.create_entity("lab", NetworkEntity::new("gateway", "gw1")).await?;
//! tx.commit().await?;
//!
//! let tx = factory.start_transaction(&ctx, TxOptions::read_only()).await?;
//! let loaded = tx
//!     .load_networks(&NetworkLoadFilter::ids(["lab"]), &NetworkLoadCriteria::full())
//!     .await?;
//! ```

pub mod models;
pub mod transaction;
pub mod memory;
pub mod error;

pub use models::*;
pub use transaction::*;
pub use memory::*;
pub use error::*;
