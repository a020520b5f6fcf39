// Storage transaction contracts
use crate::error::StorageResult;
use crate::models::*;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-request context handed to the storage factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub request_id: Uuid,
    /// Caller identity as reported by the transport, if any
    pub caller: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            caller: None,
        }
    }

    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxOptions {
    pub read_only: bool,
}

impl TxOptions {
    pub fn read_only() -> Self {
        Self { read_only: true }
    }

    pub fn read_write() -> Self {
        Self { read_only: false }
    }
}

/// One open storage transaction.
///
/// Owned by the request that opened it. After `commit` or `rollback` every
/// further call fails with [`crate::StorageError::TransactionClosed`].
#[async_trait]
pub trait ConfiguratorStorage: Send + Sync {
    async fn load_networks(
        &self,
        filter: &NetworkLoadFilter,
        criteria: &NetworkLoadCriteria,
    ) -> StorageResult<NetworkLoadResult>;

    async fn load_all_networks(&self, criteria: &NetworkLoadCriteria) -> StorageResult<Vec<Network>>;

    async fn create_network(&mut self, network: Network) -> StorageResult<Network>;

    async fn update_networks(&mut self, updates: Vec<NetworkUpdateCriteria>) -> StorageResult<()>;

    async fn load_entities(
        &self,
        network_id: &str,
        filter: &EntityLoadFilter,
        criteria: &EntityLoadCriteria,
    ) -> StorageResult<EntityLoadResult>;

    async fn create_entity(
        &mut self,
        network_id: &str,
        entity: NetworkEntity,
    ) -> StorageResult<NetworkEntity>;

    async fn update_entity(
        &mut self,
        network_id: &str,
        update: EntityUpdateCriteria,
    ) -> StorageResult<NetworkEntity>;

    async fn commit(&mut self) -> StorageResult<()>;

    async fn rollback(&mut self) -> StorageResult<()>;
}

/// Opens storage transactions
#[async_trait]
pub trait StorageFactory: Send + Sync {
    async fn start_transaction(
        &self,
        ctx: &RequestContext,
        options: TxOptions,
    ) -> StorageResult<Box<dyn ConfiguratorStorage>>;
}
