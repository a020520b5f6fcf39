// Batch write dispatch against one open read-write transaction
use crate::error::{ConfiguratorError, Result};
use crate::gate::ValidationGate;
use configurator_storage::{
    ConfiguratorStorage, EntityId, EntityUpdateCriteria, Network, NetworkEntity,
    NetworkUpdateCriteria,
};
use error_common::{log_error, ErrorContext};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// One network mutation within a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkWrite {
    Create(Network),
    Update(NetworkUpdateCriteria),
    Delete(String),
}

impl NetworkWrite {
    fn kind(&self) -> &'static str {
        match self {
            NetworkWrite::Create(_) => "create",
            NetworkWrite::Update(_) => "update",
            NetworkWrite::Delete(_) => "delete",
        }
    }

    fn network_id(&self) -> &str {
        match self {
            NetworkWrite::Create(network) => &network.id,
            NetworkWrite::Update(update) => &update.id,
            NetworkWrite::Delete(id) => id,
        }
    }
}

/// One entity mutation within a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityWrite {
    Create(NetworkEntity),
    Update(EntityUpdateCriteria),
    Delete(EntityId),
    /// Carries the tag the client sent
    Unrecognized(String),
}

impl EntityWrite {
    fn kind(&self) -> &'static str {
        match self {
            EntityWrite::Create(_) => "create",
            EntityWrite::Update(_) => "update",
            EntityWrite::Delete(_) => "delete",
            EntityWrite::Unrecognized(_) => "unrecognized",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkWriteResult {
    /// Created networks in input order
    pub created: Vec<Network>,
    /// Ids of networks an update was applied to
    pub updated: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityWriteResult {
    /// Created entities in input order
    pub created: Vec<NetworkEntity>,
    /// Latest state per updated entity; a later update of the same id wins
    pub updated: HashMap<EntityId, NetworkEntity>,
}

/// Resolves each write of a batch to its storage call.
///
/// Items run strictly in input order, one storage call each. The first failure
/// is logged against `ctx` with its batch index, aborts the batch and is
/// returned; results gathered so far are discarded since the caller rolls the
/// transaction back.
#[derive(Debug, Clone)]
pub struct BatchWriteDispatcher {
    gate: ValidationGate,
}

impl BatchWriteDispatcher {
    pub fn new(gate: ValidationGate) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &ValidationGate {
        &self.gate
    }

    pub async fn dispatch_networks(
        &self,
        store: &mut dyn ConfiguratorStorage,
        ctx: &ErrorContext,
        writes: Vec<NetworkWrite>,
    ) -> Result<NetworkWriteResult> {
        let mut result = NetworkWriteResult::default();

        for (index, write) in writes.into_iter().enumerate() {
            let network_id = write.network_id().to_string();
            debug!(network_id = %network_id, index, kind = write.kind(), "Dispatching network write");

            let applied = self.apply_network_write(store, index, write, &mut result).await;
            if let Err(error) = applied {
                let failed = ctx.clone().with_network_id(network_id).with_batch_index(index);
                log_error(&failed, &error);
                return Err(error);
            }
        }

        Ok(result)
    }

    async fn apply_network_write(
        &self,
        store: &mut dyn ConfiguratorStorage,
        index: usize,
        write: NetworkWrite,
        result: &mut NetworkWriteResult,
    ) -> Result<()> {
        match write {
            NetworkWrite::Create(network) => {
                self.gate
                    .check_network(&network)
                    .map_err(|source| ConfiguratorError::Validation { index, source })?;
                let created = store.create_network(network).await?;
                result.created.push(created);
            }
            NetworkWrite::Update(update) => {
                self.gate
                    .check_network_update(&update)
                    .map_err(|source| ConfiguratorError::Validation { index, source })?;
                let id = update.id.clone();
                store.update_networks(vec![update]).await?;
                result.updated.insert(id);
            }
            NetworkWrite::Delete(id) => {
                store
                    .update_networks(vec![NetworkUpdateCriteria::delete(id)])
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn dispatch_entities(
        &self,
        store: &mut dyn ConfiguratorStorage,
        ctx: &ErrorContext,
        network_id: &str,
        writes: Vec<EntityWrite>,
    ) -> Result<EntityWriteResult> {
        let mut result = EntityWriteResult::default();

        for (index, write) in writes.into_iter().enumerate() {
            debug!(network_id, index, kind = write.kind(), "Dispatching entity write");

            let applied = self
                .apply_entity_write(store, network_id, index, write, &mut result)
                .await;
            if let Err(error) = applied {
                let failed = ctx.clone().with_network_id(network_id).with_batch_index(index);
                log_error(&failed, &error);
                return Err(error);
            }
        }

        Ok(result)
    }

    async fn apply_entity_write(
        &self,
        store: &mut dyn ConfiguratorStorage,
        network_id: &str,
        index: usize,
        write: EntityWrite,
        result: &mut EntityWriteResult,
    ) -> Result<()> {
        match write {
            EntityWrite::Create(entity) => {
                self.gate
                    .check_entity(&entity)
                    .map_err(|source| ConfiguratorError::Validation { index, source })?;
                let created = store.create_entity(network_id, entity).await?;
                result.created.push(created);
            }
            EntityWrite::Update(update) => {
                self.gate
                    .check_entity_update(&update)
                    .map_err(|source| ConfiguratorError::Validation { index, source })?;
                let id = update.id();
                let updated = store.update_entity(network_id, update).await?;
                result.updated.insert(id, updated);
            }
            EntityWrite::Delete(id) => {
                store
                    .update_entity(network_id, EntityUpdateCriteria::delete(&id))
                    .await?;
            }
            EntityWrite::Unrecognized(tag) => {
                return Err(ConfiguratorError::UnrecognizedWrite(tag));
            }
        }
        Ok(())
    }
}
