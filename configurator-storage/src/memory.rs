// In-memory configurator storage backend
use crate::error::{StorageError, StorageResult};
use crate::models::*;
use crate::transaction::{ConfiguratorStorage, RequestContext, StorageFactory, TxOptions};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct StoreState {
    networks: BTreeMap<String, Network>,
    entities: BTreeMap<String, BTreeMap<EntityId, NetworkEntity>>,
}

/// In-memory storage for testing and development.
///
/// Read-write transactions are serialised: each holds the writer lock from
/// open until commit or rollback and works on a private copy of the committed
/// state, published atomically on commit. Read-only transactions read a
/// snapshot taken at open.
#[derive(Clone, Default)]
pub struct InMemoryStorageFactory {
    state: Arc<RwLock<StoreState>>,
    writer: Arc<Mutex<()>>,
}

impl InMemoryStorageFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageFactory for InMemoryStorageFactory {
    async fn start_transaction(
        &self,
        ctx: &RequestContext,
        options: TxOptions,
    ) -> StorageResult<Box<dyn ConfiguratorStorage>> {
        let writer = if options.read_only {
            None
        } else {
            Some(self.writer.clone().lock_owned().await)
        };
        let working = self.state.read().clone();

        debug!(request_id = %ctx.request_id, read_only = options.read_only, "Opened in-memory transaction");

        Ok(Box::new(InMemoryTransaction {
            request_id: ctx.request_id,
            read_only: options.read_only,
            working,
            shared: self.state.clone(),
            writer,
            closed: false,
        }))
    }
}

struct InMemoryTransaction {
    request_id: Uuid,
    read_only: bool,
    working: StoreState,
    shared: Arc<RwLock<StoreState>>,
    writer: Option<OwnedMutexGuard<()>>,
    closed: bool,
}

impl InMemoryTransaction {
    fn ensure_open(&self) -> StorageResult<()> {
        if self.closed {
            return Err(StorageError::TransactionClosed);
        }
        Ok(())
    }

    fn ensure_writable(&self) -> StorageResult<()> {
        self.ensure_open()?;
        if self.read_only {
            return Err(StorageError::ReadOnly);
        }
        Ok(())
    }

    fn network_entities(&self, network_id: &str) -> StorageResult<&BTreeMap<EntityId, NetworkEntity>> {
        self.working
            .entities
            .get(network_id)
            .ok_or_else(|| StorageError::NotFound(format!("network {}", network_id)))
    }

    fn network_entities_mut(
        &mut self,
        network_id: &str,
    ) -> StorageResult<&mut BTreeMap<EntityId, NetworkEntity>> {
        self.working
            .entities
            .get_mut(network_id)
            .ok_or_else(|| StorageError::NotFound(format!("network {}", network_id)))
    }

    fn close(&mut self) {
        self.closed = true;
        self.working = StoreState::default();
        self.writer = None;
    }
}

fn project_network(network: &Network, criteria: &NetworkLoadCriteria) -> Network {
    let mut projected = network.clone();
    if !criteria.load_metadata {
        projected.name.clear();
        projected.description.clear();
    }
    if !criteria.load_configs {
        projected.configs.clear();
    }
    projected
}

fn project_entity(entity: &NetworkEntity, criteria: &EntityLoadCriteria) -> NetworkEntity {
    let mut projected = entity.clone();
    if !criteria.load_metadata {
        projected.name.clear();
        projected.description.clear();
    }
    if !criteria.load_config {
        projected.config.clear();
    }
    projected
}

fn matches_type(network: &Network, type_filter: Option<&String>) -> bool {
    match type_filter {
        Some(t) => network.network_type.as_ref() == Some(t),
        None => true,
    }
}

fn matches_entity(entity: &NetworkEntity, filter: &EntityLoadFilter, ids: &HashSet<&EntityId>) -> bool {
    if let Some(ref t) = filter.type_filter {
        if entity.entity_type != *t {
            return false;
        }
    }
    if let Some(ref k) = filter.key_filter {
        if entity.key != *k {
            return false;
        }
    }
    if let Some(ref p) = filter.physical_id {
        if entity.physical_id.as_ref() != Some(p) {
            return false;
        }
    }
    ids.is_empty() || ids.contains(&entity.id())
}

fn encode_page_token(id: &EntityId) -> StorageResult<String> {
    let raw = serde_json::to_vec(id).map_err(|e| StorageError::Internal(e.into()))?;
    Ok(general_purpose::URL_SAFE_NO_PAD.encode(raw))
}

fn decode_page_token(token: &str) -> StorageResult<EntityId> {
    let invalid = || StorageError::InvalidArgument(format!("malformed page token {}", token));
    let raw = general_purpose::URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| invalid())?;
    serde_json::from_slice(&raw).map_err(|_| invalid())
}

#[async_trait]
impl ConfiguratorStorage for InMemoryTransaction {
    async fn load_networks(
        &self,
        filter: &NetworkLoadFilter,
        criteria: &NetworkLoadCriteria,
    ) -> StorageResult<NetworkLoadResult> {
        self.ensure_open()?;

        let mut result = NetworkLoadResult::default();
        if filter.is_empty() {
            return Ok(result);
        }

        if filter.ids.is_empty() {
            result.networks = self
                .working
                .networks
                .values()
                .filter(|n| matches_type(n, filter.type_filter.as_ref()))
                .map(|n| project_network(n, criteria))
                .collect();
            return Ok(result);
        }

        for id in &filter.ids {
            match self.working.networks.get(id) {
                Some(network) => {
                    if matches_type(network, filter.type_filter.as_ref()) {
                        result.networks.push(project_network(network, criteria));
                    }
                }
                None => result.network_ids_not_found.push(id.clone()),
            }
        }
        Ok(result)
    }

    async fn load_all_networks(&self, criteria: &NetworkLoadCriteria) -> StorageResult<Vec<Network>> {
        self.ensure_open()?;
        Ok(self
            .working
            .networks
            .values()
            .map(|n| project_network(n, criteria))
            .collect())
    }

    async fn create_network(&mut self, mut network: Network) -> StorageResult<Network> {
        self.ensure_writable()?;

        if network.id.trim().is_empty() {
            return Err(StorageError::InvalidArgument("network id must not be empty".to_string()));
        }
        if self.working.networks.contains_key(&network.id) {
            return Err(StorageError::AlreadyExists(format!("network {}", network.id)));
        }

        network.version = 0;
        self.working
            .entities
            .insert(network.id.clone(), BTreeMap::new());
        self.working
            .networks
            .insert(network.id.clone(), network.clone());
        Ok(network)
    }

    async fn update_networks(&mut self, updates: Vec<NetworkUpdateCriteria>) -> StorageResult<()> {
        self.ensure_writable()?;

        for update in updates {
            if !self.working.networks.contains_key(&update.id) {
                return Err(StorageError::NotFound(format!("network {}", update.id)));
            }

            if update.delete_network {
                self.working.networks.remove(&update.id);
                self.working.entities.remove(&update.id);
                continue;
            }

            let network = self
                .working
                .networks
                .get_mut(&update.id)
                .ok_or_else(|| StorageError::NotFound(format!("network {}", update.id)))?;
            if let Some(name) = update.new_name {
                network.name = name;
            }
            if let Some(description) = update.new_description {
                network.description = description;
            }
            if let Some(network_type) = update.new_type {
                network.network_type = Some(network_type);
            }
            network.configs.extend(update.configs_to_add_or_update);
            for type_tag in &update.configs_to_delete {
                network.configs.remove(type_tag);
            }
            network.version += 1;
        }
        Ok(())
    }

    async fn load_entities(
        &self,
        network_id: &str,
        filter: &EntityLoadFilter,
        criteria: &EntityLoadCriteria,
    ) -> StorageResult<EntityLoadResult> {
        self.ensure_open()?;
        let entities = self.network_entities(network_id)?;

        let requested: HashSet<&EntityId> = filter.entity_ids.iter().collect();
        let after = criteria
            .page_token
            .as_deref()
            .map(decode_page_token)
            .transpose()?;

        let mut matching = entities
            .iter()
            .filter(|(id, _)| after.as_ref().map_or(true, |last| *id > last))
            .filter(|(_, entity)| matches_entity(entity, filter, &requested))
            .map(|(_, entity)| entity);

        let mut result = EntityLoadResult::default();
        if criteria.page_size == 0 {
            result.entities = matching.map(|e| project_entity(e, criteria)).collect();
        } else {
            let page_size = criteria.page_size as usize;
            result.entities = matching
                .by_ref()
                .take(page_size)
                .map(|e| project_entity(e, criteria))
                .collect();
            if matching.next().is_some() {
                if let Some(last) = result.entities.last() {
                    result.next_page_token = Some(encode_page_token(&last.id())?);
                }
            }
        }

        result.entities_not_found = filter
            .entity_ids
            .iter()
            .filter(|id| !entities.contains_key(*id))
            .cloned()
            .collect();
        Ok(result)
    }

    async fn create_entity(
        &mut self,
        network_id: &str,
        mut entity: NetworkEntity,
    ) -> StorageResult<NetworkEntity> {
        self.ensure_writable()?;

        if entity.entity_type.trim().is_empty() || entity.key.trim().is_empty() {
            return Err(StorageError::InvalidArgument(
                "entity type and key must not be empty".to_string(),
            ));
        }

        let entities = self.network_entities_mut(network_id)?;
        let id = entity.id();
        if entities.contains_key(&id) {
            return Err(StorageError::AlreadyExists(format!(
                "entity {} in network {}",
                id, network_id
            )));
        }

        entity.network_id = network_id.to_string();
        entity.version = 0;
        entities.insert(id, entity.clone());
        Ok(entity)
    }

    async fn update_entity(
        &mut self,
        network_id: &str,
        update: EntityUpdateCriteria,
    ) -> StorageResult<NetworkEntity> {
        self.ensure_writable()?;

        let entities = self.network_entities_mut(network_id)?;
        let id = update.id();
        let not_found = || StorageError::NotFound(format!("entity {} in network {}", id, network_id));

        if update.delete_entity {
            entities.remove(&id).ok_or_else(not_found)?;
            return Ok(NetworkEntity {
                network_id: network_id.to_string(),
                entity_type: update.entity_type,
                key: update.key,
                ..Default::default()
            });
        }

        let entity = entities.get_mut(&id).ok_or_else(not_found)?;
        if let Some(name) = update.new_name {
            entity.name = name;
        }
        if let Some(description) = update.new_description {
            entity.description = description;
        }
        if let Some(physical_id) = update.new_physical_id {
            entity.physical_id = Some(physical_id);
        }
        if let Some(config) = update.new_config {
            entity.config = config;
        }
        entity.version += 1;
        Ok(entity.clone())
    }

    async fn commit(&mut self) -> StorageResult<()> {
        self.ensure_open()?;
        if !self.read_only {
            let working = std::mem::take(&mut self.working);
            *self.shared.write() = working;
        }
        debug!(request_id = %self.request_id, "Committed in-memory transaction");
        self.close();
        Ok(())
    }

    async fn rollback(&mut self) -> StorageResult<()> {
        self.ensure_open()?;
        debug!(request_id = %self.request_id, "Rolled back in-memory transaction");
        self.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_commit_publishes_and_rollback_discards() {
        let factory = InMemoryStorageFactory::new();
        let ctx = RequestContext::new();

        let mut tx = factory.start_transaction(&ctx, TxOptions::read_write()).await.unwrap();
        tx.create_network(Network::new("n1")).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = factory.start_transaction(&ctx, TxOptions::read_write()).await.unwrap();
        tx.create_network(Network::new("n2")).await.unwrap();
        tx.rollback().await.unwrap();

        let tx = factory.start_transaction(&ctx, TxOptions::read_only()).await.unwrap();
        let networks = tx.load_all_networks(&NetworkLoadCriteria::full()).await.unwrap();
        let ids: Vec<&str> = networks.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n1"]);
    }

    #[tokio::test]
    async fn test_closed_transaction_rejects_calls() {
        let factory = InMemoryStorageFactory::new();
        let mut tx = factory
            .start_transaction(&RequestContext::new(), TxOptions::read_write())
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert!(matches!(tx.commit().await, Err(StorageError::TransactionClosed)));
        assert!(matches!(tx.rollback().await, Err(StorageError::TransactionClosed)));
        assert!(matches!(
            tx.create_network(Network::new("n1")).await,
            Err(StorageError::TransactionClosed)
        ));
    }

    #[test]
    fn test_page_token_round_trip() {
        let id = EntityId::new("gateway", "gw/1");
        let token = encode_page_token(&id).unwrap();
        assert_eq!(decode_page_token(&token).unwrap(), id);
        assert!(matches!(
            decode_page_token("not a token"),
            Err(StorageError::InvalidArgument(_))
        ));
    }
}
