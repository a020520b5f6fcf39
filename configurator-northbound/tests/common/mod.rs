//! Shared fixtures for northbound tests
//!
//! [`FaultyFactory`] wraps the in-memory backend, counts transaction lifecycle
//! calls and injects failures at chosen points.

#![allow(dead_code)]

use async_trait::async_trait;
use configurator_northbound::NorthboundServicer;
use configurator_serde::{JsonSerde, RawJsonSerde, SerdeDomains, SerdeRegistry};
use configurator_storage::*;
use parking_lot::Mutex;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use validator::Validate;

/// Network-level DNS settings
#[derive(Debug, Deserialize, Validate)]
pub struct DnsConfig {
    #[validate(length(min = 1))]
    pub domain: String,
    #[serde(default)]
    pub enable_caching: bool,
}

/// Entity config for the "cfg" type
#[derive(Debug, Deserialize, Validate)]
pub struct CheckinConfig {
    #[validate(range(min = 1, max = 3600))]
    pub checkin_interval: u32,
}

pub const VALID_CFG: &[u8] = br#"{"checkin_interval": 60}"#;
pub const VALID_CFG_2: &[u8] = br#"{"checkin_interval": 120}"#;
pub const INVALID_CFG: &[u8] = br#"{"checkin_interval": 0}"#;
pub const VALID_DNS: &[u8] = br#"{"domain": "lab.example"}"#;

pub fn registry(domains: &SerdeDomains) -> SerdeRegistry {
    SerdeRegistry::new()
        .with(&domains.network, JsonSerde::<DnsConfig>::new("dns"))
        .unwrap()
        .with(&domains.network, RawJsonSerde::new("features"))
        .unwrap()
        .with(&domains.entity, JsonSerde::<CheckinConfig>::new("cfg"))
        .unwrap()
        .with(&domains.entity, RawJsonSerde::new("tier"))
        .unwrap()
}

#[derive(Debug, Default)]
pub struct Counters {
    pub opens: AtomicUsize,
    pub commits: AtomicUsize,
    pub rollbacks: AtomicUsize,
    /// Read-only flag of every opened transaction, in order
    pub modes: Mutex<Vec<bool>>,
    /// Mutating storage calls, in order, e.g. `create_entity cfg/e1`
    pub calls: Mutex<Vec<String>>,
}

impl Counters {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn modes(&self) -> Vec<bool> {
        self.modes.lock().clone()
    }
}

#[derive(Debug, Default)]
pub struct Faults {
    pub fail_open: AtomicBool,
    pub fail_commit: AtomicBool,
    pub fail_rollback: AtomicBool,
    /// Zero-based index of the mutating call that fails, counted per transaction
    pub fail_call: Mutex<Option<usize>>,
}

#[derive(Clone, Default)]
pub struct FaultyFactory {
    pub inner: InMemoryStorageFactory,
    pub counters: Arc<Counters>,
    pub faults: Arc<Faults>,
}

impl FaultyFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_open(&self) {
        self.faults.fail_open.store(true, Ordering::SeqCst);
    }

    pub fn fail_commit(&self) {
        self.faults.fail_commit.store(true, Ordering::SeqCst);
    }

    pub fn fail_rollback(&self) {
        self.faults.fail_rollback.store(true, Ordering::SeqCst);
    }

    pub fn fail_call(&self, index: usize) {
        *self.faults.fail_call.lock() = Some(index);
    }

    pub fn clear_faults(&self) {
        self.faults.fail_open.store(false, Ordering::SeqCst);
        self.faults.fail_commit.store(false, Ordering::SeqCst);
        self.faults.fail_rollback.store(false, Ordering::SeqCst);
        *self.faults.fail_call.lock() = None;
    }
}

#[async_trait]
impl StorageFactory for FaultyFactory {
    async fn start_transaction(
        &self,
        ctx: &RequestContext,
        options: TxOptions,
    ) -> StorageResult<Box<dyn ConfiguratorStorage>> {
        if self.faults.fail_open.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("connection refused".to_string()));
        }
        let inner = self.inner.start_transaction(ctx, options).await?;
        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        self.counters.modes.lock().push(options.read_only);

        Ok(Box::new(FaultyTransaction {
            inner,
            counters: self.counters.clone(),
            faults: self.faults.clone(),
            mutations: 0,
        }))
    }
}

struct FaultyTransaction {
    inner: Box<dyn ConfiguratorStorage>,
    counters: Arc<Counters>,
    faults: Arc<Faults>,
    mutations: usize,
}

impl FaultyTransaction {
    fn record(&mut self, call: String) -> StorageResult<()> {
        let index = self.mutations;
        self.mutations += 1;
        self.counters.calls.lock().push(call);
        if *self.faults.fail_call.lock() == Some(index) {
            return Err(StorageError::Backend(format!("injected failure at call {}", index)));
        }
        Ok(())
    }
}

#[async_trait]
impl ConfiguratorStorage for FaultyTransaction {
    async fn load_networks(
        &self,
        filter: &NetworkLoadFilter,
        criteria: &NetworkLoadCriteria,
    ) -> StorageResult<NetworkLoadResult> {
        self.inner.load_networks(filter, criteria).await
    }

    async fn load_all_networks(&self, criteria: &NetworkLoadCriteria) -> StorageResult<Vec<Network>> {
        self.inner.load_all_networks(criteria).await
    }

    async fn create_network(&mut self, network: Network) -> StorageResult<Network> {
        self.record(format!("create_network {}", network.id))?;
        self.inner.create_network(network).await
    }

    async fn update_networks(&mut self, updates: Vec<NetworkUpdateCriteria>) -> StorageResult<()> {
        let ids: Vec<&str> = updates.iter().map(|u| u.id.as_str()).collect();
        self.record(format!("update_networks {}", ids.join(",")))?;
        self.inner.update_networks(updates).await
    }

    async fn load_entities(
        &self,
        network_id: &str,
        filter: &EntityLoadFilter,
        criteria: &EntityLoadCriteria,
    ) -> StorageResult<EntityLoadResult> {
        self.inner.load_entities(network_id, filter, criteria).await
    }

    async fn create_entity(
        &mut self,
        network_id: &str,
        entity: NetworkEntity,
    ) -> StorageResult<NetworkEntity> {
        self.record(format!("create_entity {}", entity.id()))?;
        self.inner.create_entity(network_id, entity).await
    }

    async fn update_entity(
        &mut self,
        network_id: &str,
        update: EntityUpdateCriteria,
    ) -> StorageResult<NetworkEntity> {
        self.record(format!("update_entity {}", update.id()))?;
        self.inner.update_entity(network_id, update).await
    }

    async fn commit(&mut self) -> StorageResult<()> {
        self.counters.commits.fetch_add(1, Ordering::SeqCst);
        if self.faults.fail_commit.load(Ordering::SeqCst) {
            self.inner.rollback().await?;
            return Err(StorageError::Backend("serialization failure".to_string()));
        }
        self.inner.commit().await
    }

    async fn rollback(&mut self) -> StorageResult<()> {
        self.counters.rollbacks.fetch_add(1, Ordering::SeqCst);
        self.inner.rollback().await?;
        if self.faults.fail_rollback.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("connection reset".to_string()));
        }
        Ok(())
    }
}

pub struct Harness {
    pub factory: FaultyFactory,
    pub servicer: NorthboundServicer,
    pub ctx: RequestContext,
}

impl Harness {
    pub fn new() -> Self {
        let factory = FaultyFactory::new();
        let domains = SerdeDomains::default();
        let servicer = NorthboundServicer::new(
            Arc::new(factory.clone()),
            Arc::new(registry(&domains)),
            domains,
        );
        Self {
            factory,
            servicer,
            ctx: RequestContext::new().with_caller("test"),
        }
    }

    pub fn counters(&self) -> &Counters {
        &self.factory.counters
    }

    /// Seed networks and entities directly, bypassing the servicer and counters
    pub async fn seed(&self, networks: Vec<Network>, network_id: &str, entities: Vec<NetworkEntity>) {
        let mut tx = self
            .factory
            .inner
            .start_transaction(&RequestContext::new(), TxOptions::read_write())
            .await
            .unwrap();
        for network in networks {
            tx.create_network(network).await.unwrap();
        }
        for entity in entities {
            tx.create_entity(network_id, entity).await.unwrap();
        }
        tx.commit().await.unwrap();
    }

    /// Committed entity state, read directly from the backend
    pub async fn stored_entity(&self, network_id: &str, id: &EntityId) -> Option<NetworkEntity> {
        let tx = self
            .factory
            .inner
            .start_transaction(&RequestContext::new(), TxOptions::read_only())
            .await
            .unwrap();
        let result = tx
            .load_entities(network_id, &EntityLoadFilter::ids(vec![id.clone()]), &EntityLoadCriteria::full())
            .await
            .unwrap();
        result.entities.into_iter().next()
    }

    pub async fn stored_network(&self, network_id: &str) -> Option<Network> {
        let tx = self
            .factory
            .inner
            .start_transaction(&RequestContext::new(), TxOptions::read_only())
            .await
            .unwrap();
        let result = tx
            .load_networks(&NetworkLoadFilter::ids([network_id]), &NetworkLoadCriteria::full())
            .await
            .unwrap();
        result.networks.into_iter().next()
    }
}
