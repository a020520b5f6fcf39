// Northbound configurator service
use crate::dispatcher::{BatchWriteDispatcher, EntityWrite, EntityWriteResult, NetworkWrite};
use crate::error::{ConfiguratorError, Result};
use crate::gate::ValidationGate;
use crate::orchestrator::{TransactionOrchestrator, TxMode};
use crate::protocol::*;
use async_trait::async_trait;
use config_engine::GatewayConfig;
use configurator_serde::{SchemaValidator, SerdeDomains};
use configurator_storage::{
    EntityLoadResult, Network, NetworkLoadCriteria, NetworkLoadResult,
    NetworkUpdateCriteria, RequestContext, StorageFactory,
};
use error_common::ErrorContext;
use logger_redacted::{LoggerError, PayloadRedactor};
use std::sync::Arc;
use tracing::info;

/// Network and entity CRUD over a transactional store.
///
/// Loads run in a read-only transaction and everything else in a read-write
/// one. Each call is atomic: it either commits as a whole or leaves storage
/// untouched.
#[async_trait]
pub trait NorthboundConfigurator: Send + Sync {
    async fn list_network_ids(&self, ctx: &RequestContext) -> Result<Vec<String>>;

    async fn load_networks(
        &self,
        ctx: &RequestContext,
        request: LoadNetworksRequest,
    ) -> Result<NetworkLoadResult>;

    async fn create_networks(
        &self,
        ctx: &RequestContext,
        networks: Vec<Network>,
    ) -> Result<Vec<Network>>;

    async fn update_networks(
        &self,
        ctx: &RequestContext,
        updates: Vec<NetworkUpdateCriteria>,
    ) -> Result<()>;

    async fn delete_networks(&self, ctx: &RequestContext, network_ids: Vec<String>) -> Result<()>;

    async fn load_entities(
        &self,
        ctx: &RequestContext,
        request: LoadEntitiesRequest,
    ) -> Result<EntityLoadResult>;

    async fn write_entities(
        &self,
        ctx: &RequestContext,
        request: WriteEntitiesRequest,
    ) -> Result<WriteEntitiesResponse>;

    async fn create_entities(
        &self,
        ctx: &RequestContext,
        request: CreateEntitiesRequest,
    ) -> Result<CreateEntitiesResponse>;

    async fn update_entities(
        &self,
        ctx: &RequestContext,
        request: UpdateEntitiesRequest,
    ) -> Result<UpdateEntitiesResponse>;

    async fn delete_entities(
        &self,
        ctx: &RequestContext,
        request: DeleteEntitiesRequest,
    ) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct NorthboundServicer {
    orchestrator: TransactionOrchestrator,
    dispatcher: BatchWriteDispatcher,
}

impl NorthboundServicer {
    pub fn new(
        factory: Arc<dyn StorageFactory>,
        validator: Arc<dyn SchemaValidator>,
        domains: SerdeDomains,
    ) -> Self {
        let gate = ValidationGate::new(validator, domains);
        Self {
            orchestrator: TransactionOrchestrator::new(factory),
            dispatcher: BatchWriteDispatcher::new(gate),
        }
    }

    /// Build from loaded gateway configuration: schema domains and payload
    /// redaction both come from `config`.
    pub fn from_config(
        factory: Arc<dyn StorageFactory>,
        validator: Arc<dyn SchemaValidator>,
        config: &GatewayConfig,
    ) -> std::result::Result<Self, LoggerError> {
        let redactor = PayloadRedactor::from_logger_config(&config.logging)?;
        let gate = ValidationGate::new(validator, config.serde_domains.clone()).with_redactor(redactor);

        info!(
            network_domain = %config.serde_domains.network,
            entity_domain = %config.serde_domains.entity,
            "Northbound configurator ready"
        );
        Ok(Self {
            orchestrator: TransactionOrchestrator::new(factory),
            dispatcher: BatchWriteDispatcher::new(gate),
        })
    }

    pub fn domains(&self) -> &SerdeDomains {
        self.dispatcher.gate().domains()
    }

    async fn write_networks(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        writes: Vec<NetworkWrite>,
    ) -> Result<Vec<Network>> {
        let dispatcher = self.dispatcher.clone();
        let error_ctx = batch_context(ctx, operation);
        self.orchestrator
            .execute(ctx, TxMode::ReadWrite, operation, move |store| {
                Box::pin(async move {
                    let result = dispatcher.dispatch_networks(store, &error_ctx, writes).await?;
                    Ok::<_, ConfiguratorError>(result.created)
                })
            })
            .await
    }

    async fn write_entity_batch(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        network_id: String,
        writes: Vec<EntityWrite>,
    ) -> Result<EntityWriteResult> {
        let dispatcher = self.dispatcher.clone();
        let error_ctx = batch_context(ctx, operation);
        self.orchestrator
            .execute(ctx, TxMode::ReadWrite, operation, move |store| {
                Box::pin(async move {
                    dispatcher
                        .dispatch_entities(store, &error_ctx, &network_id, writes)
                        .await
                })
            })
            .await
    }
}

fn batch_context(ctx: &RequestContext, operation: &'static str) -> ErrorContext {
    let error_ctx = ErrorContext::new()
        .with_request_id(ctx.request_id)
        .with_operation(operation);
    match ctx.caller {
        Some(ref caller) => error_ctx.add_context("caller", caller.clone()),
        None => error_ctx,
    }
}

#[async_trait]
impl NorthboundConfigurator for NorthboundServicer {
    async fn list_network_ids(&self, ctx: &RequestContext) -> Result<Vec<String>> {
        self.orchestrator
            .execute(ctx, TxMode::ReadOnly, "list_network_ids", |store| {
                Box::pin(async move {
                    let networks = store
                        .load_all_networks(&NetworkLoadCriteria::default())
                        .await?;
                    Ok::<_, ConfiguratorError>(networks.into_iter().map(|n| n.id).collect())
                })
            })
            .await
    }

    async fn load_networks(
        &self,
        ctx: &RequestContext,
        request: LoadNetworksRequest,
    ) -> Result<NetworkLoadResult> {
        self.orchestrator
            .execute(ctx, TxMode::ReadOnly, "load_networks", move |store| {
                Box::pin(async move {
                    store
                        .load_networks(&request.filter, &request.criteria)
                        .await
                        .map_err(ConfiguratorError::from)
                })
            })
            .await
    }

    async fn create_networks(
        &self,
        ctx: &RequestContext,
        networks: Vec<Network>,
    ) -> Result<Vec<Network>> {
        let writes = networks.into_iter().map(NetworkWrite::Create).collect();
        self.write_networks(ctx, "create_networks", writes).await
    }

    async fn update_networks(
        &self,
        ctx: &RequestContext,
        updates: Vec<NetworkUpdateCriteria>,
    ) -> Result<()> {
        let writes = updates.into_iter().map(NetworkWrite::Update).collect();
        self.write_networks(ctx, "update_networks", writes).await?;
        Ok(())
    }

    async fn delete_networks(&self, ctx: &RequestContext, network_ids: Vec<String>) -> Result<()> {
        let writes = network_ids.into_iter().map(NetworkWrite::Delete).collect();
        self.write_networks(ctx, "delete_networks", writes).await?;
        Ok(())
    }

    async fn load_entities(
        &self,
        ctx: &RequestContext,
        request: LoadEntitiesRequest,
    ) -> Result<EntityLoadResult> {
        self.orchestrator
            .execute(ctx, TxMode::ReadOnly, "load_entities", move |store| {
                Box::pin(async move {
                    store
                        .load_entities(&request.network_id, &request.filter, &request.criteria)
                        .await
                        .map_err(ConfiguratorError::from)
                })
            })
            .await
    }

    async fn write_entities(
        &self,
        ctx: &RequestContext,
        request: WriteEntitiesRequest,
    ) -> Result<WriteEntitiesResponse> {
        let writes = request.writes.into_iter().map(EntityWrite::from).collect();
        let result = self
            .write_entity_batch(ctx, "write_entities", request.network_id, writes)
            .await?;
        Ok(result.into())
    }

    async fn create_entities(
        &self,
        ctx: &RequestContext,
        request: CreateEntitiesRequest,
    ) -> Result<CreateEntitiesResponse> {
        let writes = request.entities.into_iter().map(EntityWrite::Create).collect();
        let result = self
            .write_entity_batch(ctx, "create_entities", request.network_id, writes)
            .await?;
        Ok(CreateEntitiesResponse {
            created: result.created,
        })
    }

    async fn update_entities(
        &self,
        ctx: &RequestContext,
        request: UpdateEntitiesRequest,
    ) -> Result<UpdateEntitiesResponse> {
        let writes = request.updates.into_iter().map(EntityWrite::Update).collect();
        let result = self
            .write_entity_batch(ctx, "update_entities", request.network_id, writes)
            .await?;
        Ok(UpdateEntitiesResponse {
            updated: result.updated,
        })
    }

    async fn delete_entities(
        &self,
        ctx: &RequestContext,
        request: DeleteEntitiesRequest,
    ) -> Result<()> {
        let writes = request.ids.into_iter().map(EntityWrite::Delete).collect();
        self.write_entity_batch(ctx, "delete_entities", request.network_id, writes)
            .await?;
        Ok(())
    }
}
