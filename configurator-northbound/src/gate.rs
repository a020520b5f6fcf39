// Schema checks applied to every payload before it may reach storage
use configurator_serde::{Domain, SchemaValidator, SerdeDomains, SerdeError};
use configurator_storage::{EntityUpdateCriteria, Network, NetworkEntity, NetworkUpdateCriteria};
use logger_redacted::PayloadRedactor;
use std::sync::Arc;
use tracing::debug;

/// Validates the configuration payloads attached to a mutation.
///
/// Network configs are checked in the network domain under their map key;
/// entity configs in the entity domain under the entity type. Deletions carry
/// no payload worth checking and always pass.
#[derive(Clone)]
pub struct ValidationGate {
    validator: Arc<dyn SchemaValidator>,
    domains: SerdeDomains,
    redactor: PayloadRedactor,
}

impl ValidationGate {
    pub fn new(validator: Arc<dyn SchemaValidator>, domains: SerdeDomains) -> Self {
        Self {
            validator,
            domains,
            redactor: PayloadRedactor::default(),
        }
    }

    pub fn with_redactor(mut self, redactor: PayloadRedactor) -> Self {
        self.redactor = redactor;
        self
    }

    pub fn domains(&self) -> &SerdeDomains {
        &self.domains
    }

    pub fn check_network(&self, network: &Network) -> Result<(), SerdeError> {
        for (type_tag, payload) in &network.configs {
            self.validate(&self.domains.network, type_tag, payload)?;
        }
        Ok(())
    }

    pub fn check_network_update(&self, update: &NetworkUpdateCriteria) -> Result<(), SerdeError> {
        // Deletion wins over the delta, so its configs are never written
        if update.delete_network {
            return Ok(());
        }
        for (type_tag, payload) in &update.configs_to_add_or_update {
            self.validate(&self.domains.network, type_tag, payload)?;
        }
        Ok(())
    }

    pub fn check_entity(&self, entity: &NetworkEntity) -> Result<(), SerdeError> {
        self.validate(&self.domains.entity, &entity.entity_type, &entity.config)
    }

    pub fn check_entity_update(&self, update: &EntityUpdateCriteria) -> Result<(), SerdeError> {
        if update.delete_entity {
            return Ok(());
        }
        match update.new_config {
            Some(ref payload) => self.validate(&self.domains.entity, &update.entity_type, payload),
            None => Ok(()),
        }
    }

    fn validate(&self, domain: &Domain, type_tag: &str, payload: &[u8]) -> Result<(), SerdeError> {
        debug!(
            domain = %domain,
            type_tag,
            payload = %self.redactor.summarize(payload),
            "Validating config payload"
        );
        self.validator.validate(domain, type_tag, payload)
    }
}

impl std::fmt::Debug for ValidationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationGate")
            .field("domains", &self.domains)
            .finish_non_exhaustive()
    }
}
