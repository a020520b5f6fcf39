use crate::decoder::Serde;
use crate::domain::Domain;
use crate::error::{Result, SerdeError};
use crate::schema_validator::SchemaValidator;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of configuration decoders keyed by (domain, type tag)
#[derive(Default, Clone)]
pub struct SerdeRegistry {
    serdes: HashMap<(Domain, String), Arc<dyn Serde>>,
}

impl SerdeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoder under its own type tag
    pub fn register<S>(&mut self, domain: &Domain, serde: S) -> Result<()>
    where
        S: Serde + 'static,
    {
        let key = (domain.clone(), serde.type_tag().to_string());
        if self.serdes.contains_key(&key) {
            return Err(SerdeError::DuplicateRegistration {
                domain: key.0,
                type_tag: key.1,
            });
        }

        info!(domain = %domain, type_tag = %key.1, "Registered config serde");
        self.serdes.insert(key, Arc::new(serde));
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<S>(mut self, domain: &Domain, serde: S) -> Result<Self>
    where
        S: Serde + 'static,
    {
        self.register(domain, serde)?;
        Ok(self)
    }

    pub fn is_registered(&self, domain: &Domain, type_tag: &str) -> bool {
        self.serdes
            .contains_key(&(domain.clone(), type_tag.to_string()))
    }

    /// Registered type tags of a domain, sorted
    pub fn types_in(&self, domain: &Domain) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .serdes
            .keys()
            .filter(|(d, _)| d == domain)
            .map(|(_, t)| t.as_str())
            .collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.serdes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.serdes.is_empty()
    }
}

impl std::fmt::Debug for SerdeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<String> = self
            .serdes
            .keys()
            .map(|(d, t)| format!("{}/{}", d, t))
            .collect();
        keys.sort();
        f.debug_struct("SerdeRegistry").field("serdes", &keys).finish()
    }
}

impl SchemaValidator for SerdeRegistry {
    fn validate(&self, domain: &Domain, type_tag: &str, payload: &[u8]) -> Result<()> {
        let serde = self
            .serdes
            .get(&(domain.clone(), type_tag.to_string()))
            .ok_or_else(|| SerdeError::UnknownType {
                domain: domain.clone(),
                type_tag: type_tag.to_string(),
                known: self.types_in(domain).join(", "),
            })?;

        debug!(domain = %domain, type_tag, len = payload.len(), "Decoding config payload");
        serde
            .validate(payload)
            .map_err(|e| SerdeError::from_payload(domain, type_tag, e))
    }
}
