// Configurator data model
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Network and its network-level configs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Network {
    /// Unique, immutable once created
    pub id: String,
    pub network_type: Option<String>,
    pub name: String,
    pub description: String,
    /// Config type tag to serialized payload
    pub configs: BTreeMap<String, Vec<u8>>,
    /// Bumped each time an update is applied
    pub version: u64,
}

impl Network {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_type(mut self, network_type: impl Into<String>) -> Self {
        self.network_type = Some(network_type.into());
        self
    }

    pub fn with_config(mut self, type_tag: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        self.configs.insert(type_tag.into(), payload.into());
        self
    }
}

/// Delta applied to an existing network. `delete_network` wins over every
/// other field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkUpdateCriteria {
    pub id: String,
    pub delete_network: bool,
    pub new_name: Option<String>,
    pub new_description: Option<String>,
    pub new_type: Option<String>,
    pub configs_to_add_or_update: BTreeMap<String, Vec<u8>>,
    pub configs_to_delete: Vec<String>,
}

impl NetworkUpdateCriteria {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn delete(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            delete_network: true,
            ..Default::default()
        }
    }

    pub fn with_new_name(mut self, name: impl Into<String>) -> Self {
        self.new_name = Some(name.into());
        self
    }

    pub fn with_new_description(mut self, description: impl Into<String>) -> Self {
        self.new_description = Some(description.into());
        self
    }

    pub fn with_config(mut self, type_tag: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        self.configs_to_add_or_update
            .insert(type_tag.into(), payload.into());
        self
    }

    pub fn without_config(mut self, type_tag: impl Into<String>) -> Self {
        self.configs_to_delete.push(type_tag.into());
        self
    }
}

/// Identifies an entity within a network
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    pub entity_type: String,
    pub key: String,
}

impl EntityId {
    pub fn new(entity_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity_type, self.key)
    }
}

/// Entity within a network, carrying a single config tagged by its type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkEntity {
    /// Assigned by storage on create
    pub network_id: String,
    pub entity_type: String,
    pub key: String,
    pub name: String,
    pub description: String,
    pub physical_id: Option<String>,
    pub config: Vec<u8>,
    pub version: u64,
}

impl NetworkEntity {
    pub fn new(entity_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_physical_id(mut self, physical_id: impl Into<String>) -> Self {
        self.physical_id = Some(physical_id.into());
        self
    }

    pub fn with_config(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.config = payload.into();
        self
    }

    pub fn id(&self) -> EntityId {
        EntityId::new(self.entity_type.clone(), self.key.clone())
    }
}

/// Delta applied to an existing entity. `delete_entity` wins over every
/// other field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityUpdateCriteria {
    pub entity_type: String,
    pub key: String,
    pub delete_entity: bool,
    pub new_name: Option<String>,
    pub new_description: Option<String>,
    pub new_physical_id: Option<String>,
    pub new_config: Option<Vec<u8>>,
}

impl EntityUpdateCriteria {
    pub fn new(entity_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn delete(id: &EntityId) -> Self {
        Self {
            entity_type: id.entity_type.clone(),
            key: id.key.clone(),
            delete_entity: true,
            ..Default::default()
        }
    }

    pub fn with_new_name(mut self, name: impl Into<String>) -> Self {
        self.new_name = Some(name.into());
        self
    }

    pub fn with_new_description(mut self, description: impl Into<String>) -> Self {
        self.new_description = Some(description.into());
        self
    }

    pub fn with_new_physical_id(mut self, physical_id: impl Into<String>) -> Self {
        self.new_physical_id = Some(physical_id.into());
        self
    }

    pub fn with_new_config(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.new_config = Some(payload.into());
        self
    }

    pub fn id(&self) -> EntityId {
        EntityId::new(self.entity_type.clone(), self.key.clone())
    }
}

/// Selects networks. An empty filter selects nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkLoadFilter {
    pub ids: Vec<String>,
    pub type_filter: Option<String>,
}

impl NetworkLoadFilter {
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            type_filter: None,
        }
    }

    pub fn of_type(network_type: impl Into<String>) -> Self {
        Self {
            ids: Vec::new(),
            type_filter: Some(network_type.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.type_filter.is_none()
    }
}

/// Which parts of a network to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkLoadCriteria {
    pub load_metadata: bool,
    pub load_configs: bool,
}

impl NetworkLoadCriteria {
    pub fn full() -> Self {
        Self {
            load_metadata: true,
            load_configs: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkLoadResult {
    pub networks: Vec<Network>,
    pub network_ids_not_found: Vec<String>,
}

/// Selects entities within one network. Set fields combine with AND; an
/// empty filter selects every entity of the network.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityLoadFilter {
    pub type_filter: Option<String>,
    pub key_filter: Option<String>,
    pub physical_id: Option<String>,
    pub entity_ids: Vec<EntityId>,
}

impl EntityLoadFilter {
    pub fn of_type(entity_type: impl Into<String>) -> Self {
        Self {
            type_filter: Some(entity_type.into()),
            ..Default::default()
        }
    }

    pub fn ids(entity_ids: Vec<EntityId>) -> Self {
        Self {
            entity_ids,
            ..Default::default()
        }
    }
}

/// Which parts of an entity to return, and paging
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityLoadCriteria {
    pub load_metadata: bool,
    pub load_config: bool,
    /// Zero means unpaged
    pub page_size: u32,
    pub page_token: Option<String>,
}

impl EntityLoadCriteria {
    pub fn full() -> Self {
        Self {
            load_metadata: true,
            load_config: true,
            ..Default::default()
        }
    }

    pub fn with_page(mut self, page_size: u32, page_token: Option<String>) -> Self {
        self.page_size = page_size;
        self.page_token = page_token;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityLoadResult {
    pub entities: Vec<NetworkEntity>,
    /// Requested ids (from `EntityLoadFilter::entity_ids`) that do not exist
    pub entities_not_found: Vec<EntityId>,
    pub next_page_token: Option<String>,
}
