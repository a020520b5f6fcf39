// Northbound request and response messages
use crate::dispatcher::{EntityWrite, EntityWriteResult};
use configurator_storage::{
    EntityId, EntityLoadCriteria, EntityLoadFilter, EntityUpdateCriteria, NetworkEntity,
    NetworkLoadCriteria, NetworkLoadFilter,
};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadNetworksRequest {
    pub filter: NetworkLoadFilter,
    pub criteria: NetworkLoadCriteria,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadEntitiesRequest {
    pub network_id: String,
    pub filter: EntityLoadFilter,
    pub criteria: EntityLoadCriteria,
}

/// One element of a heterogeneous entity batch.
///
/// On the wire this is `{"kind": "create" | "update", "payload": {...}}`.
/// Any other kind decodes to [`WriteEntityRequest::Unrecognized`], which the
/// dispatcher rejects for the whole batch. It encodes back as the bare
/// `{"kind": <tag>}` the client sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawWriteEntityRequest")]
pub enum WriteEntityRequest {
    Create(NetworkEntity),
    Update(EntityUpdateCriteria),
    Unrecognized(String),
}

#[derive(Deserialize)]
struct RawWriteEntityRequest {
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

impl TryFrom<RawWriteEntityRequest> for WriteEntityRequest {
    type Error = serde_json::Error;

    fn try_from(raw: RawWriteEntityRequest) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "create" => Ok(WriteEntityRequest::Create(serde_json::from_value(raw.payload)?)),
            "update" => Ok(WriteEntityRequest::Update(serde_json::from_value(raw.payload)?)),
            _ => Ok(WriteEntityRequest::Unrecognized(raw.kind)),
        }
    }
}

impl Serialize for WriteEntityRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            WriteEntityRequest::Create(entity) => {
                let mut state = serializer.serialize_struct("WriteEntityRequest", 2)?;
                state.serialize_field("kind", "create")?;
                state.serialize_field("payload", entity)?;
                state.end()
            }
            WriteEntityRequest::Update(update) => {
                let mut state = serializer.serialize_struct("WriteEntityRequest", 2)?;
                state.serialize_field("kind", "update")?;
                state.serialize_field("payload", update)?;
                state.end()
            }
            WriteEntityRequest::Unrecognized(kind) => {
                let mut state = serializer.serialize_struct("WriteEntityRequest", 1)?;
                state.serialize_field("kind", kind)?;
                state.end()
            }
        }
    }
}

impl From<WriteEntityRequest> for EntityWrite {
    fn from(request: WriteEntityRequest) -> Self {
        match request {
            WriteEntityRequest::Create(entity) => EntityWrite::Create(entity),
            WriteEntityRequest::Update(update) => EntityWrite::Update(update),
            WriteEntityRequest::Unrecognized(kind) => EntityWrite::Unrecognized(kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WriteEntitiesRequest {
    pub network_id: String,
    pub writes: Vec<WriteEntityRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WriteEntitiesResponse {
    pub created: Vec<NetworkEntity>,
    pub updated: HashMap<EntityId, NetworkEntity>,
}

impl From<EntityWriteResult> for WriteEntitiesResponse {
    fn from(result: EntityWriteResult) -> Self {
        Self {
            created: result.created,
            updated: result.updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateEntitiesRequest {
    pub network_id: String,
    pub entities: Vec<NetworkEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateEntitiesResponse {
    pub created: Vec<NetworkEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateEntitiesRequest {
    pub network_id: String,
    pub updates: Vec<EntityUpdateCriteria>,
}

/// Updated entities keyed by id. Not JSON-encodable as is, since JSON object
/// keys must be strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateEntitiesResponse {
    pub updated: HashMap<EntityId, NetworkEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteEntitiesRequest {
    pub network_id: String,
    pub ids: Vec<EntityId>,
}
