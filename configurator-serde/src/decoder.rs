use crate::error::PayloadError;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use validator::Validate;

/// Decoder for one configuration type tag
pub trait Serde: Send + Sync {
    /// Type tag this decoder is registered under
    fn type_tag(&self) -> &str;

    /// Attempt to decode `payload`; the decoded value is discarded
    fn validate(&self, payload: &[u8]) -> Result<(), PayloadError>;
}

/// Decodes JSON into `T` and runs its `validator` field rules
pub struct JsonSerde<T> {
    type_tag: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonSerde<T> {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for JsonSerde<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSerde")
            .field("type_tag", &self.type_tag)
            .field("model", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Serde for JsonSerde<T>
where
    T: DeserializeOwned + Validate,
{
    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn validate(&self, payload: &[u8]) -> Result<(), PayloadError> {
        let model: T = serde_json::from_slice(payload)?;
        model
            .validate()
            .map_err(|errors| PayloadError::Rejected(errors.to_string()))
    }
}

/// Accepts any well-formed JSON document
#[derive(Debug, Clone)]
pub struct RawJsonSerde {
    type_tag: String,
}

impl RawJsonSerde {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
        }
    }
}

impl Serde for RawJsonSerde {
    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn validate(&self, payload: &[u8]) -> Result<(), PayloadError> {
        serde_json::from_slice::<serde_json::Value>(payload)?;
        Ok(())
    }
}
