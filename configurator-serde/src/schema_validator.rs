use crate::domain::Domain;
use crate::error::Result;

/// Decodes a configuration payload of a given type within a schema domain.
///
/// Implementations must be pure: no storage access and no side effects
/// beyond logging.
pub trait SchemaValidator: Send + Sync {
    fn validate(&self, domain: &Domain, type_tag: &str, payload: &[u8]) -> Result<()>;
}
