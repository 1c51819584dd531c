use crate::core::{Document, GatewayError, GatewayResult};
use async_trait::async_trait;

/// Keyed document collection backing the inventory.
///
/// Keys are item names. Implementations give no ordering guarantee for
/// `list_all`, and `upsert` replaces every field of the stored document.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// List every document in the collection
    async fn list_all(&self) -> GatewayResult<Vec<(String, Document)>>;

    /// Fetch one document by key
    async fn get(&self, key: &str) -> GatewayResult<Option<Document>>;

    /// Create or fully replace a document
    async fn upsert(&self, key: &str, document: Document) -> GatewayResult<()>;

    /// Delete a document; succeeds when the key is already absent
    async fn remove(&self, key: &str) -> GatewayResult<()>;
}

/// Reject keys a document store cannot address.
pub fn validate_key(key: &str) -> GatewayResult<()> {
    if key.is_empty() {
        return Err(GatewayError::InvalidKey(
            key.to_string(),
            "key must not be empty".to_string(),
        ));
    }
    if key.contains('/') {
        return Err(GatewayError::InvalidKey(
            key.to_string(),
            "key must not contain '/'".to_string(),
        ));
    }
    Ok(())
}
