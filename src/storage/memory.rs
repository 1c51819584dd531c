use super::engine::{PersistenceGateway, validate_key};
use crate::core::{Document, GatewayResult};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// `HashMap`-backed gateway for tests and the ephemeral server mode.
#[derive(Default)]
pub struct InMemoryGateway {
    documents: RwLock<HashMap<String, Document>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the collection, e.g. from fixtures.
    pub fn with_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = (String, Document)>,
    {
        Self {
            documents: RwLock::new(documents.into_iter().collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn list_all(&self) -> GatewayResult<Vec<(String, Document)>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .map(|(key, doc)| (key.clone(), doc.clone()))
            .collect())
    }

    async fn get(&self, key: &str) -> GatewayResult<Option<Document>> {
        validate_key(key)?;
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn upsert(&self, key: &str, document: Document) -> GatewayResult<()> {
        validate_key(key)?;
        self.documents
            .write()
            .await
            .insert(key.to_string(), document);
        Ok(())
    }

    async fn remove(&self, key: &str) -> GatewayResult<()> {
        validate_key(key)?;
        self.documents.write().await.remove(key);
        Ok(())
    }
}
