//! JSON file persistence for the inventory collection.
//!
//! The whole collection lives in one JSON object mapping item name to
//! document. Every write rewrites the file through a temp file and a rename,
//! so readers never observe a half-written collection.

use super::engine::{PersistenceGateway, validate_key};
use crate::core::{Document, GatewayError, GatewayResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

type Collection = BTreeMap<String, Document>;

pub struct JsonFileGateway {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file within this process.
    io_lock: Mutex<()>,
}

impl JsonFileGateway {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            io_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> GatewayResult<Collection> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Collection::new()),
            Err(err) => {
                return Err(GatewayError::Io(format!(
                    "Failed to read '{}': {}",
                    self.path.display(),
                    err
                )));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Collection::new());
        }

        serde_json::from_slice(&bytes).map_err(|err| {
            GatewayError::Serialization(format!(
                "Failed to decode '{}': {}",
                self.path.display(),
                err
            ))
        })
    }

    async fn store(&self, collection: &Collection) -> GatewayResult<()> {
        let bytes = serde_json::to_vec_pretty(collection)?;
        atomic_write(&self.path, &bytes).await?;
        debug!(path = %self.path.display(), documents = collection.len(), "collection written");
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for JsonFileGateway {
    async fn list_all(&self) -> GatewayResult<Vec<(String, Document)>> {
        let _guard = self.io_lock.lock().await;
        Ok(self.load().await?.into_iter().collect())
    }

    async fn get(&self, key: &str) -> GatewayResult<Option<Document>> {
        validate_key(key)?;
        let _guard = self.io_lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn upsert(&self, key: &str, document: Document) -> GatewayResult<()> {
        validate_key(key)?;
        let _guard = self.io_lock.lock().await;
        let mut collection = self.load().await?;
        collection.insert(key.to_string(), document);
        self.store(&collection).await
    }

    async fn remove(&self, key: &str) -> GatewayResult<()> {
        validate_key(key)?;
        let _guard = self.io_lock.lock().await;
        let mut collection = self.load().await?;
        if collection.remove(key).is_none() {
            return Ok(());
        }
        self.store(&collection).await
    }
}

async fn atomic_write(path: &Path, bytes: &[u8]) -> GatewayResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|err| {
            GatewayError::Io(format!(
                "Failed to create parent directory '{}': {}",
                parent.display(),
                err
            ))
        })?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).await.map_err(|err| {
        GatewayError::Io(format!(
            "Failed to write temp file '{}': {}",
            tmp.display(),
            err
        ))
    })?;

    fs::rename(&tmp, path).await.map_err(|err| {
        GatewayError::Io(format!(
            "Failed to rename temp file '{}' -> '{}': {}",
            tmp.display(),
            path.display(),
            err
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;
    use chrono::Utc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_lists_empty() {
        let dir = TempDir::new().unwrap();
        let gateway = JsonFileGateway::new(dir.path().join("inventory.json"));

        assert!(gateway.list_all().await.unwrap().is_empty());
        assert_eq!(gateway.get("apples").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("inventory.json");
        let gateway = JsonFileGateway::new(&path);

        gateway
            .upsert("kale", Document::new(2, Category::Vegetables, Utc::now()))
            .await
            .unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let gateway = JsonFileGateway::new(&path);
        let err = gateway.list_all().await.unwrap_err();
        assert!(matches!(err, GatewayError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_remove_absent_key_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.json");
        let gateway = JsonFileGateway::new(&path);

        gateway.remove("ghost").await.unwrap();

        assert!(!path.exists());
    }
}
