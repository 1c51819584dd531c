use crate::storage::{InMemoryGateway, JsonFileGateway, PersistenceGateway};
use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which gateway backs the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-local, lost on exit
    Memory,
    /// One JSON file on disk
    #[default]
    JsonFile,
}

impl StoreBackend {
    fn from_env(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "json" | "file" | "json-file" => Ok(Self::JsonFile),
            _ => Err(anyhow!("PANTRY_STORE must be one of: json, memory")),
        }
    }
}

/// Application configuration
///
/// Defaults suit a local single-user setup; every field can be overridden
/// from the environment or with the builder methods.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host for the HTTP server
    pub host: String,

    /// Bind port for the HTTP server
    pub port: u16,

    /// Gateway backend
    pub store: StoreBackend,

    /// File used by the JSON backend
    pub store_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            store: StoreBackend::JsonFile,
            store_path: PathBuf::from("pantry-inventory.json"),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `PANTRY_*` variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env::var("PANTRY_HOST").unwrap_or(defaults.host);

        let port = match env::var("PANTRY_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .context("PANTRY_PORT must be a valid u16")?,
            Err(_) => defaults.port,
        };

        let store = match env::var("PANTRY_STORE") {
            Ok(raw) => StoreBackend::from_env(&raw)?,
            Err(_) => defaults.store,
        };

        let store_path = env::var("PANTRY_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);

        Ok(Self {
            host,
            port,
            store,
            store_path,
        })
    }

    /// Set the bind host
    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Set the bind port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Use the in-memory backend
    pub fn in_memory(mut self) -> Self {
        self.store = StoreBackend::Memory;
        self
    }

    /// Use the JSON backend at `path`
    pub fn json_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store = StoreBackend::JsonFile;
        self.store_path = path.as_ref().to_path_buf();
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Open the configured gateway.
    pub fn open_gateway(&self) -> Arc<dyn PersistenceGateway> {
        match self.store {
            StoreBackend::Memory => Arc::new(InMemoryGateway::new()),
            StoreBackend::JsonFile => Arc::new(JsonFileGateway::new(&self.store_path)),
        }
    }
}
