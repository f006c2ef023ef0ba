//! State Store Implementations
//!
//! Two [`StateStore`] backends: a purely in-memory map for tests and
//! short-lived embeddings, and a JSON-file-backed map that persists the same
//! keyed string blobs the web host keeps in localStorage.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::StateStore,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// In-memory state store.
///
/// Values live for the lifetime of the process. Cloning the store shares the
/// underlying map, so a clone handed to another module observes the same data.
#[derive(Default)]
pub struct MemoryStateStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, for tests that need existing (possibly corrupt)
    /// persisted state before the core loads.
    pub async fn seed(&self, key: &str, value: &str) {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.values.lock().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn clear(&self) -> Result<()> {
        self.values.lock().await.clear();
        Ok(())
    }
}

/// JSON-file-backed state store.
///
/// The whole key space is held as one JSON object (`{"key": "value", ...}`)
/// in a single file, read once at construction and rewritten on every
/// mutation. Payloads are five small blobs, so whole-file rewrites stay
/// cheap, and a single file keeps the store's on-disk shape inspectable.
///
/// An unreadable or malformed file is treated the same way a corrupt
/// localStorage value is treated upstream: start from an empty map and let
/// the next save repair the file.
pub struct JsonFileStateStore {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl JsonFileStateStore {
    /// Open (or create) the store at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(BridgeError::Io)?;
        }

        let values = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str::<HashMap<String, String>>(&contents) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = ?path, error = %e, "State file is malformed, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(BridgeError::Io(e)),
        };

        debug!(path = ?path, entries = values.len(), "Opened state store");

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, values: &HashMap<String, String>) -> Result<()> {
        let contents = serde_json::to_string_pretty(values)
            .map_err(|e| BridgeError::StorageError(format!("Failed to encode state: {}", e)))?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(BridgeError::Io)
    }
}

#[async_trait]
impl StateStore for JsonFileStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().await;
        values.insert(key.to_string(), value.to_string());
        self.flush(&values).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().await;
        if values.remove(key).is_some() {
            self.flush(&values).await?;
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.values.lock().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn clear(&self) -> Result<()> {
        let mut values = self.values.lock().await;
        values.clear();
        self.flush(&values).await
    }
}
