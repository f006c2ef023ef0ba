//! Persistent Store Adapter
//!
//! Wraps the host's [`StateStore`] with the load-never-fails contract that
//! guards every manager against corrupted persisted state: a missing key, a
//! parse failure, or a shape mismatch yields the caller's default and a log
//! line, never an error. Storage is left untouched until the next explicit
//! save, which rewrites the key with a well-formed value.

use bridge_traits::storage::StateStore;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Tolerant JSON load/save over a [`StateStore`].
#[derive(Clone)]
pub struct StoreAdapter {
    store: Arc<dyn StateStore>,
}

impl StoreAdapter {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// The underlying bridge store.
    pub fn raw(&self) -> &Arc<dyn StateStore> {
        &self.store
    }

    /// Load and parse the JSON blob under `key`, substituting `default` on
    /// absence or corruption. Never fails.
    pub async fn load_json<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!(key, error = %e, "State store read failed, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Discarding corrupt persisted value");
                default
            }
        }
    }

    /// Serialize `value` as JSON and persist it under `key`.
    ///
    /// A failed save is logged and swallowed: persistence failure must never
    /// poison in-memory state. The worst case is stale storage, repaired by
    /// the next successful save of the same key.
    pub async fn save_json<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Failed to encode state for persistence");
                return;
            }
        };

        if let Err(e) = self.store.set(key, &raw).await {
            warn!(key, error = %e, "State store write failed");
        }
    }

    /// Load the bare string under `key` (shuffle/repeat/token keys).
    pub async fn load_string(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "State store read failed");
                None
            }
        }
    }

    /// Persist a bare string under `key`.
    pub async fn save_string(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value).await {
            warn!(key, error = %e, "State store write failed");
        }
    }

    /// Remove every persisted value (sign-out path).
    pub async fn clear_all(&self) {
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "State store clear failed");
        }
    }
}
