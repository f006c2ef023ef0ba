//! State Storage Abstraction
//!
//! Provides a platform-agnostic trait for the keyed string storage that backs
//! all persisted user state (favorites, history, queue, playlists, settings).

use async_trait::async_trait;

use crate::error::Result;

/// Keyed string storage trait
///
/// Abstracts the host's persistent key-value storage:
/// - Web: localStorage
/// - iOS: UserDefaults
/// - Android: SharedPreferences / DataStore
/// - Desktop: a JSON settings file or OS-specific preferences
///
/// Values are opaque strings. Callers that need structured data serialize
/// to JSON before `set` and parse after `get`; the store itself never
/// interprets the payload, so a corrupt blob is a caller-level concern.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::StateStore;
///
/// async fn remember_theme(store: &dyn StateStore) -> Result<()> {
///     store.set("theme", "dark").await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Retrieve the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`. Deleting a missing key is not
    /// an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Check whether a key currently holds a value.
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// List all keys that currently hold a value.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Remove every stored value.
    ///
    /// Used on sign-out to drop all locally persisted user data.
    async fn clear(&self) -> Result<()>;
}
