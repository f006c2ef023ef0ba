//! # Core Configuration Module
//!
//! Builder-pattern configuration for the client core. The host assembles a
//! [`CoreConfig`] from its bridge implementations; building fails fast with
//! actionable messages when a required capability is missing or a feature
//! flag is inconsistent with the bridges provided.
//!
//! ## Required Dependencies
//!
//! - `StateStore` - backs all persisted user state
//!
//! ## Optional Dependencies
//!
//! - `HttpClient` - required only when cloud sync is enabled
//! - `VideoPlayer` - required only to drive actual playback; headless
//!   embeddings (tests, data migration tools) may omit it
//! - `Clock` - defaults to [`SystemClock`]
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .state_store(Arc::new(my_store))
//!     .video_player(Arc::new(my_player))
//!     .http_client(Arc::new(my_http))
//!     .api_base_url("https://api.tunedeck.example")
//!     .enable_cloud_sync(true)
//!     .build()?;
//! # Ok::<(), core_runtime::Error>(())
//! ```

use crate::error::{Error, Result};
use bridge_traits::{Clock, HttpClient, StateStore, SystemClock, VideoPlayer};
use std::sync::Arc;

/// Feature flags controlling optional functionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureFlags {
    /// Push and pull user preferences against the remote API. Requires an
    /// `HttpClient` bridge.
    pub enable_cloud_sync: bool,
}

/// Core configuration for the Tunedeck client core.
///
/// Use [`CoreConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Persistent key-value storage (required)
    pub state_store: Arc<dyn StateStore>,

    /// HTTP client for the remote API (optional)
    pub http_client: Option<Arc<dyn HttpClient>>,

    /// Embedded video player command surface (optional)
    pub video_player: Option<Arc<dyn VideoPlayer>>,

    /// Time source for persisted timestamps
    pub clock: Arc<dyn Clock>,

    /// Base URL of the remote API, without a trailing slash
    pub api_base_url: String,

    /// Feature flags
    pub features: FeatureFlags,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("state_store", &"StateStore { ... }")
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .field(
                "video_player",
                &self.video_player.as_ref().map(|_| "VideoPlayer { ... }"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("features", &self.features)
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(Error::Config("API base URL cannot be empty".to_string()));
        }

        if self.features.enable_cloud_sync && self.http_client.is_none() {
            return Err(Error::Config(
                "Cloud sync enabled but no HttpClient provided. \
                 Disable the feature or inject an HttpClient implementation."
                    .to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`CoreConfig`] instances.
#[derive(Default)]
pub struct CoreConfigBuilder {
    state_store: Option<Arc<dyn StateStore>>,
    http_client: Option<Arc<dyn HttpClient>>,
    video_player: Option<Arc<dyn VideoPlayer>>,
    clock: Option<Arc<dyn Clock>>,
    api_base_url: Option<String>,
    features: FeatureFlags,
}

impl CoreConfigBuilder {
    /// Sets the state store implementation (required).
    pub fn state_store(mut self, store: Arc<dyn StateStore>) -> Self {
        self.state_store = Some(store);
        self
    }

    /// Sets the HTTP client implementation.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the embedded video player bridge.
    pub fn video_player(mut self, player: Arc<dyn VideoPlayer>) -> Self {
        self.video_player = Some(player);
        self
    }

    /// Sets the time source. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the remote API base URL.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Enables or disables cloud preference sync.
    ///
    /// Default: false
    pub fn enable_cloud_sync(mut self, enabled: bool) -> Self {
        self.features.enable_cloud_sync = enabled;
        self
    }

    /// Builds the final `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns an error when the `StateStore` is missing, the API base URL
    /// is blank, or an enabled feature lacks its bridge.
    pub fn build(self) -> Result<CoreConfig> {
        let state_store = self.state_store.ok_or_else(|| Error::CapabilityMissing {
            capability: "StateStore".to_string(),
            message: "StateStore implementation is required for persisted user state. \
                      Web: inject a localStorage-backed store. \
                      Desktop: use bridge_local::JsonFileStateStore."
                .to_string(),
        })?;

        let config = CoreConfig {
            state_store,
            http_client: self.http_client,
            video_player: self.video_player,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            api_base_url: self
                .api_base_url
                .unwrap_or_else(|| "https://api.tunedeck.example".to_string()),
            features: self.features,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_local::MemoryStateStore;

    #[test]
    fn build_requires_state_store() {
        let result = CoreConfig::builder().build();

        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("StateStore"));
    }

    #[test]
    fn build_with_defaults() {
        let config = CoreConfig::builder()
            .state_store(Arc::new(MemoryStateStore::new()))
            .build()
            .unwrap();

        assert!(config.http_client.is_none());
        assert!(config.video_player.is_none());
        assert!(!config.features.enable_cloud_sync);
        assert!(!config.api_base_url.is_empty());
    }

    #[test]
    fn cloud_sync_requires_http_client() {
        let result = CoreConfig::builder()
            .state_store(Arc::new(MemoryStateStore::new()))
            .enable_cloud_sync(true)
            .build();

        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Cloud sync enabled"));
        assert!(message.contains("HttpClient"));
    }

    #[test]
    fn rejects_blank_api_base_url() {
        let result = CoreConfig::builder()
            .state_store(Arc::new(MemoryStateStore::new()))
            .api_base_url("   ")
            .build();

        assert!(result.is_err());
    }
}
