//! Workspace facade crate.
//!
//! Host applications can depend on `tunedeck-workspace` and enable the
//! documented features instead of wiring each member crate individually.
//! The `cloud-sync` feature (on by default) pulls in `core-sync`; a purely
//! offline embedding can disable it and skip the HTTP bridge entirely.

use core_runtime::{CoreConfig, EventBus};
use core_state::StateContainer;
#[cfg(feature = "cloud-sync")]
use core_state::StoreAdapter;

pub use core_playback;
pub use core_runtime;
pub use core_state;

#[cfg(feature = "cloud-sync")]
pub use core_sync;

/// The assembled client core, ready for the host to drive.
pub struct TunedeckCore {
    /// Bus the host subscribes to for re-rendering.
    pub events: EventBus,
    /// All persisted user state, rehydrated.
    pub state: StateContainer,
    /// Present when the host supplied a video player bridge.
    pub playback: Option<core_playback::PlaybackCoordinator>,
    /// Present when cloud sync is enabled and an HTTP bridge was supplied.
    #[cfg(feature = "cloud-sync")]
    pub sync: Option<core_sync::SyncCoordinator>,
}

/// Assemble the core modules from a validated host configuration.
pub async fn bootstrap(config: CoreConfig) -> TunedeckCore {
    let events = EventBus::default();

    let state = StateContainer::load(
        config.state_store.clone(),
        config.clock.clone(),
        events.clone(),
    )
    .await;

    let playback = config
        .video_player
        .clone()
        .map(|player| core_playback::PlaybackCoordinator::new(player, events.clone()));

    #[cfg(feature = "cloud-sync")]
    let sync = match &config.http_client {
        Some(http) if config.features.enable_cloud_sync => Some(core_sync::SyncCoordinator::new(
            http.clone(),
            StoreAdapter::new(config.state_store.clone()),
            events.clone(),
            config.api_base_url.clone(),
        )),
        _ => None,
    };

    TunedeckCore {
        events,
        state,
        playback,
        #[cfg(feature = "cloud-sync")]
        sync,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_local::MemoryStateStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn bootstrap_with_minimal_config_is_headless() {
        let config = CoreConfig::builder()
            .state_store(Arc::new(MemoryStateStore::new()))
            .build()
            .unwrap();

        let core = bootstrap(config).await;

        assert!(core.playback.is_none());
        #[cfg(feature = "cloud-sync")]
        assert!(core.sync.is_none());
        assert_eq!(core.state.favorites().count(), 0);
    }
}
