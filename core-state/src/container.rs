//! State Container
//!
//! Single owner of all user state. Every slice rehydrates independently at startup
//! (corruption in one key never takes down another), mutates through its
//! manager, and persists through the shared store adapter. The container
//! never renders: mutations return, events fire, and the host re-renders.

use bridge_traits::storage::StateStore;
use bridge_traits::time::Clock;
use core_runtime::events::EventBus;
use std::sync::Arc;

use crate::favorites::FavoritesManager;
use crate::history::HistoryManager;
use crate::playlists::PlaylistManager;
use crate::queue::QueueManager;
use crate::settings::SettingsManager;
use crate::store::StoreAdapter;

pub struct StateContainer {
    store: StoreAdapter,
    favorites: FavoritesManager,
    history: HistoryManager,
    queue: QueueManager,
    playlists: PlaylistManager,
    settings: SettingsManager,
}

impl StateContainer {
    /// Rehydrate the complete user state from the host's store.
    pub async fn load(
        state_store: Arc<dyn StateStore>,
        clock: Arc<dyn Clock>,
        events: EventBus,
    ) -> Self {
        let store = StoreAdapter::new(state_store);

        let favorites =
            FavoritesManager::load(store.clone(), clock.clone(), events.clone()).await;
        let history = HistoryManager::load(store.clone(), clock.clone(), events.clone()).await;
        let queue = QueueManager::load(store.clone(), events.clone()).await;
        let playlists =
            PlaylistManager::load(store.clone(), clock.clone(), events.clone()).await;
        let settings = SettingsManager::load(store.clone(), events).await;

        Self {
            store,
            favorites,
            history,
            queue,
            playlists,
            settings,
        }
    }

    pub fn favorites(&self) -> &FavoritesManager {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesManager {
        &mut self.favorites
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryManager {
        &mut self.history
    }

    pub fn queue(&self) -> &QueueManager {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut QueueManager {
        &mut self.queue
    }

    pub fn playlists(&self) -> &PlaylistManager {
        &self.playlists
    }

    pub fn playlists_mut(&mut self) -> &mut PlaylistManager {
        &mut self.playlists
    }

    pub fn settings(&self) -> &SettingsManager {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsManager {
        &mut self.settings
    }

    /// The shared store adapter, for modules that persist alongside the
    /// managers (token handling, cloud sync).
    pub fn store(&self) -> &StoreAdapter {
        &self.store
    }

    /// Wipe all locally persisted user data and in-memory state (sign-out).
    pub async fn reset(&mut self) {
        self.favorites.clear().await;
        self.history.clear().await;
        self.queue.clear().await;
        self.playlists.clear().await;
        self.store.clear_all().await;
    }
}
