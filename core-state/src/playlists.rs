//! Playlist Manager
//!
//! Named, user-created, ordered song collections. Creation and rename
//! trim the name and silently reject an empty result, since an empty input box
//! is an expected UI state, not a fault. All other operations are no-ops
//! on unknown ids or out-of-range indices.

use bridge_traits::time::Clock;
use core_runtime::events::{CoreEvent, EventBus, LibraryEvent};
use std::sync::Arc;
use uuid::Uuid;

use crate::keys;
use crate::store::StoreAdapter;
use crate::types::{Playlist, Song};

pub struct PlaylistManager {
    playlists: Vec<Playlist>,
    store: StoreAdapter,
    clock: Arc<dyn Clock>,
    events: EventBus,
}

impl PlaylistManager {
    /// Rehydrate playlists from storage.
    pub async fn load(store: StoreAdapter, clock: Arc<dyn Clock>, events: EventBus) -> Self {
        let playlists = store.load_json(keys::PLAYLISTS, Vec::new()).await;
        Self {
            playlists,
            store,
            clock,
            events,
        }
    }

    /// Create a playlist named `name` (trimmed) and return its id.
    ///
    /// Returns `None` without mutating anything when the trimmed name is
    /// empty.
    pub async fn create(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let now = self.clock.unix_timestamp_millis();
        let id = Uuid::new_v4().to_string();
        self.playlists.push(Playlist {
            id: id.clone(),
            name: name.to_string(),
            description: None,
            songs: Vec::new(),
            created_at: now,
            updated_at: now,
        });

        self.persist().await;
        self.events
            .emit(CoreEvent::Library(LibraryEvent::PlaylistCreated {
                playlist_id: id.clone(),
                name: name.to_string(),
            }));
        Some(id)
    }

    /// Delete the playlist with the given id; unknown ids are a no-op.
    pub async fn delete(&mut self, id: &str) {
        let before = self.playlists.len();
        self.playlists.retain(|p| p.id != id);
        if self.playlists.len() != before {
            self.persist().await;
            self.events
                .emit(CoreEvent::Library(LibraryEvent::PlaylistDeleted {
                    playlist_id: id.to_string(),
                }));
        }
    }

    /// Append `song` to the playlist and bump `updated_at`.
    ///
    /// A `None` song is silently rejected, consistent with the null-handling
    /// policy of favorites and queue. Unknown ids are a no-op.
    pub async fn add_song(&mut self, id: &str, song: Option<Song>) {
        let Some(song) = song else {
            return;
        };

        let now = self.clock.unix_timestamp_millis();
        let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == id) else {
            return;
        };

        playlist.songs.push(song);
        playlist.updated_at = now;

        self.persist().await;
        self.notify_updated(id);
    }

    /// Remove the song at `index`; out-of-range indices are a no-op.
    pub async fn remove_song(&mut self, id: &str, index: usize) {
        let now = self.clock.unix_timestamp_millis();
        let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == id) else {
            return;
        };

        if index >= playlist.songs.len() {
            return;
        }
        playlist.songs.remove(index);
        playlist.updated_at = now;

        self.persist().await;
        self.notify_updated(id);
    }

    /// Rename a playlist, with the same trim-and-reject rule as `create`.
    pub async fn rename(&mut self, id: &str, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let now = self.clock.unix_timestamp_millis();
        let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == id) else {
            return;
        };

        playlist.name = name.to_string();
        playlist.updated_at = now;

        self.persist().await;
        self.notify_updated(id);
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn get(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    pub fn snapshot(&self) -> Vec<Playlist> {
        self.playlists.clone()
    }

    /// Replace the whole collection (cloud merge-pull) and persist.
    pub async fn replace(&mut self, playlists: Vec<Playlist>) {
        self.playlists = playlists;
        self.persist().await;
    }

    /// Drop all playlists (sign-out path).
    pub async fn clear(&mut self) {
        self.playlists.clear();
        self.persist().await;
    }

    fn notify_updated(&self, id: &str) {
        self.events
            .emit(CoreEvent::Library(LibraryEvent::PlaylistUpdated {
                playlist_id: id.to_string(),
            }));
    }

    async fn persist(&self) {
        self.store.save_json(keys::PLAYLISTS, &self.playlists).await;
    }
}
