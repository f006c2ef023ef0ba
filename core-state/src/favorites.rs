//! Favorites Manager
//!
//! An order-preserving set of songs keyed by `(title, artist)`.
//! Toggling flips membership; insertion order is stable so the favorites
//! panel renders in the order songs were added.

use bridge_traits::time::Clock;
use core_runtime::events::{CoreEvent, EventBus, LibraryEvent};
use std::sync::Arc;

use crate::keys;
use crate::store::StoreAdapter;
use crate::types::{FavoriteEntry, Song};

/// Read-only view handed to the renderer.
///
/// `visible` is derived from `count` here, in one place, so the favorites
/// section can never show with a zero count or hide with a non-zero one.
#[derive(Debug, Clone)]
pub struct FavoritesSnapshot {
    pub entries: Vec<FavoriteEntry>,
    pub count: usize,
    pub visible: bool,
}

pub struct FavoritesManager {
    entries: Vec<FavoriteEntry>,
    store: StoreAdapter,
    clock: Arc<dyn Clock>,
    events: EventBus,
}

impl FavoritesManager {
    /// Rehydrate favorites from storage; a corrupt blob loads as empty.
    pub async fn load(store: StoreAdapter, clock: Arc<dyn Clock>, events: EventBus) -> Self {
        let entries = store.load_json(keys::FAVORITES, Vec::new()).await;
        Self {
            entries,
            store,
            clock,
            events,
        }
    }

    /// Flip membership of `song` in the favorites set.
    ///
    /// `None` is a silent no-op returning `false`: a missing song is an
    /// expected UI state (empty hero card), not a fault. Returns the
    /// resulting membership so the caller can flash the right toast.
    pub async fn toggle(&mut self, song: Option<&Song>) -> bool {
        let Some(song) = song else {
            return false;
        };

        let key = song.key();
        if let Some(pos) = self.entries.iter().position(|e| e.song.key() == key) {
            self.entries.remove(pos);
            self.persist().await;
            self.events
                .emit(CoreEvent::Library(LibraryEvent::FavoriteRemoved {
                    title: song.title.clone(),
                    artist: song.artist.clone(),
                }));
            false
        } else {
            self.entries.push(FavoriteEntry {
                song: song.clone(),
                added_at: self.clock.unix_timestamp_millis(),
            });
            self.persist().await;
            self.events
                .emit(CoreEvent::Library(LibraryEvent::FavoriteAdded {
                    title: song.title.clone(),
                    artist: song.artist.clone(),
                }));
            true
        }
    }

    /// Membership test; `None` is always `false`.
    pub fn is_favorite(&self, song: Option<&Song>) -> bool {
        let Some(song) = song else {
            return false;
        };
        let key = song.key();
        self.entries.iter().any(|e| e.song.key() == key)
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn snapshot(&self) -> FavoritesSnapshot {
        FavoritesSnapshot {
            entries: self.entries.clone(),
            count: self.entries.len(),
            visible: !self.entries.is_empty(),
        }
    }

    /// Replace the whole list (cloud merge-pull) and persist.
    pub async fn replace(&mut self, entries: Vec<FavoriteEntry>) {
        self.entries = entries;
        self.persist().await;
    }

    /// Drop all favorites (sign-out path).
    pub async fn clear(&mut self) {
        self.entries.clear();
        self.persist().await;
    }

    async fn persist(&self) {
        self.store.save_json(keys::FAVORITES, &self.entries).await;
    }
}
