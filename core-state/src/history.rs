//! History Manager
//!
//! Append-with-dedup log of played songs, most recent first, capped at
//! [`keys::HISTORY_LIMIT`]. Re-playing a song moves its entry to the front
//! instead of duplicating it. A lifetime play counter rides along for the
//! profile's "songs played" stat and survives history truncation.

use bridge_traits::time::Clock;
use core_runtime::events::{CoreEvent, EventBus, LibraryEvent};
use std::sync::Arc;

use crate::keys;
use crate::store::StoreAdapter;
use crate::types::{HistoryEntry, Song};

pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    songs_played: u64,
    store: StoreAdapter,
    clock: Arc<dyn Clock>,
    events: EventBus,
}

impl HistoryManager {
    /// Rehydrate history and the play counter from storage.
    pub async fn load(store: StoreAdapter, clock: Arc<dyn Clock>, events: EventBus) -> Self {
        let mut entries: Vec<HistoryEntry> = store.load_json(keys::HISTORY, Vec::new()).await;
        // An older host may have persisted an overlong list; enforce the cap
        // on the way in so in-memory state is always within bounds.
        entries.truncate(keys::HISTORY_LIMIT);

        let songs_played = store
            .load_string(keys::SONGS_PLAYED)
            .await
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);

        Self {
            entries,
            songs_played,
            store,
            clock,
            events,
        }
    }

    /// Record a play of `song`.
    ///
    /// Any existing entry for the same `(title, artist)` is removed first so
    /// the log never holds stale duplicates; the fresh entry goes to the
    /// front and the tail is truncated to the cap.
    pub async fn record(&mut self, song: &Song) {
        let key = song.key();
        self.entries.retain(|e| e.song.key() != key);

        self.entries.insert(
            0,
            HistoryEntry {
                song: song.clone(),
                played_at: self.clock.unix_timestamp_millis(),
            },
        );
        self.entries.truncate(keys::HISTORY_LIMIT);

        self.songs_played += 1;

        self.persist().await;
        self.events
            .emit(CoreEvent::Library(LibraryEvent::HistoryRecorded {
                title: song.title.clone(),
                artist: song.artist.clone(),
            }));
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lifetime play count, independent of the 50-entry history window.
    pub fn songs_played(&self) -> u64 {
        self.songs_played
    }

    /// Adopt a merged history from the cloud and persist it.
    pub async fn replace(&mut self, mut entries: Vec<HistoryEntry>) {
        entries.truncate(keys::HISTORY_LIMIT);
        self.entries = entries;
        self.persist().await;
    }

    /// Adopt the larger of the local and server play counters.
    pub async fn merge_songs_played(&mut self, server_total: u64) {
        self.songs_played = self.songs_played.max(server_total);
        self.store
            .save_string(keys::SONGS_PLAYED, &self.songs_played.to_string())
            .await;
    }

    /// Drop all history and the play counter (sign-out path).
    pub async fn clear(&mut self) {
        self.entries.clear();
        self.songs_played = 0;
        self.persist().await;
    }

    async fn persist(&self) {
        self.store.save_json(keys::HISTORY, &self.entries).await;
        self.store
            .save_string(keys::SONGS_PLAYED, &self.songs_played.to_string())
            .await;
    }
}
