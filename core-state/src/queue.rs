//! Queue Manager
//!
//! Ordered pending-play list. The front of the list plays next. "Play next"
//! inserts at the front, giving the song priority over everything already
//! queued but not over a later play-next call.

use core_runtime::events::{CoreEvent, EventBus, LibraryEvent};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::keys;
use crate::store::StoreAdapter;
use crate::types::{QueueEntry, Song};

/// Read-only view handed to the renderer; `visible` drives the queue badge.
#[derive(Debug, Clone)]
pub struct QueueSnapshot {
    pub entries: Vec<QueueEntry>,
    pub count: usize,
    pub visible: bool,
}

pub struct QueueManager {
    entries: Vec<QueueEntry>,
    next_id: AtomicU64,
    store: StoreAdapter,
    events: EventBus,
}

impl QueueManager {
    /// Rehydrate the queue from storage.
    ///
    /// The id counter resumes past the largest persisted id so ids stay
    /// unique across page reloads.
    pub async fn load(store: StoreAdapter, events: EventBus) -> Self {
        let entries: Vec<QueueEntry> = store.load_json(keys::QUEUE, Vec::new()).await;
        let next_id = entries.iter().map(|e| e.id).max().map_or(1, |id| id + 1);

        Self {
            entries,
            next_id: AtomicU64::new(next_id),
            store,
            events,
        }
    }

    /// Add `song` to the queue.
    ///
    /// Tolerant of minimal song shapes; artwork and score may be absent.
    /// `play_next` inserts at the front; otherwise the song appends at the
    /// end. The id comes from a monotonic counter, never a timestamp, so
    /// rapid successive enqueues cannot collide.
    pub async fn enqueue(&mut self, song: Song, play_next: bool) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let entry = QueueEntry { song, id };

        if play_next {
            self.entries.insert(0, entry);
        } else {
            self.entries.push(entry);
        }

        self.persist_and_notify().await;
        id
    }

    /// Remove and return the entry that should play next, or `None` when the
    /// queue is empty. Never an error.
    pub async fn dequeue_front(&mut self) -> Option<QueueEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let entry = self.entries.remove(0);
        self.persist_and_notify().await;
        Some(entry)
    }

    /// Remove the entry with the given id; unknown ids are a no-op.
    ///
    /// Persists unconditionally, matching the historical behavior of saving
    /// after every remove call.
    pub async fn remove(&mut self, id: u64) {
        self.entries.retain(|e| e.id != id);
        self.persist_and_notify().await;
    }

    /// Empty the queue. Safe on an already-empty queue.
    pub async fn clear(&mut self) {
        self.entries.clear();
        self.persist_and_notify().await;
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            entries: self.entries.clone(),
            count: self.entries.len(),
            visible: !self.entries.is_empty(),
        }
    }

    /// Replace the whole queue (cloud merge-pull) and persist.
    ///
    /// Re-bases the id counter past the adopted entries.
    pub async fn replace(&mut self, entries: Vec<QueueEntry>) {
        let max_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        self.next_id.fetch_max(max_id + 1, Ordering::Relaxed);
        self.entries = entries;
        self.persist_and_notify().await;
    }

    async fn persist_and_notify(&self) {
        self.store.save_json(keys::QUEUE, &self.entries).await;
        self.events
            .emit(CoreEvent::Library(LibraryEvent::QueueChanged {
                len: self.entries.len(),
            }));
    }
}
