//! # Event Bus System
//!
//! Typed events over `tokio::sync::broadcast`, decoupling the state and
//! playback modules from whatever renders them. Managers emit an event after
//! every mutation has been applied and persisted; the host subscribes and
//! re-renders the affected panel (favorites section, queue badge, player bar)
//! without polling.
//!
//! Emission is non-fatal: a bus with no subscribers simply drops the event,
//! which is the normal situation in headless tests.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{CoreEvent, EventBus, LibraryEvent};
//!
//! let bus = EventBus::new(64);
//! let mut ui = bus.subscribe();
//!
//! bus.emit(CoreEvent::Library(LibraryEvent::QueueChanged { len: 3 }));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::RecvError;
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Local library changes: favorites, history, queue, playlists.
    Library(LibraryEvent),
    /// Playback lifecycle and coordinator decisions.
    Playback(PlaybackEvent),
    /// Cloud preference sync progress.
    Sync(SyncEvent),
}

/// Events emitted by the state managers after a mutation lands.
///
/// Counts are included where the renderer derives badge or visibility state,
/// so it never has to re-read the list just to update a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum LibraryEvent {
    /// A song was added to favorites.
    FavoriteAdded { title: String, artist: String },
    /// A song was removed from favorites.
    FavoriteRemoved { title: String, artist: String },
    /// A play was recorded into history.
    HistoryRecorded { title: String, artist: String },
    /// The queue changed (enqueue, dequeue, remove, clear).
    QueueChanged { len: usize },
    /// A playlist was created.
    PlaylistCreated { playlist_id: String, name: String },
    /// A playlist was deleted.
    PlaylistDeleted { playlist_id: String },
    /// A playlist's contents or name changed.
    PlaylistUpdated { playlist_id: String },
    /// Shuffle was toggled.
    ShuffleChanged { enabled: bool },
    /// Repeat mode was cycled.
    RepeatChanged { mode: String },
}

/// Events emitted by the playback coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum PlaybackEvent {
    /// A song was handed to the player.
    Started {
        video_id: String,
        title: String,
        artist: String,
    },
    /// Playback paused.
    Paused,
    /// Playback resumed.
    Resumed,
    /// Advance requested at the end of the context with repeat off; nothing
    /// was played and the index is unchanged.
    ReachedEnd,
    /// A playback action was abandoned.
    Error { message: String, recoverable: bool },
}

/// Events emitted by the cloud sync coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum SyncEvent {
    /// A push or merge-pull began.
    Started { kind: String },
    /// The operation completed.
    Completed { kind: String },
    /// The operation failed and was abandoned.
    Failed {
        kind: String,
        message: String,
        recoverable: bool,
    },
}

/// Central event bus for publishing and subscribing to [`CoreEvent`]s.
///
/// Cloning the bus produces another publisher over the same channel; each
/// `subscribe()` call produces an independent receiver. Slow subscribers get
/// `RecvError::Lagged` rather than blocking publishers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus buffering up to `capacity` events per
    /// subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all current subscribers.
    ///
    /// Returns the number of subscribers that received it; zero when nobody
    /// is listening, which is not an error.
    pub fn emit(&self, event: CoreEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}
