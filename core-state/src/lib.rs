//! # Core State
//!
//! Data model and local state management for the Tunedeck client core:
//! favorites, play history, the pending-play queue, user playlists, and
//! playback settings, all persisted through the host's
//! [`StateStore`](bridge_traits::storage::StateStore) bridge and rehydrated
//! at startup.
//!
//! Design rules carried throughout:
//!
//! - **Mutation ordering.** In-memory state updates first, persistence
//!   second, event emission last. A subscriber reacting to an event always
//!   observes consistent in-memory state and derived counts.
//! - **Tolerant loads.** Missing or corrupt persisted blobs become
//!   type-correct defaults. Nothing at load time can fail the caller.
//! - **Silent rejection of expected-invalid input.** A `None` song or an
//!   empty playlist name is a UI state, not an error: the operation is a
//!   no-op and never panics or returns `Err`.

pub mod container;
pub mod favorites;
pub mod history;
pub mod keys;
pub mod playlists;
pub mod queue;
pub mod settings;
pub mod store;
pub mod types;

pub use container::StateContainer;
pub use favorites::{FavoritesManager, FavoritesSnapshot};
pub use history::HistoryManager;
pub use playlists::PlaylistManager;
pub use queue::{QueueManager, QueueSnapshot};
pub use settings::SettingsManager;
pub use store::StoreAdapter;
pub use types::{
    FavoriteEntry, HistoryEntry, PlaybackSettings, Playlist, QueueEntry, RepeatMode, Song,
};
