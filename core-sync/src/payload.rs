//! Wire payloads for the library sync endpoints.
//!
//! The envelope fields are snake_case (the API's convention); the entries
//! inside reuse the camelCase serde shapes from `core-state`, so a favorite
//! looks identical on the wire and in local storage.

use core_state::types::{FavoriteEntry, HistoryEntry, Playlist, QueueEntry};
use serde::{Deserialize, Serialize};

/// Shuffle/repeat pair as the API exchanges it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreferencesPayload {
    pub shuffle: bool,
    pub repeat: String,
}

/// Full local library, POSTed to the merge endpoint on sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct LibrarySyncRequest {
    pub local_favorites: Vec<FavoriteEntry>,
    pub local_history: Vec<HistoryEntry>,
    pub local_queue: Vec<QueueEntry>,
    pub local_playlists: Vec<Playlist>,
    pub local_preferences: PreferencesPayload,
    pub local_total_songs_played: u64,
}

/// Server's merged view of the library.
///
/// Every field is optional: an older server may not return sections it does
/// not manage, and a missing section simply leaves local state untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct MergedLibrary {
    #[serde(default)]
    pub merged_favorites: Option<Vec<FavoriteEntry>>,
    #[serde(default)]
    pub merged_history: Option<Vec<HistoryEntry>>,
    #[serde(default)]
    pub merged_queue: Option<Vec<QueueEntry>>,
    #[serde(default)]
    pub merged_playlists: Option<Vec<Playlist>>,
    #[serde(default)]
    pub preferences: Option<PreferencesPayload>,
    #[serde(default)]
    pub total_songs_played: Option<u64>,
}
