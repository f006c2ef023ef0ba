//! Storage keys for the independently persisted state blobs.
//!
//! Each key loads on its own: corruption under one key never affects the
//! others. Shuffle, repeat, and the play counter persist as bare strings
//! (a holdover from the web host); everything else is a JSON array.

/// Favorites array.
pub const FAVORITES: &str = "tunedeck-favorites";

/// Play history array, most recent first, capped at [`HISTORY_LIMIT`].
pub const HISTORY: &str = "tunedeck-history";

/// Pending-play queue array.
pub const QUEUE: &str = "tunedeck-queue";

/// Shuffle flag, stored as `"true"` / `"false"`.
pub const SHUFFLE: &str = "tunedeck-shuffle";

/// Repeat mode, stored as `"off"` / `"all"` / `"one"`.
pub const REPEAT: &str = "tunedeck-repeat";

/// User-created playlists array.
pub const PLAYLISTS: &str = "tunedeck-playlists";

/// Opaque bearer token for the remote API; absent when signed out.
pub const ACCESS_TOKEN: &str = "tunedeck-access-token";

/// Lifetime count of songs played, stored as a decimal string.
pub const SONGS_PLAYED: &str = "tunedeck-songs-played";

/// Maximum number of history entries kept; older entries drop off the tail.
pub const HISTORY_LIMIT: usize = 50;
