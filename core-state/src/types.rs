//! Data model for the client core.
//!
//! Serde shapes use camelCase field names so the persisted JSON stays
//! interchangeable with what the web host historically wrote.

use serde::{Deserialize, Serialize};

/// A song as delivered by the chart API or a playlist.
///
/// Optional fields default through this one constructor; downstream code
/// never null-checks artwork or score individually. Two songs are "the same"
/// when title and artist match, not when video ids match, since the charts
/// can carry different recordings of the same entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Song {
    /// Construct a song from the minimal shape every source guarantees.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        video_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            video_id: video_id.into(),
            artwork: None,
            score: None,
            language: None,
        }
    }

    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Identity key used for favorites membership and history dedup.
    pub fn key(&self) -> SongKey<'_> {
        SongKey {
            title: &self.title,
            artist: &self.artist,
        }
    }

    /// Whether `other` refers to the same chart entity.
    pub fn same_entity(&self, other: &Song) -> bool {
        self.key() == other.key()
    }
}

/// Borrowed `(title, artist)` identity of a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SongKey<'a> {
    pub title: &'a str,
    pub artist: &'a str,
}

/// A favorited song with the moment it was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub song: Song,
    pub added_at: i64,
}

/// A played song with the moment of its most recent play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub song: Song,
    pub played_at: i64,
}

/// A queued song with its queue-local id.
///
/// Ids come from an in-process monotonic counter, never from a timestamp:
/// two rapid enqueues within the same millisecond must still get distinct
/// ids so remove-by-id stays unambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    #[serde(flatten)]
    pub song: Song,
    pub id: u64,
}

/// A user-created, named, ordered collection of songs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub songs: Vec<Song>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Tri-state repeat mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    /// The user-facing cycle: off -> all -> one -> off.
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }

    /// Persisted string form.
    pub fn as_str(self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::All => "all",
            RepeatMode::One => "one",
        }
    }

    /// Parse the persisted string form; anything unrecognized falls back to
    /// `Off`, matching the corruption-recovery policy of the store adapter.
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "all" => RepeatMode::All,
            "one" => RepeatMode::One,
            _ => RepeatMode::Off,
        }
    }
}

/// Shuffle flag and repeat mode, persisted independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackSettings {
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_identity_ignores_video_id() {
        let studio = Song::new("Kesariya", "Arijit Singh", "abc123");
        let live = Song::new("Kesariya", "Arijit Singh", "xyz789");
        let other = Song::new("Kesariya", "Someone Else", "abc123");

        assert!(studio.same_entity(&live));
        assert!(!studio.same_entity(&other));
    }

    #[test]
    fn repeat_mode_cycles_back_to_off() {
        let mode = RepeatMode::Off;
        assert_eq!(mode.cycle(), RepeatMode::All);
        assert_eq!(mode.cycle().cycle(), RepeatMode::One);
        assert_eq!(mode.cycle().cycle().cycle(), RepeatMode::Off);
    }

    #[test]
    fn repeat_mode_parse_tolerates_garbage() {
        assert_eq!(RepeatMode::parse_or_default("all"), RepeatMode::All);
        assert_eq!(RepeatMode::parse_or_default("one"), RepeatMode::One);
        assert_eq!(RepeatMode::parse_or_default("off"), RepeatMode::Off);
        assert_eq!(RepeatMode::parse_or_default("banana"), RepeatMode::Off);
    }

    #[test]
    fn entries_serialize_with_flattened_song() {
        let entry = FavoriteEntry {
            song: Song::new("Tum Hi Ho", "Arijit Singh", "vid1").with_artwork("http://a/1.jpg"),
            added_at: 1_700_000_000_000,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["title"], "Tum Hi Ho");
        assert_eq!(json["videoId"], "vid1");
        assert_eq!(json["addedAt"], 1_700_000_000_000i64);
        // No nested "song" object.
        assert!(json.get("song").is_none());
    }

    #[test]
    fn song_deserializes_from_minimal_shape() {
        let song: Song =
            serde_json::from_str(r#"{"title":"Minimal","artist":"Test","videoId":"v"}"#).unwrap();
        assert_eq!(song.artwork, None);
        assert_eq!(song.score, None);
    }
}
