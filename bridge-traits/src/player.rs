//! Video Player Bridge
//!
//! The application plays audio through an embedded video player owned by the
//! host page (an IFrame-based component on the web). The core never constructs
//! or renders the player; it issues commands through this trait and receives
//! state-change signals the host forwards from the player's own event stream.

use async_trait::async_trait;

use crate::error::Result;

/// State-change notification forwarded from the embedded player.
///
/// The host subscribes to the player component's native events and maps them
/// onto this enum before handing them to the playback coordinator. `Ended`
/// is what drives automatic advance to the next track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSignal {
    /// Playback is running.
    Playing,
    /// Playback is paused.
    Paused,
    /// The current video finished naturally.
    Ended,
}

/// Command surface of the embedded video player.
///
/// Implementations wrap whatever player object the host environment supplies.
/// All commands are best-effort: the player may not be ready yet, may have
/// been torn down during navigation, or may reject an unknown video id.
/// Callers are expected to consult [`is_ready`](VideoPlayer::is_ready)
/// (typically through a bounded readiness wait) before issuing commands.
#[async_trait]
pub trait VideoPlayer: Send + Sync {
    /// Whether the underlying player object exists and has finished loading.
    ///
    /// This is a cheap, non-blocking probe; it never waits.
    fn is_ready(&self) -> bool;

    /// Load the given video and start playback, reusing the existing player
    /// instance when one is already cued.
    async fn cue_or_play(&self, video_id: &str) -> Result<()>;

    /// Pause playback, keeping the current video and position.
    async fn pause(&self) -> Result<()>;

    /// Resume playback after a pause.
    async fn resume(&self) -> Result<()>;

    /// Seek to an absolute position in seconds within the current video.
    async fn seek_to(&self, seconds: f64) -> Result<()>;

    /// Current playback position in seconds, for progress display and for
    /// restoring position when the player is re-parented by the host.
    async fn current_time(&self) -> Result<f64>;
}
