//! Playback Coordinator
//!
//! Decides what plays next and drives the embedded player. Resolution
//! precedence, evaluated in order:
//!
//! 1. the queue, which always pre-empts the chart/playlist context;
//! 2. repeat-one, replaying the current song unchanged;
//! 3. shuffle, picking a random context index that avoids immediate
//!    repetition whenever the context holds more than one song;
//! 4. normal order, advancing by one;
//! 5. at the end of the context: repeat-all wraps to the top, repeat-off
//!    stays put ("next" becomes a no-op signal, not an error).
//!
//! "Previous" is deliberately asymmetric: it clamps at the first song and
//! never wraps, regardless of repeat mode.

use bridge_traits::player::{PlayerSignal, VideoPlayer};
use core_runtime::events::{CoreEvent, EventBus, PlaybackEvent};
use core_state::types::{RepeatMode, Song};
use core_state::StateContainer;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::context::ChartContext;
use crate::error::ReadyError;
use crate::readiness::{wait_until_ready, DEFAULT_POLL_INTERVAL, DEFAULT_READY_TIMEOUT};

/// Outcome of a next/previous/play request.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// A song was resolved and handed to the player.
    Played(Song),
    /// The request resolved to nothing: end of context with repeat off,
    /// previous at the first song, or an empty context and queue. The
    /// playing position is unchanged.
    Stayed,
    /// The player was unavailable or rejected the command; the action was
    /// abandoned and can be re-invoked by the user.
    Abandoned,
}

pub struct PlaybackCoordinator {
    player: Arc<dyn VideoPlayer>,
    events: EventBus,
    context: ChartContext,
    now_playing: Option<Song>,
    ready_timeout: Duration,
    poll_interval: Duration,
    cancel: CancellationToken,
}

impl PlaybackCoordinator {
    pub fn new(player: Arc<dyn VideoPlayer>, events: EventBus) -> Self {
        Self {
            player,
            events,
            context: ChartContext::default(),
            now_playing: None,
            ready_timeout: DEFAULT_READY_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            cancel: CancellationToken::new(),
        }
    }

    /// Override the readiness deadline and probe interval.
    pub fn with_readiness(mut self, timeout: Duration, poll_interval: Duration) -> Self {
        self.ready_timeout = timeout;
        self.poll_interval = poll_interval;
        self
    }

    pub fn context(&self) -> &ChartContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ChartContext {
        &mut self.context
    }

    /// The song most recently handed to the player, if any. May be a queue
    /// entry that does not appear in the active context.
    pub fn now_playing(&self) -> Option<&Song> {
        self.now_playing.as_ref()
    }

    /// Play the song at `index` in the active context (a chart row click).
    pub async fn play_at(&mut self, state: &mut StateContainer, index: usize) -> Advance {
        let Some(song) = self.context.song_at(index).cloned() else {
            return Advance::Stayed;
        };
        self.hand_to_player(state, song, Some(index)).await
    }

    /// Play a song outside the context (favorites panel, history, a regional
    /// card). The context index is left untouched.
    pub async fn play_song(&mut self, state: &mut StateContainer, song: Song) -> Advance {
        self.hand_to_player(state, song, None).await
    }

    /// Advance to the next song per the precedence rules.
    pub async fn next(&mut self, state: &mut StateContainer) -> Advance {
        // 1. Queue pre-empts everything, including repeat-one. The entry is
        // only removed once the player actually accepted it, so an abandoned
        // action leaves the queue intact for a retry.
        if let Some(entry) = state.queue().entries().first().cloned() {
            debug!(title = %entry.song.title, "Playing from queue");
            let advance = self.hand_to_player(state, entry.song, None).await;
            if matches!(advance, Advance::Played(_)) {
                state.queue_mut().remove(entry.id).await;
            }
            return advance;
        }

        let settings = state.settings().settings();

        // 2. Repeat-one replays the current song unchanged.
        if settings.repeat == RepeatMode::One {
            if let Some(song) = self.now_playing.clone() {
                return self.hand_to_player(state, song, None).await;
            }
        }

        if self.context.is_empty() {
            return Advance::Stayed;
        }

        // 3. Shuffle picks a random index, avoiding immediate repetition.
        if settings.shuffle {
            let index = self.random_index();
            let Some(song) = self.context.song_at(index).cloned() else {
                return Advance::Stayed;
            };
            return self.hand_to_player(state, song, Some(index)).await;
        }

        // 4./5. Normal order, with the wrap/stop boundary.
        let target = match self.context.current_index() {
            None => 0,
            Some(i) if i + 1 < self.context.len() => i + 1,
            Some(_) => match settings.repeat {
                RepeatMode::All => 0,
                _ => {
                    self.events
                        .emit(CoreEvent::Playback(PlaybackEvent::ReachedEnd));
                    return Advance::Stayed;
                }
            },
        };

        let Some(song) = self.context.song_at(target).cloned() else {
            return Advance::Stayed;
        };
        self.hand_to_player(state, song, Some(target)).await
    }

    /// Step back one song in the context. Clamps at the first song and never
    /// wraps; the queue and repeat-one do not apply to "previous".
    pub async fn previous(&mut self, state: &mut StateContainer) -> Advance {
        match self.context.current_index() {
            Some(i) if i > 0 => {
                let Some(song) = self.context.song_at(i - 1).cloned() else {
                    return Advance::Stayed;
                };
                self.hand_to_player(state, song, Some(i - 1)).await
            }
            _ => Advance::Stayed,
        }
    }

    /// Map a host-forwarded player signal onto coordinator behavior.
    ///
    /// `Ended` triggers an automatic advance; `Playing`/`Paused` are
    /// re-broadcast so the renderer can sync the play/pause button.
    pub async fn on_player_signal(
        &mut self,
        state: &mut StateContainer,
        signal: PlayerSignal,
    ) -> Advance {
        match signal {
            PlayerSignal::Playing => {
                self.events.emit(CoreEvent::Playback(PlaybackEvent::Resumed));
                Advance::Stayed
            }
            PlayerSignal::Paused => {
                self.events.emit(CoreEvent::Playback(PlaybackEvent::Paused));
                Advance::Stayed
            }
            PlayerSignal::Ended => self.next(state).await,
        }
    }

    /// Pause the player. Failures are logged and swallowed: the player bar
    /// simply stays as-is and the user can press pause again.
    pub async fn pause(&self) {
        if let Err(e) = self.player.pause().await {
            warn!(error = %e, "Pause command failed");
            return;
        }
        self.events.emit(CoreEvent::Playback(PlaybackEvent::Paused));
    }

    /// Resume the player after a pause.
    pub async fn resume(&self) {
        if let Err(e) = self.player.resume().await {
            warn!(error = %e, "Resume command failed");
            return;
        }
        self.events.emit(CoreEvent::Playback(PlaybackEvent::Resumed));
    }

    /// Random context index, excluding the current one whenever the context
    /// holds more than one song.
    fn random_index(&self) -> usize {
        let len = self.context.len();
        let mut rng = rand::thread_rng();
        loop {
            let index = rng.gen_range(0..len);
            if len == 1 || Some(index) != self.context.current_index() {
                return index;
            }
        }
    }

    /// Supersede any pending readiness wait and start a fresh action.
    fn begin_action(&mut self) -> CancellationToken {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.cancel.clone()
    }

    /// Wait for the player, issue the play command, and only then commit the
    /// context index, history entry, and now-playing state. An abandoned
    /// action leaves everything where it was, so re-invoking the same user
    /// action resolves the same song again.
    async fn hand_to_player(
        &mut self,
        state: &mut StateContainer,
        song: Song,
        context_index: Option<usize>,
    ) -> Advance {
        let cancel = self.begin_action();

        match wait_until_ready(
            self.player.as_ref(),
            self.ready_timeout,
            self.poll_interval,
            &cancel,
        )
        .await
        {
            Ok(()) => {}
            Err(ReadyError::Cancelled) => {
                // A newer action owns the player; stay silent.
                return Advance::Abandoned;
            }
            Err(ReadyError::TimedOut) => {
                warn!(title = %song.title, "Player not ready, abandoning play action");
                self.events.emit(CoreEvent::Playback(PlaybackEvent::Error {
                    message: "Player is not ready yet".to_string(),
                    recoverable: true,
                }));
                return Advance::Abandoned;
            }
        }

        if let Err(e) = self.player.cue_or_play(&song.video_id).await {
            warn!(error = %e, title = %song.title, "Play command failed");
            self.events.emit(CoreEvent::Playback(PlaybackEvent::Error {
                message: format!("Could not start playback: {}", e),
                recoverable: true,
            }));
            return Advance::Abandoned;
        }

        if let Some(index) = context_index {
            self.context.set_current(index);
        }
        state.history_mut().record(&song).await;
        self.now_playing = Some(song.clone());

        self.events.emit(CoreEvent::Playback(PlaybackEvent::Started {
            video_id: song.video_id.clone(),
            title: song.title.clone(),
            artist: song.artist.clone(),
        }));

        Advance::Played(song)
    }
}
