//! Integration tests for the playback coordinator against a scripted mock
//! player and the in-memory store bridge.

use async_trait::async_trait;
use bridge_local::MemoryStateStore;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::player::{PlayerSignal, VideoPlayer};
use bridge_traits::time::FixedClock;
use core_playback::{Advance, PlaybackCoordinator};
use core_runtime::events::EventBus;
use core_state::types::Song;
use core_state::StateContainer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock player that records every cue command and whose readiness is
/// scriptable per test.
struct MockPlayer {
    ready: AtomicBool,
    cued: Mutex<Vec<String>>,
}

impl MockPlayer {
    fn ready() -> Arc<Self> {
        Arc::new(Self {
            ready: AtomicBool::new(true),
            cued: Mutex::new(Vec::new()),
        })
    }

    fn never_ready() -> Arc<Self> {
        Arc::new(Self {
            ready: AtomicBool::new(false),
            cued: Mutex::new(Vec::new()),
        })
    }

    fn cued(&self) -> Vec<String> {
        self.cued.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoPlayer for MockPlayer {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn cue_or_play(&self, video_id: &str) -> BridgeResult<()> {
        self.cued.lock().unwrap().push(video_id.to_string());
        Ok(())
    }

    async fn pause(&self) -> BridgeResult<()> {
        Ok(())
    }

    async fn resume(&self) -> BridgeResult<()> {
        Ok(())
    }

    async fn seek_to(&self, _seconds: f64) -> BridgeResult<()> {
        Ok(())
    }

    async fn current_time(&self) -> BridgeResult<f64> {
        Ok(0.0)
    }
}

fn chart(n: usize) -> Vec<Song> {
    (0..n)
        .map(|i| {
            Song::new(
                format!("Chart Song {}", i),
                format!("Chart Artist {}", i),
                format!("chart-vid-{}", i),
            )
        })
        .collect()
}

async fn fresh_state() -> StateContainer {
    StateContainer::load(
        Arc::new(MemoryStateStore::new()),
        Arc::new(FixedClock::new(1_700_000_000_000)),
        EventBus::default(),
    )
    .await
}

fn coordinator(player: Arc<MockPlayer>, songs: Vec<Song>) -> PlaybackCoordinator {
    let mut coordinator = PlaybackCoordinator::new(player, EventBus::default());
    coordinator.context_mut().set_songs(songs);
    coordinator
}

fn played_title(advance: &Advance) -> &str {
    match advance {
        Advance::Played(song) => &song.title,
        other => panic!("expected Played, got {:?}", other),
    }
}

#[tokio::test]
async fn queue_preempts_chart_order_fifo() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player.clone(), chart(25));
    coordinator.play_at(&mut state, 0).await;

    // Enqueue the songs at chart positions 5 and 10, in that order.
    let a = coordinator.context().song_at(5).cloned().unwrap();
    let b = coordinator.context().song_at(10).cloned().unwrap();
    state.queue_mut().enqueue(a.clone(), false).await;
    state.queue_mut().enqueue(b.clone(), false).await;

    assert_eq!(played_title(&coordinator.next(&mut state).await), a.title);
    assert_eq!(played_title(&coordinator.next(&mut state).await), b.title);

    // Queue drained: normal order resumes from the untouched chart index.
    assert_eq!(
        played_title(&coordinator.next(&mut state).await),
        "Chart Song 1"
    );
    let expected: Vec<String> = vec![
        "chart-vid-0".to_string(),
        a.video_id,
        b.video_id,
        "chart-vid-1".to_string(),
    ];
    assert_eq!(player.cued(), expected);
}

#[tokio::test]
async fn repeat_one_replays_the_current_song() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player.clone(), chart(5));

    coordinator.play_at(&mut state, 2).await;

    // off -> all -> one
    state.settings_mut().cycle_repeat().await;
    state.settings_mut().cycle_repeat().await;

    assert_eq!(
        played_title(&coordinator.next(&mut state).await),
        "Chart Song 2"
    );
    assert_eq!(coordinator.context().current_index(), Some(2));
}

#[tokio::test]
async fn queue_preempts_even_repeat_one() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player, chart(5));

    coordinator.play_at(&mut state, 2).await;
    state.settings_mut().cycle_repeat().await;
    state.settings_mut().cycle_repeat().await;

    let queued = Song::new("Jumped Ahead", "Queue Artist", "queued-vid");
    state.queue_mut().enqueue(queued, true).await;

    assert_eq!(
        played_title(&coordinator.next(&mut state).await),
        "Jumped Ahead"
    );
}

#[tokio::test]
async fn repeat_all_wraps_to_the_top() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player, chart(3));

    coordinator.play_at(&mut state, 2).await;
    state.settings_mut().cycle_repeat().await; // all

    assert_eq!(
        played_title(&coordinator.next(&mut state).await),
        "Chart Song 0"
    );
    assert_eq!(coordinator.context().current_index(), Some(0));
}

#[tokio::test]
async fn repeat_off_at_the_end_is_a_noop() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player.clone(), chart(3));

    coordinator.play_at(&mut state, 2).await;

    assert_eq!(coordinator.next(&mut state).await, Advance::Stayed);
    assert_eq!(coordinator.context().current_index(), Some(2));
    // Only the initial play reached the player.
    assert_eq!(player.cued().len(), 1);
}

#[tokio::test]
async fn previous_steps_back_and_clamps_at_zero() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player, chart(5));

    coordinator.play_at(&mut state, 1).await;

    assert_eq!(
        played_title(&coordinator.previous(&mut state).await),
        "Chart Song 0"
    );

    // At the first song, previous stays put even with repeat-all on.
    state.settings_mut().cycle_repeat().await;
    assert_eq!(coordinator.previous(&mut state).await, Advance::Stayed);
    assert_eq!(coordinator.context().current_index(), Some(0));
}

#[tokio::test]
async fn shuffle_avoids_immediate_repetition() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    // With a two-song context, "avoid the current index" is deterministic.
    let mut coordinator = coordinator(player, chart(2));

    coordinator.play_at(&mut state, 0).await;
    state.settings_mut().toggle_shuffle().await;

    for _ in 0..10 {
        let before = coordinator.context().current_index().unwrap();
        coordinator.next(&mut state).await;
        let after = coordinator.context().current_index().unwrap();
        assert_ne!(before, after);
    }
}

#[tokio::test]
async fn shuffle_on_single_song_context_replays_it() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player, chart(1));

    coordinator.play_at(&mut state, 0).await;
    state.settings_mut().toggle_shuffle().await;

    assert_eq!(
        played_title(&coordinator.next(&mut state).await),
        "Chart Song 0"
    );
}

#[tokio::test]
async fn ended_signal_advances_to_the_next_song() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player, chart(5));

    coordinator.play_at(&mut state, 0).await;

    let advance = coordinator
        .on_player_signal(&mut state, PlayerSignal::Ended)
        .await;
    assert_eq!(played_title(&advance), "Chart Song 1");
}

#[tokio::test]
async fn plays_are_recorded_into_history() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player, chart(5));

    coordinator.play_at(&mut state, 0).await;
    coordinator.next(&mut state).await;

    assert_eq!(state.history().len(), 2);
    // Most recent play first.
    assert_eq!(state.history().entries()[0].song.title, "Chart Song 1");
    assert_eq!(state.history().songs_played(), 2);
}

#[tokio::test]
async fn next_with_nothing_playing_starts_at_the_top() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player, chart(5));

    assert_eq!(
        played_title(&coordinator.next(&mut state).await),
        "Chart Song 0"
    );
}

#[tokio::test]
async fn empty_context_and_queue_resolve_to_nothing() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player, Vec::new());

    assert_eq!(coordinator.next(&mut state).await, Advance::Stayed);
    assert_eq!(coordinator.previous(&mut state).await, Advance::Stayed);
}

#[tokio::test]
async fn one_off_play_leaves_the_context_index_alone() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player, chart(5));

    coordinator.play_at(&mut state, 3).await;

    let from_favorites = Song::new("Elsewhere", "Side Artist", "fav-vid");
    let advance = coordinator.play_song(&mut state, from_favorites).await;

    assert_eq!(played_title(&advance), "Elsewhere");
    assert_eq!(coordinator.context().current_index(), Some(3));
    assert_eq!(coordinator.now_playing().unwrap().title, "Elsewhere");
    assert_eq!(state.history().entries()[0].song.title, "Elsewhere");
}

#[tokio::test]
async fn play_at_out_of_range_is_a_noop() {
    let player = MockPlayer::ready();
    let mut state = fresh_state().await;
    let mut coordinator = coordinator(player, chart(3));

    assert_eq!(coordinator.play_at(&mut state, 99).await, Advance::Stayed);
}

#[tokio::test(start_paused = true)]
async fn unready_player_abandons_without_moving_the_index() {
    let player = MockPlayer::never_ready();
    let mut state = fresh_state().await;
    let mut coordinator = PlaybackCoordinator::new(player.clone(), EventBus::default())
        .with_readiness(Duration::from_secs(2), Duration::from_millis(100));
    coordinator.context_mut().set_songs(chart(5));

    let advance = coordinator.play_at(&mut state, 3).await;

    assert_eq!(advance, Advance::Abandoned);
    assert_eq!(coordinator.context().current_index(), None);
    assert!(player.cued().is_empty());
    assert!(state.history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn abandoned_advance_keeps_history_clean() {
    let player = MockPlayer::never_ready();
    let mut state = fresh_state().await;
    let mut coordinator = PlaybackCoordinator::new(player, EventBus::default())
        .with_readiness(Duration::from_millis(500), Duration::from_millis(50));
    coordinator.context_mut().set_songs(chart(5));

    state
        .queue_mut()
        .enqueue(Song::new("Queued", "Artist", "qv"), false)
        .await;

    assert_eq!(coordinator.next(&mut state).await, Advance::Abandoned);
    assert!(state.history().is_empty());
    // The queued song was not consumed; the user can retry.
    assert_eq!(state.queue().len(), 1);
}
