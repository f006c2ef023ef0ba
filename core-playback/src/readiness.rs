//! Player Readiness Wait
//!
//! The embedded player loads asynchronously; a play command issued before it
//! is ready is silently lost by the host component. This module polls the
//! readiness flag under a bounded deadline, and the wait is cancellable so a
//! superseded action (user started a different song, navigated away) can
//! never fire a stale play command afterward.

use bridge_traits::player::VideoPlayer;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::ReadyError;

/// Default deadline before a play action is abandoned.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Default interval between readiness probes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Poll `player` until it reports ready, the deadline passes, or `cancel`
/// fires.
///
/// On timeout the caller abandons the action (no automatic retry); on
/// cancellation the caller stays silent, since a newer action owns the
/// player now.
pub async fn wait_until_ready(
    player: &dyn VideoPlayer,
    timeout: Duration,
    poll_interval: Duration,
    cancel: &CancellationToken,
) -> Result<(), ReadyError> {
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        if cancel.is_cancelled() {
            return Err(ReadyError::Cancelled);
        }
        if player.is_ready() {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(ReadyError::TimedOut);
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(ReadyError::Cancelled),
            _ = tokio::time::sleep(poll_interval) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FlaggedPlayer {
        ready: AtomicBool,
    }

    #[async_trait]
    impl VideoPlayer for FlaggedPlayer {
        fn is_ready(&self) -> bool {
            self.ready.load(Ordering::SeqCst)
        }
        async fn cue_or_play(&self, _video_id: &str) -> BridgeResult<()> {
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

    #[tokio::test]
    async fn ready_player_returns_immediately() {
        let player = FlaggedPlayer {
            ready: AtomicBool::new(true),
        };
        let cancel = CancellationToken::new();

        let result = wait_until_ready(
            &player,
            DEFAULT_READY_TIMEOUT,
            DEFAULT_POLL_INTERVAL,
            &cancel,
        )
        .await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn never_ready_player_times_out() {
        let player = FlaggedPlayer {
            ready: AtomicBool::new(false),
        };
        let cancel = CancellationToken::new();

        let result = wait_until_ready(
            &player,
            Duration::from_secs(5),
            Duration::from_millis(100),
            &cancel,
        )
        .await;
        assert_eq!(result, Err(ReadyError::TimedOut));
    }

    #[tokio::test]
    async fn pre_cancelled_wait_never_fires() {
        let player = FlaggedPlayer {
            ready: AtomicBool::new(true),
        };
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = wait_until_ready(
            &player,
            DEFAULT_READY_TIMEOUT,
            DEFAULT_POLL_INTERVAL,
            &cancel,
        )
        .await;
        assert_eq!(result, Err(ReadyError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_a_pending_wait() {
        let player = std::sync::Arc::new(FlaggedPlayer {
            ready: AtomicBool::new(false),
        });
        let cancel = CancellationToken::new();

        let waiter = {
            let player = player.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                wait_until_ready(
                    player.as_ref(),
                    Duration::from_secs(60),
                    Duration::from_millis(100),
                    &cancel,
                )
                .await
            })
        };

        tokio::time::sleep(Duration::from_millis(250)).await;
        cancel.cancel();

        assert_eq!(waiter.await.unwrap(), Err(ReadyError::Cancelled));
    }
}
