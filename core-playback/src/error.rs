use thiserror::Error;

/// Failure modes of the bounded player-readiness wait.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyError {
    #[error("Player did not become ready before the deadline")]
    TimedOut,

    #[error("Wait cancelled by a superseding action")]
    Cancelled,
}
