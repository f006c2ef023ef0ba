use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Not signed in; no access token available")]
    NotAuthenticated,

    #[error("Remote API rejected the request with status {0}")]
    RejectedStatus(u16),

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
