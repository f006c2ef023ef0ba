//! # Core Sync
//!
//! Cloud preference sync for signed-in users: debounced pushes of the
//! locally persisted favorites/history/queue/playlists/preferences blobs,
//! and a merge-pull that reconciles local and server state on sign-in.
//!
//! The remote protocol is not modeled beyond opaque endpoint paths and JSON
//! envelopes; authentication is an opaque bearer token held in the state
//! store. With no token present, every operation is a silent no-op.

pub mod coordinator;
pub mod error;
pub mod payload;

pub use coordinator::{SyncCoordinator, SyncKind, DEFAULT_DEBOUNCE};
pub use error::{Result, SyncError};
pub use payload::{LibrarySyncRequest, MergedLibrary, PreferencesPayload};
