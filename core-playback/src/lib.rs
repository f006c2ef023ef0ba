//! # Core Playback
//!
//! The playback coordinator for the Tunedeck client core: given "next",
//! "previous", or a direct play request, it resolves what should play
//! (queue first, then repeat/shuffle/order rules over the active chart
//! context) and drives the host's embedded player through the
//! [`VideoPlayer`](bridge_traits::player::VideoPlayer) bridge.
//!
//! The coordinator owns no user state; favorites, history, queue, and
//! settings live in [`core_state::StateContainer`] and are borrowed per
//! call, keeping a single mutation path and a DOM-free test surface.

pub mod context;
pub mod coordinator;
pub mod error;
pub mod readiness;

pub use context::ChartContext;
pub use coordinator::{Advance, PlaybackCoordinator};
pub use error::ReadyError;
pub use readiness::{wait_until_ready, DEFAULT_POLL_INTERVAL, DEFAULT_READY_TIMEOUT};
