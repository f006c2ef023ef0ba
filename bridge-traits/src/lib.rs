//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host
//! environment embedding the Tunedeck client core.
//!
//! ## Overview
//!
//! This crate defines the contract between the core modules and the page or
//! application hosting them. Each trait represents a capability the core
//! requires but that is necessarily owned by the host: persistent key-value
//! storage, the embedded video player, HTTP access to the remote API, and a
//! time source.
//!
//! ## Traits
//!
//! - [`StateStore`](storage::StateStore) - Keyed string storage (localStorage analog)
//! - [`VideoPlayer`](player::VideoPlayer) - Command surface of the embedded player
//! - [`HttpClient`](http::HttpClient) - Async JSON HTTP against the remote API
//! - [`Clock`](time::Clock) - Injectable time source for deterministic testing
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Host
//! implementations should convert platform-specific failures into it and keep
//! messages actionable; the core maps bridge failures onto recoverable,
//! user-visible notifications rather than propagating them as faults.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so implementations can be shared
//! across async tasks behind `Arc`.

pub mod error;
pub mod http;
pub mod player;
pub mod storage;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use player::{PlayerSignal, VideoPlayer};
pub use storage::StateStore;
pub use time::{Clock, FixedClock, SystemClock};
