//! # Host-Local Bridge Implementations
//!
//! Reference implementations of the bridge traits for environments where the
//! core runs against local resources rather than a browser page:
//!
//! - [`MemoryStateStore`] - ephemeral in-memory storage, the default for tests
//! - [`JsonFileStateStore`] - a single JSON file on disk, mirroring the shape
//!   of the web host's localStorage for desktop and development use
//! - [`ReqwestHttpClient`] - HTTP client with retry and connection pooling
//!
//! No [`VideoPlayer`](bridge_traits::player::VideoPlayer) implementation
//! lives here: the player is always supplied by the embedding host.

mod http;
mod store;

pub use http::ReqwestHttpClient;
pub use store::{JsonFileStateStore, MemoryStateStore};
