//! # Core Runtime
//!
//! Shared runtime infrastructure for the Tunedeck client core:
//!
//! - [`config`] - host configuration with fail-fast capability validation
//! - [`events`] - typed event bus decoupling state changes from rendering
//! - [`logging`] - `tracing` subscriber bootstrap
//! - [`error`] - runtime-level error type

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{CoreConfig, CoreConfigBuilder, FeatureFlags};
pub use error::{Error, Result};
pub use events::{CoreEvent, EventBus, LibraryEvent, PlaybackEvent, SyncEvent};
pub use logging::{init_logging, LogFormat, LoggingConfig};
