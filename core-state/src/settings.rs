//! Playback Settings Manager
//!
//! Shuffle flag and tri-state repeat mode. Both persist as bare strings
//! (`"true"`/`"false"` and the mode name), matching what the web host wrote,
//! and both operations return the new value for immediate UI sync.

use core_runtime::events::{CoreEvent, EventBus, LibraryEvent};

use crate::keys;
use crate::store::StoreAdapter;
use crate::types::{PlaybackSettings, RepeatMode};

pub struct SettingsManager {
    settings: PlaybackSettings,
    store: StoreAdapter,
    events: EventBus,
}

impl SettingsManager {
    /// Rehydrate settings; unrecognized persisted values fall back to the
    /// defaults (shuffle off, repeat off).
    pub async fn load(store: StoreAdapter, events: EventBus) -> Self {
        let shuffle = store
            .load_string(keys::SHUFFLE)
            .await
            .map(|raw| raw == "true")
            .unwrap_or(false);

        let repeat = store
            .load_string(keys::REPEAT)
            .await
            .map(|raw| RepeatMode::parse_or_default(&raw))
            .unwrap_or_default();

        Self {
            settings: PlaybackSettings { shuffle, repeat },
            store,
            events,
        }
    }

    /// Flip the shuffle flag and return the new value.
    pub async fn toggle_shuffle(&mut self) -> bool {
        self.settings.shuffle = !self.settings.shuffle;
        self.store
            .save_string(keys::SHUFFLE, if self.settings.shuffle { "true" } else { "false" })
            .await;
        self.events
            .emit(CoreEvent::Library(LibraryEvent::ShuffleChanged {
                enabled: self.settings.shuffle,
            }));
        self.settings.shuffle
    }

    /// Advance the repeat mode through off -> all -> one -> off and return
    /// the new mode.
    pub async fn cycle_repeat(&mut self) -> RepeatMode {
        self.settings.repeat = self.settings.repeat.cycle();
        self.store
            .save_string(keys::REPEAT, self.settings.repeat.as_str())
            .await;
        self.events
            .emit(CoreEvent::Library(LibraryEvent::RepeatChanged {
                mode: self.settings.repeat.as_str().to_string(),
            }));
        self.settings.repeat
    }

    pub fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    pub fn shuffle(&self) -> bool {
        self.settings.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.settings.repeat
    }

    /// Adopt merged preferences from the cloud and persist them.
    pub async fn replace(&mut self, settings: PlaybackSettings) {
        self.settings = settings;
        self.store
            .save_string(keys::SHUFFLE, if settings.shuffle { "true" } else { "false" })
            .await;
        self.store
            .save_string(keys::REPEAT, settings.repeat.as_str())
            .await;
    }
}
