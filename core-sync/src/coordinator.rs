//! Sync Coordinator
//!
//! Pushes locally persisted preference blobs to the remote API and pulls the
//! server's merged view on sign-in. All operations require a bearer token in
//! the state store; signed-out, everything is a silent no-op.
//!
//! Pushes are debounced: a burst of toggles arms a single timer per kind,
//! and the flush reads the *current* persisted blob at send time rather than
//! a snapshot captured when the burst began. Each kind carries a
//! pending-local-change flag from the first `mark_dirty` until the flush
//! attempt finishes; a pull never overwrites a kind whose flag is set, so a
//! slow push cannot be clobbered by a concurrent merge. The flag clears even
//! when the push fails; a dead network must not wedge future pulls.

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use core_runtime::events::{CoreEvent, EventBus, SyncEvent};
use core_state::types::PlaybackSettings;
use core_state::{keys, RepeatMode, StateContainer, StoreAdapter};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{Result, SyncError};
use crate::payload::{LibrarySyncRequest, MergedLibrary, PreferencesPayload};

/// Default debounce window before a dirty kind is pushed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// The independently synced slices of user data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncKind {
    Favorites,
    History,
    Queue,
    Playlists,
    Preferences,
}

impl SyncKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncKind::Favorites => "favorites",
            SyncKind::History => "history",
            SyncKind::Queue => "queue",
            SyncKind::Playlists => "playlists",
            SyncKind::Preferences => "preferences",
        }
    }

    fn endpoint(&self) -> &'static str {
        match self {
            SyncKind::Favorites => "/api/me/favorites",
            SyncKind::History => "/api/me/history",
            SyncKind::Queue => "/api/me/queue",
            SyncKind::Playlists => "/api/me/playlists",
            SyncKind::Preferences => "/api/me/preferences",
        }
    }
}

struct SyncShared {
    http: Arc<dyn HttpClient>,
    store: StoreAdapter,
    events: EventBus,
    api_base_url: String,
    pending: Mutex<HashSet<SyncKind>>,
}

impl SyncShared {
    async fn bearer_token(&self) -> Result<String> {
        self.store
            .load_string(keys::ACCESS_TOKEN)
            .await
            .filter(|t| !t.is_empty())
            .ok_or(SyncError::NotAuthenticated)
    }

    /// Build the PUT body for one kind from the *currently persisted* state.
    async fn body_for(&self, kind: SyncKind) -> Value {
        let empty = Value::Array(Vec::new());
        match kind {
            SyncKind::Favorites => {
                let favorites: Value = self.store.load_json(keys::FAVORITES, empty).await;
                json!({ "favorites": favorites })
            }
            SyncKind::History => {
                let history: Value = self.store.load_json(keys::HISTORY, empty).await;
                let played: u64 = self
                    .store
                    .load_string(keys::SONGS_PLAYED)
                    .await
                    .and_then(|raw| raw.parse().ok())
                    .unwrap_or(0);
                json!({ "history": history, "total_songs_played": played })
            }
            SyncKind::Queue => {
                let queue: Value = self.store.load_json(keys::QUEUE, empty).await;
                json!({ "queue": queue })
            }
            SyncKind::Playlists => {
                let playlists: Value = self.store.load_json(keys::PLAYLISTS, empty).await;
                json!({ "playlists": playlists })
            }
            SyncKind::Preferences => {
                let shuffle = self
                    .store
                    .load_string(keys::SHUFFLE)
                    .await
                    .map(|raw| raw == "true")
                    .unwrap_or(false);
                let repeat = self
                    .store
                    .load_string(keys::REPEAT)
                    .await
                    .unwrap_or_else(|| "off".to_string());
                json!({ "shuffle": shuffle, "repeat": repeat })
            }
        }
    }

    /// Push one kind to its endpoint. The pending flag clears regardless of
    /// the outcome.
    async fn push(&self, kind: SyncKind) -> Result<()> {
        let result = self.push_inner(kind).await;
        self.pending.lock().unwrap().remove(&kind);

        match &result {
            Ok(()) => {
                self.events.emit(CoreEvent::Sync(SyncEvent::Completed {
                    kind: kind.as_str().to_string(),
                }));
            }
            Err(SyncError::NotAuthenticated) => {}
            Err(e) => {
                self.events.emit(CoreEvent::Sync(SyncEvent::Failed {
                    kind: kind.as_str().to_string(),
                    message: e.to_string(),
                    recoverable: true,
                }));
            }
        }
        result
    }

    async fn push_inner(&self, kind: SyncKind) -> Result<()> {
        let token = self.bearer_token().await?;

        self.events.emit(CoreEvent::Sync(SyncEvent::Started {
            kind: kind.as_str().to_string(),
        }));

        let body = self.body_for(kind).await;
        let request = HttpRequest::new(
            HttpMethod::Put,
            format!("{}{}", self.api_base_url, kind.endpoint()),
        )
        .bearer_token(token)
        .json(&body)?;

        let response = self.http.execute(request).await?;
        if !response.is_success() {
            return Err(SyncError::RejectedStatus(response.status));
        }

        debug!(kind = kind.as_str(), "Pushed to cloud");
        Ok(())
    }
}

pub struct SyncCoordinator {
    shared: Arc<SyncShared>,
    debounce: Duration,
    timers: Mutex<HashMap<SyncKind, JoinHandle<()>>>,
}

impl SyncCoordinator {
    pub fn new(
        http: Arc<dyn HttpClient>,
        store: StoreAdapter,
        events: EventBus,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            shared: Arc::new(SyncShared {
                http,
                store,
                events,
                api_base_url: api_base_url.into(),
                pending: Mutex::new(HashSet::new()),
            }),
            debounce: DEFAULT_DEBOUNCE,
            timers: Mutex::new(HashMap::new()),
        }
    }

    /// Override the debounce window (tests use a short one).
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Persist the bearer token after sign-in.
    pub async fn store_token(&self, token: &str) {
        self.shared
            .store
            .save_string(keys::ACCESS_TOKEN, token)
            .await;
    }

    /// Drop the bearer token on sign-out; subsequent pushes become no-ops.
    pub async fn clear_token(&self) {
        if let Err(e) = self.shared.store.raw().remove(keys::ACCESS_TOKEN).await {
            warn!(error = %e, "Failed to remove access token");
        }
    }

    /// Whether a kind currently has an unflushed local change.
    pub fn has_pending(&self, kind: SyncKind) -> bool {
        self.shared.pending.lock().unwrap().contains(&kind)
    }

    /// Record a local change to `kind` and (re)arm its debounce timer.
    ///
    /// Repeated calls within the window coalesce into one push, which reads
    /// whatever is persisted when the timer fires.
    pub fn mark_dirty(&self, kind: SyncKind) {
        self.shared.pending.lock().unwrap().insert(kind);

        let shared = self.shared.clone();
        let debounce = self.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            match shared.push(kind).await {
                Ok(()) => {}
                Err(SyncError::NotAuthenticated) => {
                    debug!(kind = kind.as_str(), "Skipping push while signed out");
                }
                Err(e) => warn!(kind = kind.as_str(), error = %e, "Push failed"),
            }
        });

        if let Some(previous) = self.timers.lock().unwrap().insert(kind, handle) {
            previous.abort();
        }
    }

    /// Push `kind` immediately, bypassing the debounce window.
    pub async fn flush_now(&self, kind: SyncKind) -> Result<()> {
        if let Some(timer) = self.timers.lock().unwrap().remove(&kind) {
            timer.abort();
        }
        self.shared.pending.lock().unwrap().insert(kind);
        self.shared.push(kind).await
    }

    /// Merge the local library with the server's on sign-in.
    ///
    /// The full local state is POSTed; the server's merged arrays replace
    /// local ones, except for kinds with a pending local change, which keep
    /// their local (newer) data until their push lands. The lifetime play
    /// counter merges by max.
    pub async fn merge_pull(&self, state: &mut StateContainer) -> Result<()> {
        let token = self.shared.bearer_token().await?;

        self.shared.events.emit(CoreEvent::Sync(SyncEvent::Started {
            kind: "library".to_string(),
        }));

        let settings = state.settings().settings();
        let request_body = LibrarySyncRequest {
            local_favorites: state.favorites().entries().to_vec(),
            local_history: state.history().entries().to_vec(),
            local_queue: state.queue().entries().to_vec(),
            local_playlists: state.playlists().snapshot(),
            local_preferences: PreferencesPayload {
                shuffle: settings.shuffle,
                repeat: settings.repeat.as_str().to_string(),
            },
            local_total_songs_played: state.history().songs_played(),
        };

        let request = HttpRequest::new(
            HttpMethod::Post,
            format!("{}/api/me/library/sync", self.shared.api_base_url),
        )
        .bearer_token(token)
        .json(&request_body)?;

        let merged = match self.fetch_merged(request).await {
            Ok(merged) => merged,
            Err(e) => {
                self.shared.events.emit(CoreEvent::Sync(SyncEvent::Failed {
                    kind: "library".to_string(),
                    message: e.to_string(),
                    recoverable: true,
                }));
                return Err(e);
            }
        };

        self.apply_merged(state, merged).await;

        self.shared
            .events
            .emit(CoreEvent::Sync(SyncEvent::Completed {
                kind: "library".to_string(),
            }));
        Ok(())
    }

    async fn fetch_merged(&self, request: HttpRequest) -> Result<MergedLibrary> {
        let response = self.shared.http.execute(request).await?;
        if !response.is_success() {
            return Err(SyncError::RejectedStatus(response.status));
        }
        response
            .json()
            .map_err(|e| SyncError::UnexpectedResponse(e.to_string()))
    }

    async fn apply_merged(&self, state: &mut StateContainer, merged: MergedLibrary) {
        let pending = self.shared.pending.lock().unwrap().clone();

        if !pending.contains(&SyncKind::Favorites) {
            if let Some(favorites) = merged.merged_favorites {
                state.favorites_mut().replace(favorites).await;
            }
        }
        if !pending.contains(&SyncKind::History) {
            if let Some(history) = merged.merged_history {
                state.history_mut().replace(history).await;
            }
        }
        if !pending.contains(&SyncKind::Queue) {
            if let Some(queue) = merged.merged_queue {
                state.queue_mut().replace(queue).await;
            }
        }
        if !pending.contains(&SyncKind::Playlists) {
            if let Some(playlists) = merged.merged_playlists {
                state.playlists_mut().replace(playlists).await;
            }
        }
        if !pending.contains(&SyncKind::Preferences) {
            if let Some(preferences) = merged.preferences {
                state
                    .settings_mut()
                    .replace(PlaybackSettings {
                        shuffle: preferences.shuffle,
                        repeat: RepeatMode::parse_or_default(&preferences.repeat),
                    })
                    .await;
            }
        }
        if let Some(total) = merged.total_songs_played {
            state.history_mut().merge_songs_played(total).await;
        }
    }
}
