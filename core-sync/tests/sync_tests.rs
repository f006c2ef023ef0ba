//! Integration tests for the sync coordinator against a scripted HTTP mock
//! and the in-memory store bridge.

use async_trait::async_trait;
use bridge_local::MemoryStateStore;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bridge_traits::time::FixedClock;
use bytes::Bytes;
use core_runtime::events::EventBus;
use core_state::types::Song;
use core_state::{RepeatMode, StateContainer, StoreAdapter};
use core_sync::{SyncCoordinator, SyncError, SyncKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// HTTP mock that records every request and answers with a canned response.
struct MockHttpClient {
    requests: Mutex<Vec<HttpRequest>>,
    status: u16,
    body: String,
    fail_transport: bool,
}

impl MockHttpClient {
    fn ok(body: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            status: 200,
            body: body.to_string(),
            fail_transport: false,
        })
    }

    fn status(status: u16) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            status,
            body: "{}".to_string(),
            fail_transport: false,
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            status: 0,
            body: String::new(),
            fail_transport: true,
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        if self.fail_transport {
            return Err(BridgeError::OperationFailed(
                "Connection refused".to_string(),
            ));
        }
        Ok(HttpResponse {
            status: self.status,
            headers: HashMap::new(),
            body: Bytes::from(self.body.clone()),
        })
    }
}

const API: &str = "https://api.example.test";

async fn fresh_state(store: Arc<MemoryStateStore>) -> StateContainer {
    StateContainer::load(
        store,
        Arc::new(FixedClock::new(1_700_000_000_000)),
        EventBus::default(),
    )
    .await
}

fn sync_with(http: Arc<MockHttpClient>, store: Arc<MemoryStateStore>) -> SyncCoordinator {
    SyncCoordinator::new(http, StoreAdapter::new(store), EventBus::default(), API)
}

fn song(n: usize) -> Song {
    Song::new(format!("Song {}", n), format!("Artist {}", n), format!("v{}", n))
}

#[tokio::test]
async fn push_without_token_is_a_silent_noop() {
    let http = MockHttpClient::ok("{}");
    let store = Arc::new(MemoryStateStore::new());
    let sync = sync_with(http.clone(), store);

    let result = sync.flush_now(SyncKind::Favorites).await;

    assert!(matches!(result, Err(SyncError::NotAuthenticated)));
    assert!(http.requests().is_empty());
    assert!(!sync.has_pending(SyncKind::Favorites));
}

#[tokio::test]
async fn flush_sends_the_currently_persisted_blob() {
    let http = MockHttpClient::ok("{}");
    let store = Arc::new(MemoryStateStore::new());
    let mut state = fresh_state(store.clone()).await;
    let sync = sync_with(http.clone(), store);

    sync.store_token("tok-123").await;
    state.favorites_mut().toggle(Some(&song(1))).await;
    // A second mutation after the first: the flush must see both.
    state.favorites_mut().toggle(Some(&song(2))).await;

    sync.flush_now(SyncKind::Favorites).await.unwrap();

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.url.ends_with("/api/me/favorites"));
    assert_eq!(
        request.headers.get("Authorization").map(String::as_str),
        Some("Bearer tok-123")
    );

    let body: serde_json::Value =
        serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
    assert_eq!(body["favorites"].as_array().unwrap().len(), 2);
    assert_eq!(body["favorites"][0]["title"], "Song 1");
}

#[tokio::test(start_paused = true)]
async fn rapid_dirty_marks_coalesce_into_one_push() {
    let http = MockHttpClient::ok("{}");
    let store = Arc::new(MemoryStateStore::new());
    let mut state = fresh_state(store.clone()).await;
    let sync = sync_with(http.clone(), store).with_debounce(Duration::from_secs(1));

    sync.store_token("tok").await;

    for n in 0..3 {
        state.favorites_mut().toggle(Some(&song(n))).await;
        sync.mark_dirty(SyncKind::Favorites);
    }
    assert!(sync.has_pending(SyncKind::Favorites));

    // Let the last debounce timer fire.
    tokio::time::sleep(Duration::from_secs(2)).await;

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value =
        serde_json::from_slice(requests[0].body.as_ref().unwrap()).unwrap();
    assert_eq!(body["favorites"].as_array().unwrap().len(), 3);
    assert!(!sync.has_pending(SyncKind::Favorites));
}

#[tokio::test]
async fn rejected_status_fails_but_clears_the_pending_flag() {
    let http = MockHttpClient::status(500);
    let store = Arc::new(MemoryStateStore::new());
    let sync = sync_with(http, store);

    sync.store_token("tok").await;

    let result = sync.flush_now(SyncKind::Preferences).await;
    assert!(matches!(result, Err(SyncError::RejectedStatus(500))));
    assert!(!sync.has_pending(SyncKind::Preferences));
}

#[tokio::test]
async fn merge_pull_adopts_server_state() {
    let merged = r#"{
        "merged_favorites": [
            {"title": "From Server", "artist": "Cloud", "videoId": "sv1", "addedAt": 10}
        ],
        "merged_queue": [
            {"title": "Queued", "artist": "Cloud", "videoId": "sv2", "id": 9}
        ],
        "preferences": {"shuffle": true, "repeat": "one"},
        "total_songs_played": 42
    }"#;
    let http = MockHttpClient::ok(merged);
    let store = Arc::new(MemoryStateStore::new());
    let mut state = fresh_state(store.clone()).await;
    let sync = sync_with(http.clone(), store);

    sync.store_token("tok").await;
    state.favorites_mut().toggle(Some(&song(1))).await;

    sync.merge_pull(&mut state).await.unwrap();

    // The request carried the local library.
    let requests = http.requests();
    assert!(requests[0].url.ends_with("/api/me/library/sync"));
    let body: serde_json::Value =
        serde_json::from_slice(requests[0].body.as_ref().unwrap()).unwrap();
    assert_eq!(body["local_favorites"].as_array().unwrap().len(), 1);

    // Local state now reflects the merged view.
    assert_eq!(state.favorites().count(), 1);
    assert_eq!(state.favorites().entries()[0].song.title, "From Server");
    assert_eq!(state.queue().len(), 1);
    assert!(state.settings().shuffle());
    assert_eq!(state.settings().repeat(), RepeatMode::One);
    assert_eq!(state.history().songs_played(), 42);
}

#[tokio::test]
async fn merge_pull_skips_kinds_with_pending_local_changes() {
    let merged = r#"{
        "merged_favorites": [
            {"title": "Stale Server Copy", "artist": "Cloud", "videoId": "sv", "addedAt": 10}
        ],
        "merged_queue": []
    }"#;
    let http = MockHttpClient::ok(merged);
    let store = Arc::new(MemoryStateStore::new());
    let mut state = fresh_state(store.clone()).await;
    // Long debounce so the armed timer cannot fire during the test.
    let sync = sync_with(http, store).with_debounce(Duration::from_secs(60));

    sync.store_token("tok").await;
    state.favorites_mut().toggle(Some(&song(1))).await;
    state.queue_mut().enqueue(song(2), false).await;
    sync.mark_dirty(SyncKind::Favorites);

    sync.merge_pull(&mut state).await.unwrap();

    // Favorites kept the fresher local edit; the queue adopted the server's.
    assert_eq!(state.favorites().entries()[0].song.title, "Song 1");
    assert!(state.queue().is_empty());
}

#[tokio::test]
async fn unreachable_api_abandons_the_pull_and_keeps_local_state() {
    let http = MockHttpClient::unreachable();
    let store = Arc::new(MemoryStateStore::new());
    let mut state = fresh_state(store.clone()).await;
    let sync = sync_with(http, store);

    sync.store_token("tok").await;
    state.favorites_mut().toggle(Some(&song(1))).await;

    let result = sync.merge_pull(&mut state).await;

    assert!(matches!(result, Err(SyncError::Bridge(_))));
    assert_eq!(state.favorites().count(), 1);
}

#[tokio::test]
async fn clearing_the_token_disables_pushes_again() {
    let http = MockHttpClient::ok("{}");
    let store = Arc::new(MemoryStateStore::new());
    let sync = sync_with(http.clone(), store);

    sync.store_token("tok").await;
    sync.flush_now(SyncKind::Queue).await.unwrap();
    assert_eq!(http.requests().len(), 1);

    sync.clear_token().await;
    let result = sync.flush_now(SyncKind::Queue).await;
    assert!(matches!(result, Err(SyncError::NotAuthenticated)));
    assert_eq!(http.requests().len(), 1);
}
