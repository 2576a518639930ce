mod common;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Extension, extract::Query};
use common::FakeBackend;
use playlyzer::{
    api::{CallbackState, callback},
    management::{KeyValueStore, MemoryStore, StorageError},
    navigation::{ChannelNavigator, Navigator, Route},
    server::start_api_server,
    session::{
        CallbackHandler, CallbackStatus, SessionManager,
        callback::RedirectDelays,
    },
    types::CallbackParams,
};
use tokio::sync::mpsc::UnboundedReceiver;

const FAST: RedirectDelays = RedirectDelays {
    success: Duration::from_millis(20),
    failure: Duration::from_millis(30),
};

fn params(code: Option<&str>, error: Option<&str>) -> CallbackParams {
    CallbackParams {
        code: code.map(str::to_string),
        error: error.map(str::to_string),
    }
}

async fn setup() -> (
    FakeBackend,
    Arc<SessionManager<MemoryStore>>,
    Arc<dyn Navigator>,
    UnboundedReceiver<Route>,
) {
    let backend = FakeBackend::start().await;
    let session = Arc::new(SessionManager::new(backend.gateway(), MemoryStore::new()));
    let (navigator, routes) = ChannelNavigator::new();
    (backend, session, Arc::new(navigator), routes)
}

async fn next_route(routes: &mut UnboundedReceiver<Route>) -> Route {
    tokio::time::timeout(Duration::from_secs(2), routes.recv())
        .await
        .expect("navigation did not happen")
        .expect("navigator dropped")
}

#[tokio::test]
async fn test_handler_starts_processing() {
    let handler = CallbackHandler::new();
    assert_eq!(handler.status(), CallbackStatus::Processing);
    assert!(handler.redirect_route().is_none());
}

#[tokio::test]
async fn test_provider_error_goes_back_to_login() {
    let (backend, session, navigator, mut routes) = setup().await;
    let mut handler = CallbackHandler::with_delays(FAST);

    handler
        .process(session, params(None, Some("access_denied")), navigator)
        .await;

    assert_eq!(handler.status(), CallbackStatus::Error);
    assert!(handler.message().contains("access_denied"));
    assert_eq!(handler.redirect_route(), Some(&Route::Login));
    assert_eq!(next_route(&mut routes).await, Route::Login);
    assert_eq!(backend.state.exchange_calls(), 0);
}

#[tokio::test]
async fn test_error_wins_over_code() {
    let (backend, session, navigator, mut routes) = setup().await;
    let mut handler = CallbackHandler::with_delays(FAST);

    handler
        .process(session, params(Some("abc"), Some("server_error")), navigator)
        .await;

    assert_eq!(handler.status(), CallbackStatus::Error);
    assert_eq!(next_route(&mut routes).await, Route::Login);
    assert_eq!(backend.state.exchange_calls(), 0);
}

#[tokio::test]
async fn test_missing_code_goes_back_to_login() {
    let (backend, session, navigator, mut routes) = setup().await;
    let mut handler = CallbackHandler::with_delays(FAST);

    handler.process(session, params(None, None), navigator).await;

    assert_eq!(handler.status(), CallbackStatus::Error);
    assert_eq!(
        handler.message(),
        "No authorization code received from Spotify"
    );
    assert_eq!(next_route(&mut routes).await, Route::Login);
    assert_eq!(backend.state.exchange_calls(), 0);
}

#[tokio::test]
async fn test_successful_exchange_goes_to_dashboard() {
    let (backend, session, navigator, mut routes) = setup().await;
    let mut handler = CallbackHandler::with_delays(FAST);

    handler
        .process(Arc::clone(&session), params(Some("abc"), None), navigator)
        .await;

    assert_eq!(handler.status(), CallbackStatus::Success);
    assert!(handler.message().contains("Successfully authenticated"));
    assert!(session.state().is_authenticated());
    assert_eq!(next_route(&mut routes).await, Route::Dashboard);
    assert_eq!(backend.state.exchange_calls(), 1);
}

#[tokio::test]
async fn test_rejected_exchange_goes_back_to_login() {
    let (backend, session, navigator, mut routes) = setup().await;
    backend.state.set_exchange_status(400);
    let mut handler = CallbackHandler::with_delays(FAST);

    handler
        .process(Arc::clone(&session), params(Some("abc"), None), navigator)
        .await;

    assert_eq!(handler.status(), CallbackStatus::Error);
    assert_eq!(
        handler.message(),
        "Failed to complete authentication. Please try again."
    );
    assert!(!session.state().is_authenticated());
    assert_eq!(next_route(&mut routes).await, Route::Login);
}

/// Store whose writes blow up, to crash the exchange task.
struct ExplodingStore {
    inner: Arc<MemoryStore>,
}

impl KeyValueStore for ExplodingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        panic!("storage write exploded");
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

#[tokio::test]
async fn test_crashed_exchange_goes_back_to_login() {
    let backend = FakeBackend::start().await;
    let memory = Arc::new(MemoryStore::new());
    let session = Arc::new(SessionManager::new(
        backend.gateway(),
        ExplodingStore {
            inner: Arc::clone(&memory),
        },
    ));
    let (navigator, mut routes) = ChannelNavigator::new();
    let mut handler = CallbackHandler::with_delays(FAST);

    handler
        .process(
            Arc::clone(&session),
            params(Some("abc"), None),
            Arc::new(navigator),
        )
        .await;

    assert_eq!(handler.status(), CallbackStatus::Error);
    assert_eq!(
        handler.message(),
        "An unexpected error occurred during authentication."
    );
    assert_eq!(handler.redirect_route(), Some(&Route::Login));
    assert_eq!(next_route(&mut routes).await, Route::Login);

    let state = session.state();
    assert!(!state.is_authenticated());
    assert!(!state.is_loading());
    assert!(memory.get("spotify_tokens").await.unwrap().is_none());
}

#[tokio::test]
async fn test_code_is_exchanged_at_most_once() {
    let (backend, session, navigator, _routes) = setup().await;
    let mut handler = CallbackHandler::with_delays(FAST);

    handler
        .process(
            Arc::clone(&session),
            params(Some("abc"), None),
            Arc::clone(&navigator),
        )
        .await;
    handler
        .process(Arc::clone(&session), params(Some("abc"), None), navigator)
        .await;

    assert_eq!(backend.state.exchange_calls(), 1);
    assert_eq!(handler.status(), CallbackStatus::Success);
}

#[tokio::test]
async fn test_unmount_cancels_pending_navigation() {
    let (_backend, session, navigator, mut routes) = setup().await;
    let mut handler = CallbackHandler::with_delays(RedirectDelays {
        success: Duration::from_millis(50),
        failure: Duration::from_millis(50),
    });

    handler
        .process(session, params(None, Some("access_denied")), navigator)
        .await;
    handler.unmount();

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(routes.try_recv().is_err());
}

#[tokio::test]
async fn test_listener_handles_redirect_once() {
    let (backend, session, navigator, mut routes) = setup().await;
    let state = Arc::new(CallbackState::with_delays(
        Arc::clone(&session),
        navigator,
        FAST,
    ));
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let server = start_api_server(Arc::clone(&state), addr).await.unwrap();
    let base = format!("http://{}", server.local_addr());

    let client = reqwest::Client::new();
    let first = client
        .get(format!("{base}/callback?code=abc"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(first.contains("Successfully authenticated"));

    // a reload of the page must not spend the code again
    let second = client
        .get(format!("{base}/callback?code=abc"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(second.contains("Successfully authenticated"));
    assert_eq!(backend.state.exchange_calls(), 1);

    assert_eq!(next_route(&mut routes).await, Route::Dashboard);
    let (status, _) = state.outcome().await.unwrap();
    assert_eq!(status, CallbackStatus::Success);
    assert!(session.state().is_authenticated());

    server.shutdown().await;
}

#[tokio::test]
async fn test_dropped_request_still_finishes_login() {
    let (backend, session, navigator, mut routes) = setup().await;
    backend
        .state
        .set_exchange_delay(Duration::from_millis(200));
    let state = Arc::new(CallbackState::with_delays(
        Arc::clone(&session),
        navigator,
        FAST,
    ));

    // the browser gives up long before the exchange returns
    let request = callback::<MemoryStore>(
        Query(params(Some("abc"), None)),
        Extension(Arc::clone(&state)),
    );
    assert!(
        tokio::time::timeout(Duration::from_millis(20), request)
            .await
            .is_err()
    );

    assert_eq!(next_route(&mut routes).await, Route::Dashboard);
    let (status, _) = state.outcome().await.unwrap();
    assert_eq!(status, CallbackStatus::Success);
    assert!(session.state().is_authenticated());
    assert_eq!(backend.state.exchange_calls(), 1);
}

#[tokio::test]
async fn test_listener_health() {
    let (_backend, session, navigator, _routes) = setup().await;
    let state = Arc::new(CallbackState::new(session, navigator));
    let server = start_api_server(state, "127.0.0.1:0".parse().unwrap())
        .await
        .unwrap();

    let body: serde_json::Value = reqwest::get(format!("http://{}/health", server.local_addr()))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "playlyzer");

    server.shutdown().await;
}
