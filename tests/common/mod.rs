#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU16, AtomicU64, AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};

use playlyzer::{
    gateway::GatewayClient,
    types::{ProfileImage, TokenBundle, UserProfile},
};

pub const AUTH_URL: &str = "https://accounts.example.com/authorize?client_id=test";

/// Knobs and counters of the fake backend. Statuses default to 200.
pub struct FakeState {
    pub auth_url_status: AtomicU16,
    pub exchange_status: AtomicU16,
    pub profile_status: AtomicU16,
    pub playlists_status: AtomicU16,
    pub exchange_delay_ms: AtomicU64,
    pub exchange_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub playlists_calls: AtomicUsize,
    pub playlists: Mutex<Vec<Value>>,
    pub last_playlists_auth: Mutex<Option<String>>,
}

impl Default for FakeState {
    fn default() -> Self {
        FakeState {
            auth_url_status: AtomicU16::new(200),
            exchange_status: AtomicU16::new(200),
            profile_status: AtomicU16::new(200),
            playlists_status: AtomicU16::new(200),
            exchange_delay_ms: AtomicU64::new(0),
            exchange_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            playlists_calls: AtomicUsize::new(0),
            playlists: Mutex::new(Vec::new()),
            last_playlists_auth: Mutex::new(None),
        }
    }
}

impl FakeState {
    pub fn set_exchange_status(&self, status: u16) {
        self.exchange_status.store(status, Ordering::SeqCst);
    }

    pub fn set_exchange_delay(&self, delay: std::time::Duration) {
        self.exchange_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set_profile_status(&self, status: u16) {
        self.profile_status.store(status, Ordering::SeqCst);
    }

    pub fn set_playlists_status(&self, status: u16) {
        self.playlists_status.store(status, Ordering::SeqCst);
    }

    pub fn set_auth_url_status(&self, status: u16) {
        self.auth_url_status.store(status, Ordering::SeqCst);
    }

    pub fn set_playlists(&self, playlists: Vec<Value>) {
        *self.playlists.lock().unwrap() = playlists;
    }

    pub fn exchange_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }

    pub fn playlists_calls(&self) -> usize {
        self.playlists_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }
}

/// Backend and Spotify API stand-in served from one local listener.
pub struct FakeBackend {
    pub addr: SocketAddr,
    pub state: Arc<FakeState>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .route("/auth/url", get(auth_url))
            .route("/auth/token", post(exchange))
            .route("/me", get(profile))
            .route("/api/playlists", get(playlists))
            .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeBackend { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn gateway(&self) -> GatewayClient {
        GatewayClient::new(self.url(), self.url())
    }
}

fn status(code: &AtomicU16) -> StatusCode {
    StatusCode::from_u16(code.load(Ordering::SeqCst)).unwrap()
}

async fn auth_url(State(state): State<Arc<FakeState>>) -> (StatusCode, Json<Value>) {
    let status = status(&state.auth_url_status);
    if status != StatusCode::OK {
        return (status, Json(json!({ "detail": "auth url unavailable" })));
    }
    (status, Json(json!({ "auth_url": AUTH_URL })))
}

async fn exchange(
    State(state): State<Arc<FakeState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.exchange_calls.fetch_add(1, Ordering::SeqCst);
    let delay = state.exchange_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
    }
    let status = status(&state.exchange_status);
    if status != StatusCode::OK {
        return (status, Json(json!({ "detail": "invalid authorization code" })));
    }

    let code = body["code"].as_str().unwrap_or_default();
    (
        status,
        Json(json!({
            "access_token": format!("access-{code}"),
            "refresh_token": format!("refresh-{code}"),
            "expires_in": 3600,
            "token_type": "Bearer"
        })),
    )
}

async fn profile(State(state): State<Arc<FakeState>>) -> (StatusCode, Json<Value>) {
    state.profile_calls.fetch_add(1, Ordering::SeqCst);
    let status = status(&state.profile_status);
    if status != StatusCode::OK {
        return (status, Json(json!({ "error": { "status": status.as_u16() } })));
    }
    (
        status,
        Json(json!({
            "id": "user-1",
            "display_name": "Test User",
            "email": "test@example.com",
            "images": [{ "url": "https://images.example.com/user-1.png" }]
        })),
    )
}

async fn playlists(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.playlists_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_playlists_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let status = status(&state.playlists_status);
    if status != StatusCode::OK {
        return (status, Json(json!({ "detail": "Spotify API error" })));
    }

    let playlists = state.playlists.lock().unwrap().clone();
    let total = playlists.len();
    (status, Json(json!({ "playlists": playlists, "total": total })))
}

pub fn playlist_json(id: &str, name: &str, tracks_total: u64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "tracks_total": tracks_total,
        "owner": "Test User",
        "is_public": true,
        "image_url": null,
        "external_url": format!("https://open.spotify.com/playlist/{id}")
    })
}

pub fn tokens(access_token: &str) -> TokenBundle {
    TokenBundle {
        access_token: access_token.to_string(),
        refresh_token: format!("refresh-{access_token}"),
        expires_in: 3600,
        token_type: "Bearer".to_string(),
    }
}

pub fn user() -> UserProfile {
    UserProfile {
        id: "user-1".to_string(),
        display_name: Some("Test User".to_string()),
        email: Some("test@example.com".to_string()),
        images: vec![ProfileImage {
            url: "https://images.example.com/user-1.png".to_string(),
        }],
    }
}
