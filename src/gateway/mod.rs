//! # Gateway Module
//!
//! HTTP client for the Playlist Analyzer backend and for the one Spotify Web
//! API call the client makes itself (the profile lookup).
//!
//! ## Overview
//!
//! The backend owns the client credentials and talks to Spotify on the user's
//! behalf. This module wraps its endpoints as plain async functions on
//! [`GatewayClient`]:
//!
//! ```text
//! Session Manager / Views
//!          ↓
//! GatewayClient
//!     ├── auth       GET /auth/url, POST /auth/token
//!     ├── playlists  GET /api/playlists
//!     ├── profile    GET {spotify}/me
//!     └── health     GET /health
//!          ↓
//! reqwest
//! ```
//!
//! ## Error Handling
//!
//! Every call is a single round trip: no retries, no caching, no batching.
//! Transport and HTTP failures are mapped onto [`crate::error::AppError`] at
//! the call site so callers only deal with the taxonomy:
//!
//! - code exchange failures become `ExchangeFailed`
//! - profile failures become `ProfileFetchFailed`
//! - playlist `401` becomes `TokenExpired`, `503` becomes `UpstreamUnavailable`,
//!   anything else `UnknownFetchError`
//!
//! No timeouts are configured on the client.

mod auth;
mod playlists;
mod profile;

use reqwest::Client;

use crate::config;

/// Shared HTTP client plus the two base URLs it talks to.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    backend_url: String,
    spotify_api_url: String,
}

impl GatewayClient {
    pub fn new(backend_url: impl Into<String>, spotify_api_url: impl Into<String>) -> Self {
        GatewayClient {
            http: Client::new(),
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            spotify_api_url: spotify_api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::backend_url(), config::spotify_apiurl())
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// Probes `GET /health` on the backend. Any failure counts as unreachable.
    pub async fn backend_healthy(&self) -> bool {
        let url = format!("{}/health", self.backend_url);
        match self.http.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "backend health probe failed");
                false
            }
        }
    }
}
