//! # Session Module
//!
//! Owns the authentication state of the client and the flow that changes it.
//!
//! [`SessionManager`] holds the one [`SessionState`] value and publishes every
//! change through a `tokio::sync::watch` channel. Each transition replaces the
//! whole value, so a reader never sees a user without tokens or the other way
//! round.
//!
//! ```text
//! restore_session ──► (stored tokens?) ──no──► unauthenticated
//!                          │yes
//!                          ▼
//!                   profile lookup ──fail──► clear store, unauthenticated
//!                          │ok
//!                          ▼
//!                    authenticated
//! ```
//!
//! [`callback`] contains the state machine that runs when the provider
//! redirects back with a code.

pub mod callback;

use tokio::sync::watch;

use crate::{
    error::AppError,
    gateway::GatewayClient,
    management::{KeyValueStore, TokenStore},
    navigation::{Navigator, Route},
    types::{SessionState, TokenBundle, UserProfile},
};

pub use callback::{CallbackHandler, CallbackStatus};

pub struct SessionManager<S> {
    gateway: GatewayClient,
    tokens: TokenStore<S>,
    state: watch::Sender<SessionState>,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(gateway: GatewayClient, store: S) -> Self {
        SessionManager {
            gateway,
            tokens: TokenStore::new(store),
            state: watch::Sender::new(SessionState::initial()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state replacement.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn gateway(&self) -> &GatewayClient {
        &self.gateway
    }

    /// Re-establishes the session from the stored token bundle.
    ///
    /// Stored tokens are only trusted once the profile lookup succeeds with
    /// them; otherwise they are removed. Always ends with `is_loading` false.
    pub async fn restore_session(&self) {
        let tokens = match self.tokens.load().await {
            Ok(Some(tokens)) if !tokens.access_token.is_empty() => tokens,
            Ok(Some(_)) => {
                tracing::warn!("stored token bundle has no access token, discarding it");
                self.discard_stored_tokens().await;
                self.set_state(SessionState::unauthenticated());
                return;
            }
            Ok(None) => {
                tracing::debug!("no stored session");
                self.set_state(SessionState::unauthenticated());
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored session, discarding it");
                self.discard_stored_tokens().await;
                self.set_state(SessionState::unauthenticated());
                return;
            }
        };

        match self.gateway.user_profile(&tokens.access_token).await {
            Ok(user) => {
                tracing::info!(user = %user.id, "session restored");
                self.set_state(SessionState::authenticated(user, tokens));
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored session is no longer valid");
                self.discard_stored_tokens().await;
                self.set_state(SessionState::unauthenticated());
            }
        }
    }

    /// Starts the authorization flow.
    ///
    /// Fetches the authorization URL from the backend and hands it to the
    /// navigator as an external route. Returns the URL when it was obtained,
    /// even if the navigator failed to open it, so the caller can show it.
    /// A failed request only produces a log event and resets the state.
    pub async fn login(&self, navigator: &dyn Navigator) -> Option<String> {
        self.set_state(SessionState::unauthenticated().with_loading(true));

        let auth_url = match self.gateway.authorization_url().await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, "failed to initiate login");
                self.set_state(SessionState::unauthenticated());
                return None;
            }
        };

        if let Err(e) = navigator.navigate(Route::External(auth_url.clone())) {
            tracing::error!(error = %e, "failed to open authorization page");
            self.set_state(SessionState::unauthenticated());
        }

        Some(auth_url)
    }

    /// Exchanges an authorization code and signs the user in.
    ///
    /// Returns `false` on any failure; in that case no token bundle is left in
    /// the store. Must not be called twice with the same code: Spotify
    /// invalidates a code after its first use.
    pub async fn exchange_code_for_tokens(&self, code: &str) -> bool {
        self.set_state(self.state().with_loading(true));

        match self.try_exchange(code).await {
            Ok((user, tokens)) => {
                tracing::info!(user = %user.id, "authenticated with Spotify");
                self.set_state(SessionState::authenticated(user, tokens));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to exchange code for tokens");
                self.set_state(SessionState::unauthenticated());
                false
            }
        }
    }

    async fn try_exchange(&self, code: &str) -> Result<(UserProfile, TokenBundle), AppError> {
        let tokens = self.gateway.exchange_code(code).await?;
        self.tokens.persist(&tokens).await?;

        match self.gateway.user_profile(&tokens.access_token).await {
            Ok(user) => Ok((user, tokens)),
            Err(e) => {
                self.discard_stored_tokens().await;
                Err(e)
            }
        }
    }

    /// Resets after an exchange that never reported back.
    pub(crate) async fn abandon_exchange(&self) {
        self.set_state(SessionState::unauthenticated());
        self.discard_stored_tokens().await;
    }

    /// Signs the user out and forgets the stored tokens. No network call.
    ///
    /// The in-memory state is cleared before the store is touched.
    pub async fn logout(&self) {
        self.set_state(SessionState::unauthenticated());
        self.discard_stored_tokens().await;
        tracing::info!("logged out");
    }

    async fn discard_stored_tokens(&self) {
        if let Err(e) = self.tokens.clear().await {
            tracing::warn!(error = %e, key = self.tokens.key(), "failed to remove stored tokens");
        }
    }

    fn set_state(&self, state: SessionState) {
        self.state.send_replace(state);
    }
}
