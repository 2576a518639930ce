use std::sync::Arc;

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    management::KeyValueStore,
    navigation::Navigator,
    session::{CallbackHandler, CallbackStatus, SessionManager, callback::RedirectDelays},
    types::CallbackParams,
    views,
};

/// Shared state of the local listener for one login attempt.
///
/// Holds at most one mounted [`CallbackHandler`]. Dropping the state unmounts
/// it, which cancels its pending navigation.
pub struct CallbackState<S> {
    session: Arc<SessionManager<S>>,
    navigator: Arc<dyn Navigator>,
    delays: RedirectDelays,
    handler: Mutex<Option<CallbackHandler>>,
}

impl<S: KeyValueStore> CallbackState<S> {
    pub fn new(session: Arc<SessionManager<S>>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_delays(session, navigator, RedirectDelays::default())
    }

    pub fn with_delays(
        session: Arc<SessionManager<S>>,
        navigator: Arc<dyn Navigator>,
        delays: RedirectDelays,
    ) -> Self {
        CallbackState {
            session,
            navigator,
            delays,
            handler: Mutex::new(None),
        }
    }

    /// Status and message of the mounted handler, if a redirect arrived.
    pub async fn outcome(&self) -> Option<(CallbackStatus, String)> {
        self.handler
            .lock()
            .await
            .as_ref()
            .map(|h| (h.status(), h.message().to_string()))
    }
}

/// Serves the OAuth redirect.
///
/// Mounting runs in its own task, so a browser that disconnects mid-exchange
/// still leaves a mounted handler with its follow-up navigation scheduled.
pub async fn callback<S: KeyValueStore>(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<Arc<CallbackState<S>>>,
) -> Html<String> {
    let mount = tokio::spawn(async move { mount_handler(state, params).await });

    match mount.await {
        Ok(page) => Html(page),
        Err(e) => {
            tracing::error!(error = %e, "callback task failed");
            Html(views::callback::render_html(
                CallbackStatus::Error,
                "An unexpected error occurred during authentication.",
            ))
        }
    }
}

async fn mount_handler<S: KeyValueStore>(
    state: Arc<CallbackState<S>>,
    params: CallbackParams,
) -> String {
    let mut mounted = state.handler.lock().await;

    if let Some(handler) = mounted.as_ref() {
        tracing::debug!("callback already handled, re-rendering");
        return views::callback::render_html(handler.status(), handler.message());
    }

    let mut handler = CallbackHandler::with_delays(state.delays);
    handler
        .process(
            Arc::clone(&state.session),
            params,
            Arc::clone(&state.navigator),
        )
        .await;

    let page = views::callback::render_html(handler.status(), handler.message());
    *mounted = Some(handler);
    page
}
