use std::{sync::Arc, time::Duration};

use crate::{
    config,
    error::AppError,
    management::KeyValueStore,
    navigation::{Navigator, Route, ScheduledNavigation},
    session::SessionManager,
    types::CallbackParams,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStatus {
    Processing,
    Success,
    Error,
}

/// How long the outcome stays on screen before moving on.
#[derive(Debug, Clone, Copy)]
pub struct RedirectDelays {
    pub success: Duration,
    pub failure: Duration,
}

impl Default for RedirectDelays {
    fn default() -> Self {
        RedirectDelays {
            success: config::SUCCESS_REDIRECT_DELAY,
            failure: config::FAILURE_REDIRECT_DELAY,
        }
    }
}

/// Handles the provider's redirect back to the client.
///
/// Starts in `Processing` and ends in `Success` (dashboard follows) or `Error`
/// (login follows). The follow-up navigation is owned by the handler: dropping
/// or unmounting it before the delay elapses means no navigation happens.
pub struct CallbackHandler {
    status: CallbackStatus,
    message: String,
    delays: RedirectDelays,
    redirect: Option<ScheduledNavigation>,
}

impl CallbackHandler {
    pub fn new() -> Self {
        Self::with_delays(RedirectDelays::default())
    }

    pub fn with_delays(delays: RedirectDelays) -> Self {
        CallbackHandler {
            status: CallbackStatus::Processing,
            message: "Processing your Spotify authentication...".to_string(),
            delays,
            redirect: None,
        }
    }

    pub fn status(&self) -> CallbackStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Route of the pending or fired follow-up navigation.
    pub fn redirect_route(&self) -> Option<&Route> {
        self.redirect.as_ref().map(|r| r.route())
    }

    /// Runs the redirect through the state machine.
    ///
    /// Only the first call does anything; once the handler left `Processing`
    /// further calls return immediately, so a code is exchanged at most once.
    pub async fn process<S: KeyValueStore>(
        &mut self,
        session: Arc<SessionManager<S>>,
        params: CallbackParams,
        navigator: Arc<dyn Navigator>,
    ) {
        if self.status != CallbackStatus::Processing || self.redirect.is_some() {
            return;
        }

        if let Some(error) = params.error {
            tracing::warn!(%error, "authorization declined");
            let message = AppError::AuthorizationDenied(error).to_string();
            self.fail(message, navigator);
            return;
        }

        let Some(code) = params.code.filter(|c| !c.is_empty()) else {
            tracing::warn!("redirect without authorization code");
            self.fail(AppError::MissingCode.to_string(), navigator);
            return;
        };

        self.message = "Exchanging authorization code for access tokens...".to_string();

        let exchange = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.exchange_code_for_tokens(&code).await })
        };

        match exchange.await {
            Ok(true) => {
                self.status = CallbackStatus::Success;
                self.message =
                    "Successfully authenticated! Redirecting to your dashboard...".to_string();
                self.redirect = Some(ScheduledNavigation::schedule(
                    navigator,
                    Route::Dashboard,
                    self.delays.success,
                ));
            }
            Ok(false) => {
                self.fail(
                    "Failed to complete authentication. Please try again.".to_string(),
                    navigator,
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "callback processing aborted");
                session.abandon_exchange().await;
                self.fail(
                    "An unexpected error occurred during authentication.".to_string(),
                    navigator,
                );
            }
        }
    }

    /// Tears the handler down, cancelling a navigation that has not fired yet.
    pub fn unmount(self) {
        drop(self);
    }

    fn fail(&mut self, message: String, navigator: Arc<dyn Navigator>) {
        self.status = CallbackStatus::Error;
        self.message = message;
        self.redirect = Some(ScheduledNavigation::schedule(
            navigator,
            Route::Login,
            self.delays.failure,
        ));
    }
}

impl Default for CallbackHandler {
    fn default() -> Self {
        Self::new()
    }
}
