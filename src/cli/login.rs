use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{
    api::CallbackState,
    config, error, info,
    navigation::{ChannelNavigator, Navigator, Route},
    server::start_api_server,
    success, views, warning,
};

/// Signs the user in, returning whether the session ended up authenticated.
///
/// A stored session that still works is reused. Otherwise the callback
/// listener is started, the authorization page opened and the command waits
/// until the callback handler navigates to the dashboard or back to login.
pub async fn login() -> bool {
    let session = Arc::new(super::new_session());
    super::restore(&session).await;

    let state = session.state();
    if let Some(user) = state.user() {
        success!("Already logged in as {}", user.name());
        return true;
    }

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let (navigator, mut routes) = ChannelNavigator::with_browser();
    let navigator: Arc<dyn Navigator> = Arc::new(navigator);
    let callback_state = Arc::new(CallbackState::new(
        Arc::clone(&session),
        Arc::clone(&navigator),
    ));

    let server = match start_api_server(Arc::clone(&callback_state), addr).await {
        Ok(server) => server,
        Err(e) => error!("Failed to start callback listener on {}: {}", addr, e),
    };

    info!("Opening the Spotify authorization page...");
    match session.login(navigator.as_ref()).await {
        Some(auth_url) => {
            if !session.state().is_loading() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    auth_url
                );
            }
        }
        None => {
            warning!(
                "Could not get an authorization URL from {}. Is the backend running?",
                session.gateway().backend_url()
            );
            server.shutdown().await;
            return false;
        }
    }

    let pb = super::spinner("Waiting for Spotify authorization in your browser...");
    let route = tokio::time::timeout(config::login_timeout(), routes.recv()).await;
    pb.finish_and_clear();

    let outcome = callback_state.outcome().await;
    server.shutdown().await;

    match route {
        Ok(Some(Route::Dashboard)) => {
            if let Some((_, message)) = outcome {
                success!("{}", message);
            }
            let healthy = session.gateway().backend_healthy().await;
            println!("{}", views::dashboard::render(&session.state(), Some(healthy)));
            true
        }
        Ok(Some(_)) => {
            let message = outcome
                .map(|(_, message)| message)
                .unwrap_or_else(|| "Login failed.".to_string());
            warning!("{}", message);
            false
        }
        Ok(None) | Err(_) => {
            warning!("Authentication failed or timed out.");
            false
        }
    }
}
