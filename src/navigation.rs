use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle};

use crate::Res;

/// Places the client can move to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Playlists,
    /// A page outside the client, opened in the system browser.
    External(String),
}

impl Route {
    pub fn path(&self) -> &str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Playlists => "/playlists",
            Route::External(url) => url.as_str(),
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route) -> Res<()>;
}

/// Forwards routes over a channel to whoever drives the views.
///
/// With `with_browser`, external routes open the system browser instead of
/// being forwarded.
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
    open_external: bool,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            ChannelNavigator {
                tx,
                open_external: false,
            },
            rx,
        )
    }

    pub fn with_browser() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (mut navigator, rx) = Self::new();
        navigator.open_external = true;
        (navigator, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) -> Res<()> {
        if let Route::External(url) = &route {
            if self.open_external {
                webbrowser::open(url)?;
                return Ok(());
            }
        }

        tracing::debug!(route = route.path(), "navigate");
        self.tx.send(route).map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// A navigation that fires after a delay unless it is cancelled first.
///
/// Dropping the value cancels it.
pub struct ScheduledNavigation {
    route: Route,
    handle: JoinHandle<()>,
}

impl ScheduledNavigation {
    /// Must be called from within a tokio runtime.
    pub fn schedule(navigator: Arc<dyn Navigator>, route: Route, delay: Duration) -> Self {
        let target = route.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = navigator.navigate(target) {
                tracing::warn!(error = %e, "scheduled navigation failed");
            }
        });

        ScheduledNavigation { route, handle }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }
}

impl Drop for ScheduledNavigation {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
