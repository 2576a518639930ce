use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, sync::Arc};
use tokio::{sync::oneshot, task::JoinHandle};

use crate::{Res, api, config, management::KeyValueStore};

/// Running callback listener. Dropping it without [`ApiServer::shutdown`]
/// leaves the task running until the runtime stops.
pub struct ApiServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl ApiServer {
    /// Address actually bound, useful when the requested port was 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops accepting requests and waits for in-flight ones to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "callback listener task failed");
        }
    }
}

pub fn router<S: KeyValueStore>(state: Arc<api::CallbackState<S>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(
            config::CALLBACK_PATH,
            get(api::callback::<S>).layer(Extension(state)),
        )
}

/// Binds the listener and serves it on a background task.
///
/// # Errors
///
/// Fails when the address cannot be bound.
pub async fn start_api_server<S: KeyValueStore>(
    state: Arc<api::CallbackState<S>>,
    addr: SocketAddr,
) -> Res<ApiServer> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let addr = listener.local_addr()?;
    let (shutdown, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = rx.await;
            })
            .await;
        if let Err(e) = served {
            tracing::error!(error = %e, "callback listener stopped");
        }
    });

    tracing::debug!(%addr, "callback listener started");
    Ok(ApiServer {
        addr,
        shutdown,
        handle,
    })
}
