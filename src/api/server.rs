//! API server lifecycle — bind, spawn, graceful shutdown.
//!
//! Pattern: bind → spawn background task → return handle with a
//! shutdown channel.

use std::net::SocketAddr;

use tokio::sync::oneshot;

use crate::api::router::api_router;
use crate::api::state::AppState;

/// Handle to a running API server.
pub struct ServerHandle {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ServerHandle {
    /// Shut down the server gracefully. Safe to call twice.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }
}

/// Start the API server on `addr` (port 0 binds an ephemeral port).
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<ServerHandle, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind API server on {addr}: {e}"))?;

    let bound = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = api_router(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(addr = %bound, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ServerHandle {
        addr: bound,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::gateway::{DelegatedGateway, Gateway};
    use crate::i18n::Locale;
    use crate::store::SessionReportStore;

    fn test_state() -> AppState {
        AppState {
            gateway: Arc::new(Gateway::Delegated(DelegatedGateway::new("http://localhost:1"))),
            store: Arc::new(SessionReportStore::new()),
            model: None,
            storage: None,
            http: reqwest::Client::new(),
            locale: Locale::En,
        }
    }

    #[tokio::test]
    async fn start_serves_health_and_stops() {
        let mut server = start_server(test_state(), "127.0.0.1:0".parse().unwrap())
            .await
            .expect("server should start");
        assert!(server.addr.port() > 0);

        let url = format!("http://{}/health", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn unknown_route_is_404_over_the_wire() {
        let mut server = start_server(test_state(), "127.0.0.1:0".parse().unwrap())
            .await
            .expect("server should start");

        let url = format!("http://{}/nonexistent", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_server(test_state(), "127.0.0.1:0".parse().unwrap())
            .await
            .expect("server should start");
        server.shutdown();
        server.shutdown();
    }
}
