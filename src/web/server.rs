//! fog HTTP server implementation
//!
//! Holds the shared read-only state and wires routes and middleware.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::error::ServeError;
use super::routes::{
    answer, answer_page, browse, load_and_save_session, log_request, security_headers,
    static_asset,
};
use crate::gate::{RiddleGate, SessionManager};
use crate::library::Library;
use crate::ui::StaticAssets;

/// Shared state for request handlers
///
/// Everything except the session store behind `sessions` is immutable after
/// startup.
#[derive(Clone)]
pub struct AppState {
    /// Content root
    pub library: Arc<Library>,
    /// Riddle secret
    pub gate: Arc<RiddleGate>,
    /// Session store and cookie settings
    pub sessions: SessionManager,
    /// Embedded static files
    pub assets: Arc<StaticAssets>,
}

impl AppState {
    /// Bundle the startup-built components
    pub fn new(
        library: Library,
        gate: RiddleGate,
        sessions: SessionManager,
        assets: StaticAssets,
    ) -> Self {
        Self {
            library: Arc::new(library),
            gate: Arc::new(gate),
            sessions,
            assets: Arc::new(assets),
        }
    }
}

/// fog HTTP server
pub struct FogServer {
    addr: SocketAddr,
    state: AppState,
}

impl FogServer {
    /// Create a server that will listen on `addr`
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self { addr, state }
    }

    /// Build the router with all routes and middleware
    ///
    /// Session handling wraps only the gated routes; static assets are
    /// served without touching the session store.
    pub fn build_router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Serve until Ctrl-C
    pub async fn start(&self) -> Result<(), ServeError> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| ServeError::BindFailed {
                reason: format!("{}: {}", self.addr, e),
            })?;

        tracing::info!(
            "starting server on {} serving {}",
            self.addr,
            self.state.library.root().display()
        );

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServeError::Internal {
            reason: e.to_string(),
        })?;

        tracing::info!("server stopped");
        Ok(())
    }
}

/// Build the application router for `state`
pub fn build_router(state: AppState) -> Router {
    let gated = Router::new()
        .route("/answer", post(answer).get(answer_page))
        .fallback(browse)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            load_and_save_session,
        ));

    Router::new()
        .route("/static/*path", get(static_asset))
        .merge(gated)
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
