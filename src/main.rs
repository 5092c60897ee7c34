//! fog - riddle-gated personal video server
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use fog::config::{load_riddle, Cli, ServerConfig};
use fog::gate::{MemorySessionStore, RiddleGate, SessionManager};
use fog::library::Library;
use fog::logging::LoggingSystem;
use fog::ui::StaticAssets;
use fog::web::{AppState, FogServer};

/// How often expired sessions are dropped from memory
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_cli(Cli::parse()).context("invalid command line")?;

    // Keep the logging system alive so file writers get flushed on exit
    let _logging_system = match LoggingSystem::init(config.logging.clone()) {
        Ok(system) => Some(system),
        Err(e) => {
            // Fall back to basic logging if advanced logging fails
            eprintln!("Failed to initialize logging system: {}. Using basic logging.", e);
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                )
                .init();
            None
        }
    };

    tracing::info!("Starting fog...");

    let secret = load_riddle(&config.config_dir)
        .with_context(|| format!("loading {}", config.riddle_path().display()))?;
    let library = Library::open(&config.content_root)
        .with_context(|| format!("opening content root {}", config.content_root.display()))?;
    let assets = StaticAssets::load();
    tracing::info!("Embedded {} static assets", assets.len());

    let store = Arc::new(MemorySessionStore::new());
    spawn_session_purge(store.clone());
    let sessions = SessionManager::new(store, config.session.clone());

    let state = AppState::new(library, RiddleGate::new(secret), sessions, assets);
    let server = FogServer::new(config.addr, state);

    server.start().await.context("server failed")?;
    Ok(())
}

fn spawn_session_purge(store: Arc<MemorySessionStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let purged = store.purge_expired();
            if purged > 0 {
                tracing::debug!("Purged {} expired sessions", purged);
            }
        }
    });
}
