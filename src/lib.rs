//! fog - riddle-gated personal video server
//!
//! This crate provides the pieces of the server:
//! - Content library with contained path resolution and directory listings
//! - Riddle gate with per-visitor sessions
//! - HTML views and embedded static assets
//! - HTTP routing, byte-range streaming and security headers
//! - Structured logging and command line configuration

pub mod core;
pub mod config;
pub mod gate;
pub mod library;
pub mod logging;
pub mod ui;
pub mod web;

// Re-export commonly used items
pub use config::{Cli, ConfigError, ServerConfig};
pub use gate::{MemorySessionStore, RiddleGate, SessionManager};
pub use library::{Library, LibraryError};
pub use ui::StaticAssets;
pub use web::{build_router, AppState, FogServer, ServeError};
