//! Configuration for fog
//!
//! Command line flags (with environment fallbacks) are turned into a
//! validated [`ServerConfig`]. The riddle file is read from the configuration
//! directory once at startup.

mod settings;
#[cfg(test)]
mod tests;

pub use settings::{
    load_riddle, parse_addr, Cli, ConfigError, ConfigResult, ServerConfig, RIDDLE_FILE_NAME,
};
