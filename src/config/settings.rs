//! Command line parsing and server settings

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use chrono::Duration;
use clap::Parser;
use thiserror::Error;

use crate::gate::{
    GateError, RiddleSecret, SessionConfig, DEFAULT_COOKIE_NAME, DEFAULT_SESSION_LIFETIME_DAYS,
};
use crate::logging::{LogFormat, LogLevel, LogOutput, LoggingConfig};

/// Riddle file expected inside the configuration directory
pub const RIDDLE_FILE_NAME: &str = "riddle.txt";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid listen address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("Invalid session lifetime: {0} days")]
    InvalidLifetime(i64),

    #[error("Invalid riddle file {path}: {source}")]
    Riddle {
        path: PathBuf,
        #[source]
        source: GateError,
    },
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Command line interface
#[derive(Debug, Clone, Parser)]
#[command(name = "fog", version, about = "Riddle-gated personal video server")]
pub struct Cli {
    /// HTTP network address; a bare `:port` listens on all interfaces
    #[arg(long, env = "FOG_ADDR", default_value = ":4000")]
    pub addr: String,

    /// Path to the videos
    #[arg(long, env = "FOG_PATH", default_value = "/var/www/fog")]
    pub path: PathBuf,

    /// Path to the configuration directory holding riddle.txt
    #[arg(long, env = "FOG_CONFIG", default_value = "/etc/fog")]
    pub config: PathBuf,

    /// Log verbosity
    #[arg(long, env = "FOG_LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, env = "FOG_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Where logs go; defaults to `both` when --log-dir is given, else `console`
    #[arg(long, env = "FOG_LOG_OUTPUT", value_enum)]
    pub log_output: Option<LogOutput>,

    /// Directory for daily-rolling log files
    #[arg(long, env = "FOG_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Include source file and line in log lines
    #[arg(long)]
    pub log_source: bool,

    /// Mark the session cookie Secure (serve behind HTTPS)
    #[arg(long)]
    pub secure_cookie: bool,

    /// How long a visitor stays remembered
    #[arg(long, env = "FOG_SESSION_LIFETIME_DAYS", default_value_t = DEFAULT_SESSION_LIFETIME_DAYS)]
    pub session_lifetime_days: i64,
}

/// Validated server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Content root as given; canonicalized when the library is opened
    pub content_root: PathBuf,
    /// Directory holding the riddle file
    pub config_dir: PathBuf,
    /// Session cookie settings
    pub session: SessionConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Validate command line arguments
    pub fn from_cli(cli: Cli) -> ConfigResult<Self> {
        let addr = parse_addr(&cli.addr)?;

        let lifetime = Duration::try_days(cli.session_lifetime_days)
            .filter(|lifetime| *lifetime > Duration::zero())
            .ok_or(ConfigError::InvalidLifetime(cli.session_lifetime_days))?;

        let output = cli.log_output.unwrap_or(if cli.log_dir.is_some() {
            LogOutput::Both
        } else {
            LogOutput::Console
        });
        let mut logging = LoggingConfig::new()
            .with_level(cli.log_level)
            .with_format(cli.log_format)
            .with_output(output)
            .with_file_info(cli.log_source);
        if let Some(dir) = cli.log_dir {
            logging = logging.with_log_directory(dir);
        }

        Ok(Self {
            addr,
            content_root: cli.path,
            config_dir: cli.config,
            session: SessionConfig {
                cookie_name: DEFAULT_COOKIE_NAME.to_string(),
                lifetime,
                secure_cookie: cli.secure_cookie,
            },
            logging,
        })
    }

    /// Location of the riddle file
    pub fn riddle_path(&self) -> PathBuf {
        self.config_dir.join(RIDDLE_FILE_NAME)
    }
}

/// Parse a listen address
///
/// Accepts `host:port`, `ip:port`, and `:port` for all interfaces.
pub fn parse_addr(addr: &str) -> ConfigResult<SocketAddr> {
    let invalid = |reason: String| ConfigError::InvalidAddress {
        addr: addr.to_string(),
        reason,
    };

    let candidate = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };

    if let Ok(parsed) = candidate.parse::<SocketAddr>() {
        return Ok(parsed);
    }

    candidate
        .to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("no addresses resolved".to_string()))
}

/// Read and validate `riddle.txt` from the configuration directory
///
/// The file holds a bcrypt hash of the answer on its first line and the
/// riddle text in the rest of the file.
pub fn load_riddle(config_dir: &Path) -> ConfigResult<RiddleSecret> {
    let path = config_dir.join(RIDDLE_FILE_NAME);
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    let secret = RiddleSecret::parse(&contents).map_err(|source| ConfigError::Riddle {
        path: path.clone(),
        source,
    })?;
    secret.validate().map_err(|source| ConfigError::Riddle {
        path: path.clone(),
        source,
    })?;

    tracing::debug!("Loaded riddle from {}", path.display());
    Ok(secret)
}
