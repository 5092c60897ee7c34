//! Tests for Configuration Module

use super::*;
use clap::Parser;
use std::fs;
use tempfile::TempDir;

use crate::gate::GateError;
use crate::logging::{LogFormat, LogLevel, LogOutput};

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["fog"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_cli_defaults() {
    let config = ServerConfig::from_cli(parse(&[])).unwrap();
    assert_eq!(config.addr, "0.0.0.0:4000".parse().unwrap());
    assert_eq!(config.content_root, std::path::PathBuf::from("/var/www/fog"));
    assert_eq!(config.riddle_path(), std::path::PathBuf::from("/etc/fog/riddle.txt"));
    assert_eq!(config.session.lifetime.num_days(), 365 * 5);
    assert!(!config.session.secure_cookie);
    assert_eq!(config.logging.level, LogLevel::Info);
    assert_eq!(config.logging.output, LogOutput::Console);
}

#[test]
fn test_cli_overrides() {
    let config = ServerConfig::from_cli(parse(&[
        "--addr",
        "127.0.0.1:8080",
        "--path",
        "/srv/videos",
        "--config",
        "/srv/conf",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--log-dir",
        "/var/log/fog",
        "--secure-cookie",
        "--session-lifetime-days",
        "30",
    ]))
    .unwrap();

    assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
    assert_eq!(config.content_root, std::path::PathBuf::from("/srv/videos"));
    assert_eq!(config.config_dir, std::path::PathBuf::from("/srv/conf"));
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.output, LogOutput::Both);
    assert!(config.session.secure_cookie);
    assert_eq!(config.session.lifetime.num_days(), 30);
}

#[test]
fn test_log_output_selection() {
    let config = ServerConfig::from_cli(parse(&["--log-output", "file", "--log-source"])).unwrap();
    assert_eq!(config.logging.output, LogOutput::File);
    assert!(config.logging.include_file_info);
    assert_eq!(config.logging.file_directory(), std::path::PathBuf::from("logs"));

    let config = ServerConfig::from_cli(parse(&[
        "--log-dir",
        "/var/log/fog",
        "--log-output",
        "console",
    ]))
    .unwrap();
    assert_eq!(config.logging.output, LogOutput::Console);
}

#[test]
fn test_invalid_lifetime() {
    let err = ServerConfig::from_cli(parse(&["--session-lifetime-days", "0"])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidLifetime(0)));
}

#[test]
fn test_parse_addr() {
    assert_eq!(parse_addr(":4000").unwrap(), "0.0.0.0:4000".parse().unwrap());
    assert_eq!(parse_addr("[::1]:80").unwrap(), "[::1]:80".parse().unwrap());
    assert!(parse_addr("not an address").is_err());
    assert!(parse_addr(":notaport").is_err());
}

#[test]
fn test_load_riddle() {
    let temp = TempDir::new().unwrap();
    let hash = bcrypt::hash("swordfish", 4).unwrap();
    fs::write(
        temp.path().join(RIDDLE_FILE_NAME),
        format!("{}\nWhat swims but has no fins?\n", hash),
    )
    .unwrap();

    let secret = load_riddle(temp.path()).unwrap();
    assert_eq!(secret.hash, hash);
    assert_eq!(secret.body, "What swims but has no fins?\n");
}

#[test]
fn test_load_riddle_missing_file() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(load_riddle(temp.path()), Err(ConfigError::Io { .. })));
}

#[test]
fn test_load_riddle_without_newline() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(RIDDLE_FILE_NAME), "$2b$04$onlyahash").unwrap();

    let err = load_riddle(temp.path()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Riddle {
            source: GateError::MissingNewline,
            ..
        }
    ));
}

#[test]
fn test_load_riddle_bad_hash() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(RIDDLE_FILE_NAME), "plaintext answer\nriddle\n").unwrap();

    let err = load_riddle(temp.path()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Riddle {
            source: GateError::InvalidHash { .. },
            ..
        }
    ));
}
