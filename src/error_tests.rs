//! Tests for CoachError type

use super::*;

#[test]
fn test_worker_spawn_error_display() {
    let io_err = std::io::Error::other("thread limit reached");
    let error = CoachError::WorkerSpawn(io_err);
    let msg = error.to_string();
    assert!(msg.contains("suggestion worker"));
    assert!(msg.contains("thread limit reached"));
}

#[test]
fn test_engine_client_error_display() {
    let error = CoachError::EngineClient("bad TLS config".to_string());
    assert!(error.to_string().contains("bad TLS config"));
}

#[test]
fn test_io_error_from_std_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test error");
    let coach_err = CoachError::from(io_err);
    assert!(matches!(coach_err, CoachError::Io(_)));
    assert!(coach_err.to_string().contains("test error"));
}

#[test]
fn test_config_error_converts() {
    let parse_err = toml::from_str::<crate::config::Config>("suggestions = 3").unwrap_err();
    let coach_err = CoachError::from(ConfigError::Parse(parse_err));
    assert!(matches!(coach_err, CoachError::Config(_)));
    assert!(coach_err.to_string().starts_with("Configuration error"));
}
