use thiserror::Error;

use crate::config::ConfigError;

/// Custom error types for keycoach
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Failed to start suggestion worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("Failed to build coaching engine client: {0}")]
    EngineClient(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
