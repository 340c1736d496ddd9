//! Launcher errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while spawning terminals or presentation windows.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Mock or injected spawn failure.
    #[error("{0}")]
    Rejected(String),

    #[error("not enough displays detected: found {found}, presentation mode requires {required}")]
    NotEnoughDisplays { found: usize, required: usize },
}

/// Errors that can occur when loading a launcher profile.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid apiVersion: expected 'simdrive/v1', got '{0}'")]
    InvalidApiVersion(String),

    #[error("invalid kind: expected 'LauncherProfile', got '{0}'")]
    InvalidKind(String),

    #[error("terminal program must not be empty")]
    EmptyTerminal,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
