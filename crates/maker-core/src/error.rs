//! Error types for maker-core

use thiserror::Error;

/// Errors from the fallible edges of the crate (key names, config files).
///
/// Track and segment store operations never fail; they fall back to defaults.
#[derive(Debug, Error)]
pub enum MakerError {
    #[error("Invalid key name: {0}")]
    InvalidKey(String),
    #[error("Invalid track config: {0}")]
    InvalidConfig(String),
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MakerError>;
