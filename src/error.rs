use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid key notation: {0}")]
    InvalidKey(String),

    #[error("Invalid shortcut for {action}: {value:?} (expected a single character)")]
    InvalidShortcut { action: String, value: String },

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Unknown shortcut action: {0}")]
    UnknownAction(String),

    #[error("Element carries markers for more than one region: {}", .0.join(", "))]
    AmbiguousRegion(Vec<&'static str>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
