//! Error type shared by the hueboard crates.

use std::path::PathBuf;

/// Result alias using the crate error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration:\n  {}", .0.join("\n  "))]
    ConfigValidation(Vec<String>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown theme '{0}', expected one of: Light, Dark, System")]
    UnknownTheme(String),

    #[error("preference storage is unavailable")]
    StorageUnavailable,

    #[error("meta tag '{0}' not present in document")]
    MetaTagMissing(String),
}
