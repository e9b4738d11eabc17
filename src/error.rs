use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading and coercing values.
///
/// Binding itself never fails; these come from reading TOML files and from
/// the strict [`MapSource::get`](crate::MapSource::get) accessor.
#[derive(Debug, Error)]
pub enum ClixError {
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}
