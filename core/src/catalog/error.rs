//! Error types for technique catalog loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading user technique definitions
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read technique file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse technique TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid technique '{key}' in {path}: {reason}")]
    InvalidDefinition {
        path: PathBuf,
        key: String,
        reason: String,
    },
}
