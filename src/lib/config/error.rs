use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to parse environment file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}
