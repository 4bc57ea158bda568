//! Error types for hbsbuild-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading or saving a build configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, annotated with the config file path.
    #[error("config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML/JSON parse error on load. Carries the file path; serde_yaml adds line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Refused to overwrite an existing config file.
    #[error("config already exists at {path}")]
    AlreadyExists { path: PathBuf },
}
