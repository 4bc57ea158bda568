//! Error types for hbsbuild-pipeline.

use std::path::PathBuf;

use thiserror::Error;

use hbsbuild_renderer::RenderError;

/// All errors that can arise while running a build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Listing a stage directory failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a discovered file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON content file is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An error from the template engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Creating an output directory or writing an output file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn walk_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Walk {
        path: path.into(),
        source,
    }
}

pub(crate) fn read_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Read {
        path: path.into(),
        source,
    }
}

pub(crate) fn write_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Write {
        path: path.into(),
        source,
    }
}
