//! Error types for hbsbuild-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template engine registration and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A partial's source is not a valid template.
    #[error("invalid partial '{name}': {source}")]
    Partial {
        name: String,
        #[source]
        source: handlebars::TemplateError,
    },

    /// A helper script failed to compile.
    #[error("invalid helper script at {path}: {message}")]
    Script { path: PathBuf, message: String },

    /// Filesystem error while reading a helper script.
    #[error("helper io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A page template failed to compile.
    #[error("failed to compile '{name}': {source}")]
    Compile {
        name: String,
        #[source]
        source: handlebars::RenderError,
    },

    /// A page template compiled but failed while rendering.
    #[error("failed to render '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: handlebars::RenderError,
    },
}
