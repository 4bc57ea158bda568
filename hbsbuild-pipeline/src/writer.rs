//! Page stage: compile every page template and write the results.
//!
//! Unlike the context-building stages, a failing page does not stop the
//! build. Its error is logged and recorded as a [`PageFailure`], and the
//! remaining pages are still compiled.

use std::fs;
use std::path::{Path, PathBuf};

use hbsbuild_core::BuildConfig;
use hbsbuild_renderer::{ContextStore, TemplateEngine};

use crate::error::{read_err, write_err, BuildError};
use crate::walker::{filter_paths, logical_name, walk};

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of an individual page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// The page was rendered and written.
    Written { template: String, path: PathBuf },
    /// Dry-run mode: the page rendered and *would* have been written.
    WouldWrite { template: String, path: PathBuf },
}

impl WriteResult {
    pub fn template(&self) -> &str {
        match self {
            WriteResult::Written { template, .. } | WriteResult::WouldWrite { template, .. } => {
                template
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } | WriteResult::WouldWrite { path, .. } => path,
        }
    }
}

/// A page that failed to read, compile, render or write.
#[derive(Debug)]
pub struct PageFailure {
    /// Template path relative to the templates directory.
    pub template: String,
    pub error: BuildError,
}

/// Everything the page stage did.
#[derive(Debug, Default)]
pub struct PageOutcome {
    pub writes: Vec<WriteResult>,
    pub failures: Vec<PageFailure>,
}

// ---------------------------------------------------------------------------
// Page stage
// ---------------------------------------------------------------------------

/// Compile every (filtered) page under the configured templates directory.
///
/// Only walking the templates directory can fail the stage as a whole.
pub fn compile_templates(
    config: &BuildConfig,
    store: &ContextStore,
    engine: &TemplateEngine,
) -> Result<PageOutcome, BuildError> {
    let templates_dir = config.templates_path();
    let pages = filter_paths(walk(&templates_dir)?, &config.filter);

    let mut outcome = PageOutcome::default();
    for rel in pages {
        match compile_page(config, &templates_dir, &rel, store, engine) {
            Ok(result) => outcome.writes.push(result),
            Err(error) => {
                tracing::error!("page '{rel}' failed: {error}");
                outcome.failures.push(PageFailure {
                    template: rel,
                    error,
                });
            }
        }
    }
    Ok(outcome)
}

fn compile_page(
    config: &BuildConfig,
    templates_dir: &str,
    rel: &str,
    store: &ContextStore,
    engine: &TemplateEngine,
) -> Result<WriteResult, BuildError> {
    let source_path = format!("{templates_dir}{rel}");
    let source = fs::read_to_string(&source_path).map_err(|e| read_err(&source_path, e))?;
    let name = logical_name(rel);
    let data = store.for_page(name);
    let rendered = engine.render_page(rel, &source, &data)?;

    let output = PathBuf::from(config.output_path(name));
    if config.dry_run {
        tracing::info!("[dry-run] would write: {}", output.display());
        return Ok(WriteResult::WouldWrite {
            template: rel.to_string(),
            path: output,
        });
    }

    write_page(&output, &rendered)?;
    tracing::info!("compiled: {}", output.display());
    Ok(WriteResult::Written {
        template: rel.to_string(),
        path: output,
    })
}

/// Overwrite `path` with `content`, creating its immediate parent directory
/// first if needed. Only one level is created.
pub fn write_page(path: &Path, content: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir(parent).map_err(|e| write_err(parent, e))?;
        }
    }
    fs::write(path, content).map_err(|e| write_err(path, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
