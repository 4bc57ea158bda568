//! Build orchestration.
//!
//! Stages always run in this order, each feeding the next:
//!
//! 1. JSON content → context store
//! 2. helpers → engine
//! 3. partials → engine and context store
//! 4. page templates → output files
//!
//! Because partials load after JSON content, a partial overwrites JSON
//! content that has the same logical name. Stages 1–3 stop the build on the
//! first error; stage 4 records per-page failures and carries on.

use hbsbuild_core::BuildConfig;
use hbsbuild_renderer::{ContextStore, TemplateEngine};

use crate::error::BuildError;
use crate::loaders::{load_helpers, load_json, load_partials};
use crate::walker::{filter_paths, walk};
use crate::writer::{compile_templates, PageFailure, WriteResult};

/// Summary of a completed build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub json_loaded: usize,
    pub helpers_loaded: usize,
    pub partials_loaded: usize,
    pub writes: Vec<WriteResult>,
    pub failures: Vec<PageFailure>,
}

impl BuildReport {
    /// `true` when every page compiled.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run a build with `engine`, seeding the context with the process
/// environment.
pub fn build(config: &BuildConfig, engine: &mut TemplateEngine) -> Result<BuildReport, BuildError> {
    build_with_store(config, engine, ContextStore::from_env())
}

/// Run a build with a fresh engine configured from `config`.
pub fn build_with_fresh_engine(config: &BuildConfig) -> Result<BuildReport, BuildError> {
    let mut engine = TemplateEngine::new(config.strict);
    build(config, &mut engine)
}

/// Run a build starting from an explicit context store.
pub fn build_with_store(
    config: &BuildConfig,
    engine: &mut TemplateEngine,
    mut store: ContextStore,
) -> Result<BuildReport, BuildError> {
    tracing::info!(
        "starting build: {} -> {}",
        config.input_dir,
        config.output_dir
    );

    let json_loaded = load_json(&config.json_path(), &mut store)?;
    tracing::info!("loaded {json_loaded} JSON file(s)");

    let helpers_loaded = load_helpers(&config.helpers_path(), engine)?;
    tracing::info!("registered {helpers_loaded} helper(s)");

    let partials_loaded = load_partials(&config.partials_path(), &mut store, engine)?;
    tracing::info!("registered {partials_loaded} partial(s)");

    let pages = compile_templates(config, &store, engine)?;
    tracing::info!(
        "finished build: {} page(s) compiled, {} failed",
        pages.writes.len(),
        pages.failures.len()
    );

    Ok(BuildReport {
        json_loaded,
        helpers_loaded,
        partials_loaded,
        writes: pages.writes,
        failures: pages.failures,
    })
}

/// Files each stage would pick up, without loading anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub json: Vec<String>,
    pub helpers: Vec<String>,
    pub partials: Vec<String>,
    /// Page templates after the filter is applied.
    pub templates: Vec<String>,
}

/// Walk every stage directory for `config`.
pub fn discover(config: &BuildConfig) -> Result<Discovery, BuildError> {
    Ok(Discovery {
        json: walk(&config.json_path())?,
        helpers: walk(&config.helpers_path())?,
        partials: walk(&config.partials_path())?,
        templates: filter_paths(walk(&config.templates_path())?, &config.filter),
    })
}
