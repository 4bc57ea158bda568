//! Handlebars template engine wrapper.
//!
//! One [`TemplateEngine`] owns the partial and helper namespaces for a build.
//! It is created by the caller and passed into the pipeline, so separate
//! builds (or tests) never share registrations unless they share an engine.
//! Registering a name twice replaces the earlier registration.
//!
//! HTML escaping is switched off: interpolated values are written verbatim.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use handlebars::{Handlebars, HelperDef, RenderErrorReason};

use crate::context::ContextStore;
use crate::error::RenderError;
use crate::script::ScriptHelper;

/// Handlebars registry plus the Rhai engine used for script helpers.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
    scripts: Arc<rhai::Engine>,
    partials: BTreeSet<String>,
    helpers: BTreeSet<String>,
}

impl TemplateEngine {
    /// Construct an engine with no partials or helpers.
    ///
    /// In `strict` mode, referencing a missing field is a render error
    /// instead of rendering as nothing.
    pub fn new(strict: bool) -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(strict);
        TemplateEngine {
            registry,
            scripts: Arc::new(rhai::Engine::new()),
            partials: BTreeSet::new(),
            helpers: BTreeSet::new(),
        }
    }

    /// Register `source` as the partial `name`, usable as `{{> name}}`.
    pub fn register_partial(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.registry
            .register_partial(name, source)
            .map_err(|source| RenderError::Partial {
                name: name.to_string(),
                source,
            })?;
        self.partials.insert(name.to_string());
        Ok(())
    }

    /// Read and compile the Rhai script at `path` and register it as the
    /// helper `name`. See [`crate::script`] for the script contract.
    pub fn register_script_helper(&mut self, name: &str, path: &Path) -> Result<(), RenderError> {
        let helper = ScriptHelper::load(Arc::clone(&self.scripts), path)?;
        self.register_helper(name, Box::new(helper));
        Ok(())
    }

    /// Register a native helper.
    pub fn register_helper(&mut self, name: &str, def: Box<dyn HelperDef + Send + Sync + 'static>) {
        self.registry.register_helper(name, def);
        self.helpers.insert(name.to_string());
    }

    pub fn has_partial(&self, name: &str) -> bool {
        self.partials.contains(name)
    }

    pub fn has_helper(&self, name: &str) -> bool {
        self.helpers.contains(name)
    }

    /// Names of partials registered through this engine, sorted.
    pub fn partial_names(&self) -> impl Iterator<Item = &str> {
        self.partials.iter().map(String::as_str)
    }

    /// Compile `source` and render it with the whole `store` as root data.
    ///
    /// `name` identifies the page in errors; it is not registered.
    pub fn render_page(
        &self,
        name: &str,
        source: &str,
        store: &ContextStore,
    ) -> Result<String, RenderError> {
        self.registry.render_template(source, store).map_err(|source| {
            if matches!(source.reason(), RenderErrorReason::TemplateError(_)) {
                RenderError::Compile {
                    name: name.to_string(),
                    source,
                }
            } else {
                RenderError::Render {
                    name: name.to_string(),
                    source,
                }
            }
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new(false)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
