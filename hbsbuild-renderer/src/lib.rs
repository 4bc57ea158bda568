//! # hbsbuild-renderer
//!
//! Handlebars-based template engine with Rhai script helpers, plus the
//! [`ContextStore`] that every page is rendered against.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hbsbuild_renderer::{ContextStore, TemplateEngine};
//!
//! fn render() -> Result<String, hbsbuild_renderer::RenderError> {
//!     let mut engine = TemplateEngine::new(false);
//!     engine.register_partial("header", "<h1>{{title}}</h1>")?;
//!
//!     let mut store = ContextStore::new();
//!     store.insert("title", serde_json::json!("Hello"));
//!     engine.render_page("page.hbs", "{{> header}}", &store)
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod script;

pub use context::{ContextStore, ENV_KEY};
pub use engine::TemplateEngine;
pub use error::RenderError;
pub use script::ScriptHelper;
