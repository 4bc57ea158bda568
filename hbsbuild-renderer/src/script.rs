//! Rhai-scripted helpers.
//!
//! A helper file is a Rhai script whose last expression is the helper's
//! value. The script sees three variables:
//!
//! | Variable  | Contents                                         |
//! |-----------|--------------------------------------------------|
//! | `params`  | positional arguments, as an array                |
//! | `hash`    | named arguments (`key=value`), as a map          |
//! | `context` | the current rendering context (`this`)           |
//!
//! Used inline (`{{upper name}}`) the value is written to the output. Used as
//! a block (`{{#equals a b}}yes{{else}}no{{/equals}}`) the value only picks a
//! branch: truthy renders the main block, falsy renders the `{{else}}` block,
//! both against the caller's context, at most once. A script cannot invoke
//! either branch itself. A two-argument equality helper is just
//!
//! ```text
//! params[0] == params[1]
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, JsonRender, JsonTruthy, Output,
    RenderContext, RenderErrorReason, Renderable,
};
use rhai::{Dynamic, Engine, Scope, AST};
use serde_json::{Map, Value as Json};

use crate::error::RenderError;

/// A helper backed by a compiled Rhai script.
pub struct ScriptHelper {
    engine: Arc<Engine>,
    ast: AST,
    path: PathBuf,
}

impl ScriptHelper {
    /// Read and compile the script at `path`.
    ///
    /// Always reads from disk, so calling this again picks up edits.
    pub fn load(engine: Arc<Engine>, path: &Path) -> Result<Self, RenderError> {
        let source = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::compile(engine, path, &source)
    }

    /// Compile `source`; `path` is only used in error messages.
    pub fn compile(engine: Arc<Engine>, path: &Path, source: &str) -> Result<Self, RenderError> {
        let ast = engine.compile(source).map_err(|e| RenderError::Script {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(ScriptHelper {
            engine,
            ast,
            path: path.to_path_buf(),
        })
    }

    /// Run the script with the given arguments and return its value as JSON.
    pub fn evaluate(
        &self,
        params: &[Json],
        hash: &Map<String, Json>,
        context: &Json,
    ) -> Result<Json, String> {
        let mut scope = Scope::new();
        scope.push_dynamic("params", rhai::serde::to_dynamic(params).map_err(|e| e.to_string())?);
        scope.push_dynamic("hash", rhai::serde::to_dynamic(hash).map_err(|e| e.to_string())?);
        scope.push_dynamic(
            "context",
            rhai::serde::to_dynamic(context).map_err(|e| e.to_string())?,
        );

        let result: Dynamic = self
            .engine
            .eval_ast_with_scope(&mut scope, &self.ast)
            .map_err(|e| e.to_string())?;
        rhai::serde::from_dynamic(&result).map_err(|e| e.to_string())
    }
}

impl HelperDef for ScriptHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let params: Vec<Json> = h.params().iter().map(|p| p.value().clone()).collect();
        let hash: Map<String, Json> = h
            .hash()
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.value().clone()))
            .collect();
        let this = rc.evaluate(ctx, "this")?.as_json().clone();

        let value = self.evaluate(&params, &hash, &this).map_err(|message| {
            RenderErrorReason::Other(format!(
                "helper '{}' ({}) failed: {message}",
                h.name(),
                self.path.display()
            ))
        })?;

        if h.is_block() {
            let branch = if value.is_truthy(false) {
                h.template()
            } else {
                h.inverse()
            };
            return match branch {
                Some(t) => t.render(r, ctx, rc, out),
                None => Ok(()),
            };
        }

        match value {
            Json::Null => {}
            Json::String(s) => out.write(&s)?,
            other => out.write(&other.render())?,
        }
        Ok(())
    }
}
