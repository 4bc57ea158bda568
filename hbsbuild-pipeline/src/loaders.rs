//! Context-building stages: JSON content, helpers, partials.
//!
//! Each loader walks its directory, derives a logical name per file with
//! [`logical_name`], and registers the file. Any failure aborts the stage and
//! is returned to the caller; a missing directory contributes nothing.
//! Each returns the number of files it loaded.

use std::fs;
use std::path::Path;

use hbsbuild_renderer::{ContextStore, TemplateEngine};

use crate::error::{read_err, BuildError};
use crate::walker::{logical_name, walk};

/// Parse every file under `dir` as JSON and store it under its logical name.
pub fn load_json(dir: &str, store: &mut ContextStore) -> Result<usize, BuildError> {
    let files = walk(dir)?;
    for rel in &files {
        let path = format!("{dir}{rel}");
        let text = fs::read_to_string(&path).map_err(|e| read_err(&path, e))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| BuildError::Json {
                path: path.clone().into(),
                source,
            })?;
        let key = logical_name(rel);
        store.insert(key, value);
        tracing::debug!("loaded JSON content '{key}' from {path}");
    }
    Ok(files.len())
}

/// Compile every file under `dir` as a script helper named after the file.
///
/// Scripts are read from disk on every call; nothing is cached between builds.
pub fn load_helpers(dir: &str, engine: &mut TemplateEngine) -> Result<usize, BuildError> {
    let files = walk(dir)?;
    for rel in &files {
        let path = format!("{dir}{rel}");
        let absolute = Path::new(&path)
            .canonicalize()
            .map_err(|e| read_err(&path, e))?;
        let name = logical_name(rel);
        engine.register_script_helper(name, &absolute)?;
        tracing::debug!("registered helper '{name}' from {}", absolute.display());
    }
    Ok(files.len())
}

/// Register every file under `dir` as a partial and store its raw source
/// under the same name.
pub fn load_partials(
    dir: &str,
    store: &mut ContextStore,
    engine: &mut TemplateEngine,
) -> Result<usize, BuildError> {
    let files = walk(dir)?;
    for rel in &files {
        let path = format!("{dir}{rel}");
        let source = fs::read_to_string(&path).map_err(|e| read_err(&path, e))?;
        let name = logical_name(rel);
        engine.register_partial(name, &source)?;
        store.insert_raw(name, source);
        tracing::debug!("registered partial '{name}' from {path}");
    }
    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn dir_of(tmp: &TempDir) -> String {
        format!("{}/", tmp.path().display())
    }

    #[test]
    fn json_files_are_keyed_by_logical_name() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("blog")).unwrap();
        fs::write(tmp.path().join("site.json"), r#"{"name":"Acme"}"#).unwrap();
        fs::write(tmp.path().join("blog/posts.json"), "[1,2]").unwrap();

        let mut store = ContextStore::new();
        let loaded = load_json(&dir_of(&tmp), &mut store).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(store.get("site"), Some(&json!({"name": "Acme"})));
        assert_eq!(store.get("blog/posts"), Some(&json!([1, 2])));
    }

    #[test]
    fn dotted_json_name_collides_with_plain_one() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("foo.bar.json"), r#""dotted""#).unwrap();
        fs::write(tmp.path().join("foo.json"), r#""plain""#).unwrap();

        let mut store = ContextStore::new();
        load_json(&dir_of(&tmp), &mut store).unwrap();

        assert_eq!(store.len(), 1, "both files map to the key 'foo'");
        let value = store.get("foo").unwrap();
        assert!(value == &json!("dotted") || value == &json!("plain"));
    }

    #[test]
    fn malformed_json_is_fatal_and_names_the_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.json"), "{not json").unwrap();

        let mut store = ContextStore::new();
        let err = load_json(&dir_of(&tmp), &mut store).unwrap_err();
        assert!(matches!(err, BuildError::Json { .. }), "got: {err}");
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn missing_directories_load_nothing() {
        let tmp = TempDir::new().unwrap();
        let missing = format!("{}/absent/", tmp.path().display());
        let mut store = ContextStore::new();
        let mut engine = TemplateEngine::default();

        assert_eq!(load_json(&missing, &mut store).unwrap(), 0);
        assert_eq!(load_helpers(&missing, &mut engine).unwrap(), 0);
        assert_eq!(load_partials(&missing, &mut store, &mut engine).unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn partials_are_registered_and_stored_raw() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("header.hbs"), "<h1>{{title}}</h1>").unwrap();

        let mut store = ContextStore::new();
        let mut engine = TemplateEngine::default();
        load_partials(&dir_of(&tmp), &mut store, &mut engine).unwrap();

        assert!(engine.has_partial("header"));
        assert_eq!(store.get("header"), Some(&json!("<h1>{{title}}</h1>")));
    }

    #[test]
    fn invalid_partial_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.hbs"), "{{#if x}}unclosed").unwrap();

        let mut store = ContextStore::new();
        let mut engine = TemplateEngine::default();
        let err = load_partials(&dir_of(&tmp), &mut store, &mut engine).unwrap_err();
        assert!(matches!(err, BuildError::Render(_)), "got: {err}");
    }

    #[test]
    fn helpers_are_registered_on_the_engine() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("equals.rhai"), "params[0] == params[1]").unwrap();

        let mut engine = TemplateEngine::default();
        let loaded = load_helpers(&dir_of(&tmp), &mut engine).unwrap();
        assert_eq!(loaded, 1);
        assert!(engine.has_helper("equals"));
    }

    #[test]
    fn helper_syntax_error_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.rhai"), "let = ;").unwrap();

        let mut engine = TemplateEngine::default();
        let err = load_helpers(&dir_of(&tmp), &mut engine).unwrap_err();
        assert!(matches!(err, BuildError::Render(_)), "got: {err}");
        assert!(err.to_string().contains("broken.rhai"));
    }
}
