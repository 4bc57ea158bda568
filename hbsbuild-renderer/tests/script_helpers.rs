//! Script helpers loaded from disk: block branches, inline values, reload.

use std::fs;

use hbsbuild_renderer::{ContextStore, RenderError, TemplateEngine};
use serde_json::json;
use tempfile::TempDir;

const EQUALS: &str = "params[0] == params[1]\n";

fn store_with(key: &str, value: serde_json::Value) -> ContextStore {
    let mut store = ContextStore::new();
    store.insert(key, value);
    store
}

#[test]
fn equals_renders_primary_branch_for_equal_args() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("equals.rhai");
    fs::write(&path, EQUALS).unwrap();

    let mut engine = TemplateEngine::default();
    engine.register_script_helper("equals", &path).unwrap();
    assert!(engine.has_helper("equals"));

    let out = engine
        .render_page(
            "page.hbs",
            r#"{{#equals mode "live"}}on{{else}}off{{/equals}}"#,
            &store_with("mode", json!("live")),
        )
        .unwrap();
    assert_eq!(out, "on");
}

#[test]
fn equals_renders_inverse_branch_for_unequal_args() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("equals.rhai");
    fs::write(&path, EQUALS).unwrap();

    let mut engine = TemplateEngine::default();
    engine.register_script_helper("equals", &path).unwrap();

    let out = engine
        .render_page(
            "page.hbs",
            r#"{{#equals mode "live"}}on{{else}}off{{/equals}}"#,
            &store_with("mode", json!("draft")),
        )
        .unwrap();
    assert_eq!(out, "off");
}

#[test]
fn block_branches_render_against_callers_context() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("equals.rhai");
    fs::write(&path, EQUALS).unwrap();

    let mut engine = TemplateEngine::default();
    engine.register_script_helper("equals", &path).unwrap();

    let store = store_with(
        "items",
        json!([{"kind": "a", "label": "first"}, {"kind": "b", "label": "second"}]),
    );
    let out = engine
        .render_page(
            "list.hbs",
            r#"{{#each items}}{{#equals kind "a"}}[{{label}}]{{else}}({{label}}){{/equals}}{{/each}}"#,
            &store,
        )
        .unwrap();
    assert_eq!(out, "[first](second)");
}

#[test]
fn inline_helper_writes_its_value() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shout.rhai");
    fs::write(&path, r#"params[0].to_upper() + hash.suffix"#).unwrap();

    let mut engine = TemplateEngine::default();
    engine.register_script_helper("shout", &path).unwrap();

    let out = engine
        .render_page(
            "page.hbs",
            r#"{{shout name suffix="!"}}"#,
            &store_with("name", json!("hey")),
        )
        .unwrap();
    assert_eq!(out, "HEY!");
}

#[test]
fn reregistering_reads_the_script_again() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("label.rhai");
    fs::write(&path, r#""old""#).unwrap();

    let mut engine = TemplateEngine::default();
    engine.register_script_helper("label", &path).unwrap();
    let first = engine.render_page("p", "{{label}}", &ContextStore::new()).unwrap();

    fs::write(&path, r#""new""#).unwrap();
    engine.register_script_helper("label", &path).unwrap();
    let second = engine.render_page("p", "{{label}}", &ContextStore::new()).unwrap();

    assert_eq!(first, "old");
    assert_eq!(second, "new");
}

#[test]
fn missing_script_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let mut engine = TemplateEngine::default();
    let err = engine
        .register_script_helper("ghost", &dir.path().join("ghost.rhai"))
        .unwrap_err();
    assert!(matches!(err, RenderError::Io { .. }), "got: {err}");
    assert!(!engine.has_helper("ghost"));
}

#[test]
fn failing_script_surfaces_as_page_render_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boom.rhai");
    fs::write(&path, r#"throw "boom""#).unwrap();

    let mut engine = TemplateEngine::default();
    engine.register_script_helper("boom", &path).unwrap();
    let err = engine
        .render_page("page.hbs", "{{boom}}", &ContextStore::new())
        .unwrap_err();
    assert!(matches!(err, RenderError::Render { .. }), "got: {err}");
}
