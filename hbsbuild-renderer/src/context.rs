//! Context store — the root data value every page is rendered against.
//!
//! Holds the process environment under [`ENV_KEY`], parsed JSON content under
//! each JSON file's key, and raw partial sources under each partial's key.
//! Helpers are never stored here.
//!
//! A page is rendered against [`ContextStore::for_page`]: when the store holds
//! an object under the page's own key, that object's fields are also visible
//! at the root, so `page.hbs` can write `{{title}}` for `json/page.json`.

use std::borrow::Cow;
use std::ffi::OsString;

use serde::Serialize;
use serde_json::{Map, Value};

/// Reserved key for the environment variable mapping.
pub const ENV_KEY: &str = "ENV";

/// Mapping from logical name to value, built up stage by stage.
///
/// Inserting an existing key replaces the old value (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContextStore {
    entries: Map<String, Value>,
}

impl ContextStore {
    /// An empty store with no environment seeded.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the current process environment under [`ENV_KEY`].
    pub fn from_env() -> Self {
        Self::with_env_vars(std::env::vars_os())
    }

    /// A store seeded with the given variables under [`ENV_KEY`].
    ///
    /// Non-UTF-8 names and values are converted lossily.
    pub fn with_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let env: Map<String, Value> = vars
            .into_iter()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    Value::String(v.to_string_lossy().into_owned()),
                )
            })
            .collect();
        let mut store = Self::new();
        store.insert(ENV_KEY, Value::Object(env));
        store
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        let previous = self.entries.insert(key.clone(), value);
        if previous.is_some() {
            tracing::debug!("context key '{key}' overwritten");
        }
        previous
    }

    /// Store a partial's raw source under `key`.
    pub fn insert_raw(&mut self, key: impl Into<String>, contents: String) -> Option<Value> {
        self.insert(key, Value::String(contents))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Render data for the page whose logical name is `page_key`.
    ///
    /// If the value under `page_key` is an object, its fields are laid over
    /// the root, replacing same-named root keys. The keyed entry itself stays.
    /// Any other value (a partial's source, an array, a scalar) leaves the
    /// store as it is.
    pub fn for_page(&self, page_key: &str) -> Cow<'_, ContextStore> {
        let Some(Value::Object(fields)) = self.entries.get(page_key) else {
            return Cow::Borrowed(self);
        };
        let mut scoped = self.clone();
        for (key, value) in fields {
            scoped.entries.insert(key.clone(), value.clone());
        }
        Cow::Owned(scoped)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn env_is_seeded_under_reserved_key() {
        let store = ContextStore::with_env_vars(vec![(
            OsString::from("HBS_MODE"),
            OsString::from("production"),
        )]);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(ENV_KEY).and_then(|env| env.get("HBS_MODE")),
            Some(&json!("production"))
        );
    }

    #[test]
    fn from_env_contains_process_variables() {
        let store = ContextStore::from_env();
        let env = store.get(ENV_KEY).expect("ENV key");
        assert!(env.is_object());
        if let Ok(path) = std::env::var("PATH") {
            assert_eq!(env.get("PATH"), Some(&json!(path)));
        }
    }

    #[test]
    fn insert_overwrites_and_returns_previous() {
        let mut store = ContextStore::new();
        assert!(store.insert("site", json!({"name": "one"})).is_none());
        let previous = store.insert_raw("site", "<header/>".to_string());
        assert_eq!(previous, Some(json!({"name": "one"})));
        assert_eq!(store.get("site"), Some(&json!("<header/>")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn serializes_as_a_flat_object() {
        let mut store = ContextStore::new();
        store.insert("title", json!("Hello"));
        store.insert_raw("footer", "<footer/>".to_string());
        let value = serde_json::to_value(&store).unwrap();
        assert_eq!(value, json!({"title": "Hello", "footer": "<footer/>"}));
    }

    #[test]
    fn page_object_fields_are_lifted_to_the_root() {
        let mut store = ContextStore::new();
        store.insert("title", json!("Site"));
        store.insert("lang", json!("en"));
        store.insert("page", json!({"title": "Hello"}));

        let data = store.for_page("page");
        assert!(matches!(data, Cow::Owned(_)));
        assert_eq!(data.get("title"), Some(&json!("Hello")));
        assert_eq!(data.get("lang"), Some(&json!("en")));
        assert_eq!(data.get("page"), Some(&json!({"title": "Hello"})));
        // The shared store is untouched.
        assert_eq!(store.get("title"), Some(&json!("Site")));
    }

    #[test]
    fn non_object_page_value_is_not_lifted() {
        let mut store = ContextStore::new();
        store.insert_raw("page", "<p>{{title}}</p>".to_string());
        store.insert("list", json!([1, 2]));

        assert!(matches!(store.for_page("page"), Cow::Borrowed(_)));
        assert!(matches!(store.for_page("list"), Cow::Borrowed(_)));
        assert!(matches!(store.for_page("absent"), Cow::Borrowed(_)));
        assert_eq!(*store.for_page("page"), store);
    }
}
