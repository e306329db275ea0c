//! Per-locale message trees.
//!
//! Each locale has one JSON dictionary (`messages/tr.json`, `messages/en.json`)
//! holding every piece of copy on the site, from nav labels to full project
//! descriptions. Keys are dot-delimited paths into the nested tree
//! (`projects.project5.title`) and are identical across locales; only the
//! values differ.
//!
//! Both files are loaded once at startup and never mutated. Lookups are
//! in-memory tree walks — no I/O at request or render time.
//!
//! ## Missing keys
//!
//! [`MessageStore::get`] returns `Option<&str>` so callers can distinguish
//! absent content (a not-found condition) from present-but-empty content.
//! [`MessageStore::get_or_empty`] is the presentation-layer accessor: a
//! missing leaf renders as an empty string rather than failing the page.

use crate::locale::Locale;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MessagesError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Immutable store of all translated copy, one tree per locale.
#[derive(Debug)]
pub struct MessageStore {
    trees: HashMap<Locale, Value>,
}

impl MessageStore {
    /// Load `messages/{locale}.json` for every supported locale.
    ///
    /// Every locale file is required — the site is fully bilingual, so a
    /// missing file is a content error, not a fallback case.
    pub fn load(content_dir: &Path) -> Result<Self, MessagesError> {
        let mut trees = HashMap::new();
        for locale in Locale::ALL {
            let path = content_dir
                .join("messages")
                .join(format!("{}.json", locale.as_str()));
            let raw = fs::read_to_string(&path).map_err(|source| MessagesError::Io {
                path: path.clone(),
                source,
            })?;
            let tree =
                serde_json::from_str(&raw).map_err(|source| MessagesError::Json { path, source })?;
            trees.insert(locale, tree);
        }
        Ok(Self { trees })
    }

    /// Walk a dot-delimited key to the node it names, if present.
    pub fn node(&self, locale: Locale, key: &str) -> Option<&Value> {
        let mut node = self.trees.get(&locale)?;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        Some(node)
    }

    /// String value at `key`, or `None` if absent or not a string.
    pub fn get(&self, locale: Locale, key: &str) -> Option<&str> {
        self.node(locale, key).and_then(Value::as_str)
    }

    /// String value at `key`, defaulting to `""` for the presentation layer.
    pub fn get_or_empty(&self, locale: Locale, key: &str) -> &str {
        self.get(locale, key).unwrap_or("")
    }

    /// String-array value at `key` (skills lists, expertise items).
    /// Missing keys and non-string elements yield an empty/partial list.
    pub fn list(&self, locale: Locale, key: &str) -> Vec<&str> {
        self.node(locale, key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::setup_fixture;

    #[test]
    fn loads_both_locales() {
        let tmp = setup_fixture();
        let store = MessageStore::load(tmp.path()).unwrap();
        assert!(store.get(Locale::Tr, "nav.home").is_some());
        assert!(store.get(Locale::En, "nav.home").is_some());
    }

    #[test]
    fn values_differ_across_locales_for_the_same_key() {
        let tmp = setup_fixture();
        let store = MessageStore::load(tmp.path()).unwrap();
        assert_ne!(
            store.get(Locale::Tr, "nav.home"),
            store.get(Locale::En, "nav.home")
        );
    }

    #[test]
    fn dot_path_reaches_nested_leaves() {
        let tmp = setup_fixture();
        let store = MessageStore::load(tmp.path()).unwrap();
        assert_eq!(
            store.get(Locale::En, "projects.project17.title"),
            Some("Bagfas Port Facility")
        );
    }

    #[test]
    fn missing_key_is_none_and_empty_for_presentation() {
        let tmp = setup_fixture();
        let store = MessageStore::load(tmp.path()).unwrap();
        assert_eq!(store.get(Locale::En, "projects.project999.title"), None);
        assert_eq!(store.get_or_empty(Locale::En, "projects.project999.title"), "");
    }

    #[test]
    fn non_string_node_is_not_a_string_value() {
        let tmp = setup_fixture();
        let store = MessageStore::load(tmp.path()).unwrap();
        // `projects` is an object, not a leaf
        assert_eq!(store.get(Locale::En, "projects"), None);
        assert!(store.node(Locale::En, "projects").is_some());
    }

    #[test]
    fn list_lookup_reads_string_arrays() {
        let tmp = setup_fixture();
        let store = MessageStore::load(tmp.path()).unwrap();
        let items = store.list(Locale::En, "projects.expertiseTechnologies");
        assert!(!items.is_empty());
        assert!(store.list(Locale::En, "projects.noSuchList").is_empty());
    }

    #[test]
    fn missing_locale_file_is_a_load_error() {
        let tmp = setup_fixture();
        std::fs::remove_file(tmp.path().join("messages/en.json")).unwrap();
        let result = MessageStore::load(tmp.path());
        assert!(matches!(result, Err(MessagesError::Io { .. })));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let tmp = setup_fixture();
        std::fs::write(tmp.path().join("messages/en.json"), "{ not json").unwrap();
        let result = MessageStore::load(tmp.path());
        assert!(matches!(result, Err(MessagesError::Json { .. })));
    }
}
