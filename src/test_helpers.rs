//! Shared test utilities for the test suite.
//!
//! Provides fixture setup (an isolated copy of `fixtures/content/` per test)
//! and mutation helpers for exercising load-time edge cases.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (tmp, site) = load_fixture_site();
//! let record = site.project(Locale::En, "bagfas").unwrap();
//! assert_eq!(record.id, 17);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::Site;
use crate::locale::Locale;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

/// Fixture copy plus a loaded [`Site`] over it.
pub fn load_fixture_site() -> (TempDir, Site) {
    let tmp = setup_fixture();
    let site = Site::load(tmp.path()).unwrap();
    (tmp, site)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Fixture mutation
// =========================================================================

/// Replace the fixture registry with the given `(slug, id)` rows.
pub fn write_registry(root: &Path, entries: &[(&str, u32)]) {
    let mut raw = String::new();
    for (slug, id) in entries {
        raw.push_str(&format!("[[projects]]\nslug = \"{slug}\"\nid = {id}\n\n"));
    }
    std::fs::write(root.join("projects/projects.toml"), raw).unwrap();
}

/// Set one dot-path key in a fixture message tree, creating intermediate
/// objects as needed.
pub fn insert_message(root: &Path, locale: Locale, key: &str, value: serde_json::Value) {
    let path = root
        .join("messages")
        .join(format!("{}.json", locale.as_str()));
    let mut tree: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    let parts: Vec<&str> = key.split('.').collect();
    let (leaf, branches) = parts.split_last().unwrap();
    let mut node = &mut tree;
    for part in branches {
        node = node
            .as_object_mut()
            .unwrap()
            .entry(part.to_string())
            .or_insert_with(|| serde_json::json!({}));
    }
    node.as_object_mut()
        .unwrap()
        .insert(leaf.to_string(), value);

    std::fs::write(&path, serde_json::to_string_pretty(&tree).unwrap()).unwrap();
}
