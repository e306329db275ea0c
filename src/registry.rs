//! Slug registry and static page enumeration.
//!
//! `projects/projects.toml` is the hand-maintained map from URL slugs to
//! project ids:
//!
//! ```toml
//! [[projects]]
//! slug = "bagfas"
//! id = 17
//!
//! [[projects]]
//! slug = "kemerkoy"
//! id = 18
//! ```
//!
//! File order is the registry's canonical order. The id space may have gaps —
//! a project that was taken off the site keeps its message records but loses
//! its registry entry, which makes it unreachable by any slug and absent from
//! the generated page set. The gap is data, not a rule; nothing here computes
//! or special-cases it.
//!
//! ## Image discovery
//!
//! Each slug may have a directory `projects/{slug}/` of gallery images named
//! `image-{n}.png`. The list is discovered once at load time, ordered by `n`,
//! and keyed by slug (never by id, and never per locale). A missing or empty
//! directory is a valid state — the detail page renders a placeholder.

use crate::locale::Locale;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Internal small-integer project identifier. Ids are stable but not
/// contiguous.
pub type ProjectId = u32;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("duplicate slug in registry: {0}")]
    DuplicateSlug(String),
    #[error("project id {0} mapped by both '{1}' and '{2}'")]
    DuplicateId(ProjectId, String, String),
    #[error("empty slug in registry (id {0})")]
    EmptySlug(ProjectId),
}

/// One registry row: a URL slug and the project id it resolves to.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectEntry {
    pub slug: String,
    pub id: ProjectId,
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    projects: Vec<ProjectEntry>,
}

/// Read-only registry: slug ↔ id rows plus per-slug image lists.
/// Built once at startup and shared by reference everywhere else.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<ProjectEntry>,
    by_slug: HashMap<String, ProjectId>,
    images: HashMap<String, Vec<String>>,
}

impl Registry {
    /// Load `projects/projects.toml` and discover per-slug image lists.
    ///
    /// A missing registry file yields an empty registry — a site with no
    /// projects yet is valid.
    pub fn load(content_dir: &Path) -> Result<Self, RegistryError> {
        let projects_dir = content_dir.join("projects");
        let registry_path = projects_dir.join("projects.toml");

        let entries = if registry_path.exists() {
            let raw = fs::read_to_string(&registry_path)?;
            let file: RegistryFile = toml::from_str(&raw)?;
            file.projects
        } else {
            Vec::new()
        };

        let mut by_slug = HashMap::new();
        let mut by_id: HashMap<ProjectId, &str> = HashMap::new();
        for entry in &entries {
            if entry.slug.is_empty() {
                return Err(RegistryError::EmptySlug(entry.id));
            }
            if by_slug.insert(entry.slug.clone(), entry.id).is_some() {
                return Err(RegistryError::DuplicateSlug(entry.slug.clone()));
            }
            if let Some(previous) = by_id.insert(entry.id, &entry.slug) {
                return Err(RegistryError::DuplicateId(
                    entry.id,
                    previous.to_string(),
                    entry.slug.clone(),
                ));
            }
        }

        let mut images = HashMap::new();
        for entry in &entries {
            images.insert(entry.slug.clone(), scan_images(&projects_dir, &entry.slug)?);
        }

        Ok(Self {
            entries,
            by_slug,
            images,
        })
    }

    /// `slug -> id`, or `None` for anything not in the registry.
    pub fn resolve(&self, slug: &str) -> Option<ProjectId> {
        self.by_slug.get(slug).copied()
    }

    /// Registry rows in canonical (file) order.
    pub fn entries(&self) -> &[ProjectEntry] {
        &self.entries
    }

    /// Public image paths for a slug, in gallery order. Empty for slugs with
    /// no gallery directory.
    pub fn images(&self, slug: &str) -> &[String] {
        self.images.get(slug).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The exact set of statically generated detail pages: the cross-product
    /// of the locale set with the registry, locale-major.
    pub fn enumerate(&self) -> Vec<(Locale, &str)> {
        Locale::ALL
            .iter()
            .flat_map(|&locale| self.entries.iter().map(move |e| (locale, e.slug.as_str())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collect `image-{n}.png` files under `projects/{slug}/`, ordered by `n`.
fn scan_images(projects_dir: &Path, slug: &str) -> Result<Vec<String>, RegistryError> {
    let dir = projects_dir.join(slug);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut ordered: BTreeMap<u32, String> = BTreeMap::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(index) = image_index(&name) {
            ordered.insert(index, name);
        }
    }

    Ok(ordered
        .into_values()
        .map(|name| format!("/projects/{slug}/{name}"))
        .collect())
}

/// Parse the `n` out of an `image-{n}.png` filename. Anything else in the
/// directory (sources, notes, mislabeled files) is ignored.
fn image_index(filename: &str) -> Option<u32> {
    filename
        .strip_prefix("image-")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{setup_fixture, write_registry};

    #[test]
    fn resolves_known_slugs() {
        let tmp = setup_fixture();
        let registry = Registry::load(tmp.path()).unwrap();
        assert_eq!(registry.resolve("bagfas"), Some(17));
        assert_eq!(registry.resolve("kusadasi-marina"), Some(20));
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let tmp = setup_fixture();
        let registry = Registry::load(tmp.path()).unwrap();
        assert_eq!(registry.resolve("no-such-project"), None);
    }

    #[test]
    fn retired_id_has_no_slug() {
        let tmp = setup_fixture();
        let registry = Registry::load(tmp.path()).unwrap();
        // Fixture messages still carry project19, but the registry does not.
        assert!(registry.entries().iter().all(|e| e.id != 19));
    }

    #[test]
    fn enumeration_is_the_exact_cross_product() {
        let tmp = setup_fixture();
        let registry = Registry::load(tmp.path()).unwrap();
        let pages = registry.enumerate();

        assert_eq!(pages.len(), Locale::ALL.len() * registry.len());
        for locale in Locale::ALL {
            for entry in registry.entries() {
                assert!(pages.contains(&(locale, entry.slug.as_str())));
            }
        }
    }

    #[test]
    fn images_ordered_numerically_not_lexically() {
        let tmp = setup_fixture();
        let gallery = tmp.path().join("projects/bagfas");
        std::fs::write(gallery.join("image-10.png"), "fake image").unwrap();

        let registry = Registry::load(tmp.path()).unwrap();
        let images = registry.images("bagfas");
        assert_eq!(
            images,
            [
                "/projects/bagfas/image-1.png",
                "/projects/bagfas/image-2.png",
                "/projects/bagfas/image-10.png",
            ]
        );
    }

    #[test]
    fn missing_gallery_directory_is_an_empty_list() {
        let tmp = setup_fixture();
        let registry = Registry::load(tmp.path()).unwrap();
        assert!(registry.images("kemerkoy").is_empty());
    }

    #[test]
    fn non_gallery_files_are_ignored() {
        let tmp = setup_fixture();
        let gallery = tmp.path().join("projects/bagfas");
        std::fs::write(gallery.join("notes.txt"), "site visit notes").unwrap();
        std::fs::write(gallery.join("image-3.jpeg"), "wrong format").unwrap();

        let registry = Registry::load(tmp.path()).unwrap();
        assert_eq!(registry.images("bagfas").len(), 2);
    }

    #[test]
    fn missing_registry_file_is_an_empty_registry() {
        let tmp = setup_fixture();
        std::fs::remove_file(tmp.path().join("projects/projects.toml")).unwrap();
        let registry = Registry::load(tmp.path()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.enumerate().is_empty());
    }

    #[test]
    fn duplicate_slug_is_an_error() {
        let tmp = setup_fixture();
        write_registry(tmp.path(), &[("bagfas", 17), ("bagfas", 18)]);
        let result = Registry::load(tmp.path());
        assert!(matches!(result, Err(RegistryError::DuplicateSlug(_))));
    }

    #[test]
    fn duplicate_id_is_an_error() {
        let tmp = setup_fixture();
        write_registry(tmp.path(), &[("bagfas", 17), ("kemerkoy", 17)]);
        let result = Registry::load(tmp.path());
        assert!(matches!(result, Err(RegistryError::DuplicateId(17, _, _))));
    }

    #[test]
    fn image_index_parses_the_convention_only() {
        assert_eq!(image_index("image-1.png"), Some(1));
        assert_eq!(image_index("image-12.png"), Some(12));
        assert_eq!(image_index("image-1.jpg"), None);
        assert_eq!(image_index("img-1.png"), None);
        assert_eq!(image_index("image-.png"), None);
        assert_eq!(image_index("image-1.png.bak"), None);
    }
}
