//! The read-only content model and the project record resolver.
//!
//! [`Site`] bundles everything loaded from the content directory — config,
//! message trees, slug registry — into one immutable object assembled at
//! startup and passed by reference to whatever composes pages or serves
//! requests. Nothing here mutates after load.
//!
//! ## Project records
//!
//! A [`ProjectRecord`] is derived, not stored: `(locale, slug)` resolves
//! through the registry to an id, then the five content fields are read from
//! the message tree under `projects.project{id}`. Field-level tolerance is
//! deliberate — a missing `location` renders as an empty string — but an
//! absent `project{id}` subtree means the record does not exist in that
//! locale and resolution is a not-found, never a crash.

use crate::config::{self, ConfigError, SiteConfig};
use crate::locale::Locale;
use crate::messages::{MessageStore, MessagesError};
use crate::registry::{ProjectId, Registry, RegistryError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Messages error: {0}")]
    Messages(#[from] MessagesError),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Everything the site knows, loaded once from the content directory.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub messages: MessageStore,
    pub registry: Registry,
    pub content_dir: PathBuf,
}

/// A fully assembled project, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub slug: String,
    pub title: String,
    pub location: String,
    pub year: String,
    pub category: String,
    pub description: String,
    /// Public image paths in gallery order; empty renders the placeholder.
    pub images: Vec<String>,
}

impl Site {
    pub fn load(content_dir: &Path) -> Result<Self, SiteError> {
        Ok(Self {
            config: config::load_config(content_dir)?,
            messages: MessageStore::load(content_dir)?,
            registry: Registry::load(content_dir)?,
            content_dir: content_dir.to_path_buf(),
        })
    }

    /// Resolve `(locale, slug)` to a project record.
    ///
    /// `None` when the slug is not in the registry or the locale's message
    /// tree has no `project{id}` subtree at all.
    pub fn project(&self, locale: Locale, slug: &str) -> Option<ProjectRecord> {
        let id = self.registry.resolve(slug)?;
        let root = format!("projects.project{id}");
        self.messages.node(locale, &root)?;

        let field = |name: &str| {
            self.messages
                .get_or_empty(locale, &format!("{root}.{name}"))
                .to_string()
        };

        Some(ProjectRecord {
            id,
            slug: slug.to_string(),
            title: field("title"),
            location: field("location"),
            year: field("year"),
            category: field("category"),
            description: field("description"),
            images: self.registry.images(slug).to_vec(),
        })
    }

    /// All resolvable projects in a locale, newest first.
    ///
    /// Year fields may be ranges like `2023/2024`; ordering uses the latest
    /// year named. Ties keep registry order (the sort is stable).
    pub fn projects(&self, locale: Locale) -> Vec<ProjectRecord> {
        let mut records: Vec<ProjectRecord> = self
            .registry
            .entries()
            .iter()
            .filter_map(|entry| self.project(locale, &entry.slug))
            .collect();
        records.sort_by_key(|record| std::cmp::Reverse(latest_year(&record.year)));
        records
    }

    /// Cross-check the registry against both locales' message trees.
    ///
    /// Returns one line per problem: a slug whose record is missing in a
    /// locale, or a record with an empty title. An empty result means every
    /// registered page can render in every locale. Message records without a
    /// registry entry are deliberately not flagged — delisted projects keep
    /// their copy.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for entry in self.registry.entries() {
            for locale in Locale::ALL {
                match self.project(locale, &entry.slug) {
                    None => problems.push(format!(
                        "{}: no project{} record in messages/{}.json",
                        entry.slug, entry.id, locale
                    )),
                    Some(record) if record.title.trim().is_empty() => problems.push(format!(
                        "{}: empty title in messages/{}.json",
                        entry.slug, locale
                    )),
                    Some(_) => {}
                }
            }
        }
        problems
    }
}

/// Latest year named in a year field: `"2024"` → 2024, `"2023/2024"` → 2024.
/// Unparseable values sort last.
fn latest_year(year: &str) -> u32 {
    year.rsplit('/')
        .find_map(|part| part.trim().parse().ok())
        .unwrap_or(0)
}
