//! # Breakwater
//!
//! A bilingual (Turkish/English) portfolio site generator with a built-in
//! contact relay. The filesystem is the data source: per-locale JSON message
//! trees hold every piece of copy, a small TOML registry maps URL slugs to
//! project records, and gallery directories hold the images.
//!
//! # Architecture: Load Once, Render Everything
//!
//! ```text
//! 1. Load      content/  →  Site          (config + messages + registry, immutable)
//! 2. Build     Site      →  dist/         (every (locale, slug) page, statically)
//! 3. Serve     dist/     →  HTTP          (locale middleware + /api/contact)
//! ```
//!
//! The content model is assembled once at startup and never mutated. The
//! build stage enumerates the exact cross-product of the locale set with the
//! slug registry and renders one document per pair — there is no dynamic
//! page composition, so the generated site can also be dropped on any static
//! file host. The serve stage adds the two things static hosting can't:
//! locale-prefix enforcement on every request and the contact form relay.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`locale`] | The closed `{tr, en}` locale set and locale-aware path rewriting |
//! | [`messages`] | Per-locale JSON message trees with dot-path lookup |
//! | [`registry`] | Slug ↔ id registry, gallery discovery, page enumeration |
//! | [`content`] | The loaded [`content::Site`] model and project record resolution |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`generate`] | Maud-rendered static site output |
//! | [`serve`] | axum server: locale middleware, static pages, contact endpoint |
//! | [`relay`] | Contact form validation and the outbound provider call |
//! | [`output`] | CLI output formatting for build and check |
//!
//! # Design Decisions
//!
//! ## Locale Always in the URL
//!
//! Every page URL carries `/tr` or `/en`; nothing is inferred from
//! `Accept-Language` or cookies. A deterministic URL-to-document mapping
//! avoids locale flicker and keeps the whole site cacheable by path. The
//! middleware redirects bare paths (including `/`) to the default locale.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions — no stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped, which matters
//!   twice here — message content flows into pages, and contact submissions
//!   flow into provider email bodies.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! ## Copy Lives in Message Trees, Not Templates
//!
//! Templates contain no literal copy. Every label, heading and project
//! description is a dot-path key into the locale's message tree, so the two
//! languages cannot drift structurally: same keys, different values. The
//! `check` command cross-validates the registry against both trees before a
//! deploy.

pub mod config;
pub mod content;
pub mod generate;
pub mod locale;
pub mod messages;
pub mod output;
pub mod registry;
pub mod relay;
pub mod serve;

#[cfg(test)]
pub(crate) mod test_helpers;
