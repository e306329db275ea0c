//! Static site generation.
//!
//! Takes the loaded [`Site`] model and renders the complete bilingual site:
//!
//! ```text
//! dist/
//! ├── index.html                       # meta-refresh to the default locale
//! ├── tr/
//! │   ├── index.html                   # home (hero, about, projects, skills, contact)
//! │   ├── 404.html
//! │   └── projects/bagfas/index.html   # one page per (locale, slug)
//! ├── en/
//! │   └── ...
//! └── projects/bagfas/image-1.png      # gallery images, shared across locales
//! ```
//!
//! The detail page set is exactly the registry cross-product — every slug in
//! every locale, nothing else. Pages fan out across slugs during rendering;
//! output is deterministic regardless of schedule.
//!
//! ## HTML generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping, so message
//! content and project fields are interpolated without sanitization concerns.
//! The stylesheet and the contact-form script are embedded at compile time —
//! the generated site has no asset pipeline of its own.

use crate::content::Site;
use crate::locale::{rewrite_locale_path, Locale};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no project record for '{slug}' in locale '{locale}'")]
    MissingRecord { slug: String, locale: Locale },
}

const CSS: &str = include_str!("../static/style.css");
const CONTACT_JS: &str = include_str!("../static/contact.js");

/// One written page, for the build report.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub locale: Locale,
    pub title: String,
    pub path: String,
}

/// What a build produced.
#[derive(Debug)]
pub struct BuildSummary {
    pub pages: Vec<GeneratedPage>,
    pub assets_copied: usize,
}

/// Render the whole site into `out_dir`.
pub fn generate(site: &Site, out_dir: &Path) -> Result<BuildSummary, GenerateError> {
    fs::create_dir_all(out_dir)?;

    let assets_copied = copy_site_assets(site, out_dir)? + copy_galleries(site, out_dir)?;

    let mut pages = Vec::new();

    // Root redirect for pure-static hosting; `serve` issues a real 307.
    write_page(out_dir, "index.html", render_root_redirect(site))?;
    pages.push(GeneratedPage {
        locale: Locale::DEFAULT,
        title: site.config.site.name.clone(),
        path: "index.html".to_string(),
    });

    for locale in Locale::ALL {
        let home_path = format!("{locale}/index.html");
        write_page(out_dir, &home_path, render_home(site, locale))?;
        pages.push(GeneratedPage {
            locale,
            title: site.messages.get_or_empty(locale, "hero.name").to_string(),
            path: home_path,
        });

        let missing_path = format!("{locale}/404.html");
        write_page(out_dir, &missing_path, render_not_found(site, locale))?;
        pages.push(GeneratedPage {
            locale,
            title: site.messages.get_or_empty(locale, "notFound.title").to_string(),
            path: missing_path,
        });
    }

    // Detail pages: the full (locale × slug) cross-product, rendered in parallel.
    let detail_pages: Vec<GeneratedPage> = site
        .registry
        .enumerate()
        .par_iter()
        .map(|&(locale, slug)| {
            let record =
                site.project(locale, slug)
                    .ok_or_else(|| GenerateError::MissingRecord {
                        slug: slug.to_string(),
                        locale,
                    })?;
            let rel_path = format!("{locale}/projects/{slug}/index.html");
            write_page(out_dir, &rel_path, render_project_page(site, locale, &record))?;
            Ok(GeneratedPage {
                locale,
                title: record.title,
                path: rel_path,
            })
        })
        .collect::<Result<_, GenerateError>>()?;
    pages.extend(detail_pages);

    Ok(BuildSummary {
        pages,
        assets_copied,
    })
}

fn write_page(out_dir: &Path, rel_path: &str, markup: Markup) -> Result<(), std::io::Error> {
    let path = out_dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, markup.into_string())
}

/// Copy `content/assets/**` (favicons, logos, fonts) to the output root.
fn copy_site_assets(site: &Site, out_dir: &Path) -> Result<usize, GenerateError> {
    let assets_dir = site.content_dir.join("assets");
    if !assets_dir.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in walkdir::WalkDir::new(&assets_dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(&assets_dir)
            .expect("walked path is under assets_dir");
        let dest = out_dir.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest)?;
        copied += 1;
    }
    Ok(copied)
}

/// Copy each registered slug's gallery to its public path.
fn copy_galleries(site: &Site, out_dir: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in site.registry.entries() {
        for public_path in site.registry.images(&entry.slug) {
            let rel = public_path.trim_start_matches('/');
            let source = site.content_dir.join(rel);
            let dest = out_dir.join(rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&source, &dest)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(locale: Locale, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(locale.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the fixed top navigation: brand, section anchors, language toggle.
fn site_header(site: &Site, locale: Locale, current_path: &str) -> Markup {
    let t = |key: &str| site.messages.get_or_empty(locale, key).to_string();
    let home = format!("/{locale}");
    let toggle = rewrite_locale_path(current_path, locale, locale.other());

    html! {
        header.site-header {
            a.brand href=(home) { (site.config.site.name) }
            nav.site-nav {
                a href=(home) { (t("nav.home")) }
                a href={ (home) "#about" } { (t("nav.about")) }
                a href={ (home) "#projects" } { (t("nav.projects")) }
                a href={ (home) "#skills" } { (t("nav.skills")) }
                a href={ (home) "#contact" } { (t("nav.contact")) }
                a.locale-toggle href=(toggle) aria-label="Toggle language" {
                    (locale.toggle_label())
                }
            }
        }
    }
}

fn site_footer(site: &Site, locale: Locale) -> Markup {
    html! {
        footer.site-footer {
            p { (site.messages.get_or_empty(locale, "footer.rights")) }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page: hero, about, projects grid, skills, contact form.
pub fn render_home(site: &Site, locale: Locale) -> Markup {
    let t = |key: &str| site.messages.get_or_empty(locale, key).to_string();
    let current_path = format!("/{locale}");
    let records = site.projects(locale);

    let content = html! {
        (site_header(site, locale, &current_path))

        section.hero id="top" {
            p.hero-title { (t("hero.title")) }
            h1 { (t("hero.name")) }
            p.hero-subtitle { (t("hero.subtitle")) }
            blockquote.hero-quote { (t("hero.quote")) }
            div.hero-actions {
                a.button.primary href="#projects" { (t("hero.viewProjects")) }
                a.button href="#contact" { (t("hero.contact")) }
            }
        }

        section.about id="about" {
            h2 { (t("about.title")) }
            p.bio { (t("about.bio")) }
            div.stats {
                span.stat { (t("about.yearsExperience")) }
                span.stat { (t("about.projectsCompleted")) }
                span.stat { (t("about.publicationsCount")) }
            }
            dl.about-details {
                dt { (t("about.education")) }
                dd { (t("about.educationDetails")) }
                dt { (t("about.employment")) }
                dd { (t("about.employmentDetails")) }
                dt { (t("about.patent")) }
                dd { (t("about.patentTitle")) " — " (t("about.patentNumber")) }
            }
        }

        section.projects id="projects" {
            h2 { (t("projects.title")) }
            p.projects-count { (records.len()) "+ " (t("projects.allProjects")) }
            div.project-grid {
                @for (index, record) in records.iter().enumerate() {
                    a.project-card href={ "/" (locale) "/projects/" (record.slug) } {
                        div.badges {
                            span.badge.year { (record.year) }
                            span.badge.category { (record.category) }
                        }
                        span.project-number { (format!("{:02}", index + 1)) }
                        h3 { (record.title) }
                        p.location { (record.location) }
                        p.description { (record.description) }
                        span.view-details { (t("projects.viewDetails")) }
                    }
                }
            }
        }

        section.skills id="skills" {
            h2 { (t("skills.title")) }
            div.skill-columns {
                (skill_list(site, locale, "skills.technical", "skills.technicalItems"))
                (skill_list(site, locale, "skills.software", "skills.softwareItems"))
                (skill_list(site, locale, "skills.expertise", "skills.expertiseItems"))
            }
        }

        section.contact id="contact" {
            h2 { (t("contact.title")) }
            p { (t("contact.description")) }
            form id="contact-form"
                data-success=(t("contact.success"))
                data-error=(t("contact.error"))
            {
                label { (t("contact.name")) input name="name" type="text" required; }
                label { (t("contact.email")) input name="email" type="email" required; }
                label { (t("contact.subject")) input name="subject" type="text" required; }
                label { (t("contact.message")) textarea name="message" rows="6" required {} }
                button.button.primary type="submit" { (t("contact.send")) }
                p.form-status aria-live="polite" {}
            }
            script { (PreEscaped(CONTACT_JS)) }
        }

        (site_footer(site, locale))
    };

    let title = format!("{} — {}", t("hero.name"), site.config.site.name);
    base_document(locale, &title, content)
}

fn skill_list(site: &Site, locale: Locale, label_key: &str, items_key: &str) -> Markup {
    html! {
        div.skill-column {
            h3 { (site.messages.get_or_empty(locale, label_key)) }
            ul {
                @for item in site.messages.list(locale, items_key) {
                    li { (item) }
                }
            }
        }
    }
}

/// Renders a project detail page.
///
/// An empty gallery is a valid state: the page renders the localized
/// "coming soon" placeholder instead of an image grid.
pub fn render_project_page(
    site: &Site,
    locale: Locale,
    record: &crate::content::ProjectRecord,
) -> Markup {
    let t = |key: &str| site.messages.get_or_empty(locale, key).to_string();
    let current_path = format!("/{}/projects/{}", locale, record.slug);

    let content = html! {
        (site_header(site, locale, &current_path))

        main.project-page {
            a.back-link href={ "/" (locale) "#projects" } { "← " (t("nav.projects")) }

            header.project-header {
                div.badges {
                    span.badge.year { (record.year) }
                    span.badge.category { (record.category) }
                    span.location { (record.location) }
                }
                h1 { (record.title) }
                p.description { (record.description) }
            }

            @if record.images.is_empty() {
                div.coming-soon {
                    p { (t("projects.comingSoon")) }
                }
            } @else {
                div.gallery-grid {
                    @for (index, image) in record.images.iter().enumerate() {
                        a.gallery-item href=(image) {
                            img src=(image)
                                alt={ (record.title) " — " (index + 1) }
                                loading="lazy";
                        }
                    }
                }
            }

            div.detail-cards {
                div.card {
                    h2 { (t("projects.details.info")) }
                    dl {
                        dt { (t("projects.details.name")) }
                        dd { (record.title) }
                        dt { (t("projects.details.location")) }
                        dd { (record.location) }
                        dt { (t("projects.details.year")) }
                        dd { (record.year) }
                        dt { (t("projects.details.category")) }
                        dd { (record.category) }
                    }
                }
                div.card {
                    h2 { (t("projects.details.summary")) }
                    p { (record.description) }
                }
            }

            div.card.expertise {
                h2 { (t("projects.details.expertise")) }
                ul.expertise-list {
                    @for tech in site.messages.list(locale, "projects.expertiseTechnologies") {
                        li { (tech) }
                    }
                }
            }
        }

        (site_footer(site, locale))
    };

    let title = format!("{} — {}", record.title, site.config.site.name);
    base_document(locale, &title, content)
}

/// Renders the per-locale not-found page served for unknown slugs/paths.
pub fn render_not_found(site: &Site, locale: Locale) -> Markup {
    let t = |key: &str| site.messages.get_or_empty(locale, key).to_string();
    let current_path = format!("/{locale}/404");

    let content = html! {
        (site_header(site, locale, &current_path))
        main.not-found {
            h1 { (t("notFound.title")) }
            p { (t("notFound.body")) }
            a.button.primary href={ "/" (locale) } { (t("notFound.home")) }
        }
        (site_footer(site, locale))
    };

    let title = format!("{} — {}", t("notFound.title"), site.config.site.name);
    base_document(locale, &title, content)
}

/// Root document: immediate client-side redirect to the default locale home.
fn render_root_redirect(site: &Site) -> Markup {
    let target = format!("/{}/", Locale::DEFAULT);
    html! {
        (DOCTYPE)
        html lang=(Locale::DEFAULT.as_str()) {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content={ "0; url=" (target) };
                title { (site.config.site.name) }
            }
            body {
                a href=(target) { (site.config.site.name) }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
