//! CLI output formatting for the build and check commands.
//!
//! Output is information-centric, not file-centric: the primary display for
//! every entity is its semantic identity — slug, locale, title — with output
//! paths shown after a `→`. Each command has a `format_*` function returning
//! `Vec<String>` for testability and a `print_*` wrapper that writes to
//! stdout. Format functions are pure — no I/O, no side effects.
//!
//! ```text
//! Projects
//! 001 bagfas (id 17, 4 images)
//! 002 kemerkoy (id 18, no images)
//!
//! Pages
//! tr
//!     001 Bagfas Liman Tesisi → tr/projects/bagfas/index.html
//! en
//!     001 Bagfas Port Facility → en/projects/bagfas/index.html
//!
//! Generated 9 pages, 4 assets
//! ```

use crate::content::Site;
use crate::generate::BuildSummary;
use crate::locale::Locale;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format check output: the registry inventory as loaded.
pub fn format_check_output(site: &Site) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Projects".to_string());
    for (i, entry) in site.registry.entries().iter().enumerate() {
        let images = site.registry.images(&entry.slug).len();
        let image_note = match images {
            0 => "no images".to_string(),
            1 => "1 image".to_string(),
            n => format!("{n} images"),
        };
        lines.push(format!(
            "{} {} (id {}, {})",
            format_index(i + 1),
            entry.slug,
            entry.id,
            image_note
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Locales: {}",
        Locale::ALL.map(|l| l.as_str()).join(", ")
    ));
    lines.push(format!(
        "Pages to generate: {}",
        site.registry.enumerate().len() + 2 * Locale::ALL.len() + 1
    ));

    lines
}

/// Print check output to stdout.
pub fn print_check_output(site: &Site) {
    for line in format_check_output(site) {
        println!("{}", line);
    }
}

/// Format build output: every generated page grouped by locale, plus totals.
pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    for locale in Locale::ALL {
        lines.push(locale.as_str().to_string());
        let mut position = 0;
        for page in summary.pages.iter().filter(|p| p.locale == locale) {
            // the root redirect is attributed to the default locale but has
            // no locale directory of its own
            if page.path == "index.html" {
                continue;
            }
            position += 1;
            lines.push(format!(
                "    {} {} \u{2192} {}",
                format_index(position),
                page.title,
                page.path
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, {} assets",
        summary.pages.len(),
        summary.assets_copied
    ));

    lines
}

/// Print build output to stdout.
pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedPage;
    use crate::test_helpers::load_fixture_site;

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn check_output_lists_every_registry_entry() {
        let (_tmp, site) = load_fixture_site();
        let lines = format_check_output(&site);

        assert_eq!(lines[0], "Projects");
        for entry in site.registry.entries() {
            assert!(
                lines.iter().any(|l| l.contains(&entry.slug)),
                "missing {}",
                entry.slug
            );
        }
        assert!(lines.iter().any(|l| l == "Locales: tr, en"));
    }

    #[test]
    fn check_output_marks_empty_galleries() {
        let (_tmp, site) = load_fixture_site();
        let lines = format_check_output(&site);
        let kemerkoy = lines.iter().find(|l| l.contains("kemerkoy")).unwrap();
        assert!(kemerkoy.contains("no images"));
    }

    #[test]
    fn build_output_groups_pages_by_locale() {
        let summary = BuildSummary {
            pages: vec![
                GeneratedPage {
                    locale: Locale::Tr,
                    title: "Portfolio".into(),
                    path: "index.html".into(),
                },
                GeneratedPage {
                    locale: Locale::Tr,
                    title: "Mehmet".into(),
                    path: "tr/index.html".into(),
                },
                GeneratedPage {
                    locale: Locale::En,
                    title: "Bagfas Port Facility".into(),
                    path: "en/projects/bagfas/index.html".into(),
                },
            ],
            assets_copied: 4,
        };
        let lines = format_build_output(&summary);

        assert!(lines.contains(&"tr".to_string()));
        assert!(lines.contains(&"en".to_string()));
        assert!(lines
            .iter()
            .any(|l| l.contains("001 Mehmet \u{2192} tr/index.html")));
        assert!(lines
            .iter()
            .any(|l| l.contains("Bagfas Port Facility \u{2192} en/projects/bagfas/index.html")));
        assert_eq!(lines.last().unwrap(), "Generated 3 pages, 4 assets");
    }
}
