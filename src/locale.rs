//! The closed locale set and locale-aware path rewriting.
//!
//! The site is bilingual by construction: every URL carries an explicit
//! `/tr` or `/en` prefix, and every piece of copy exists in both languages.
//! The set is fixed at compile time — locale is never inferred from
//! `Accept-Language` headers or cookies, so the same URL always renders the
//! same document.

use std::fmt;

/// A supported UI language. Turkish is the site default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    Tr,
    En,
}

impl Locale {
    /// All supported locales, in enumeration order.
    pub const ALL: [Locale; 2] = [Locale::Tr, Locale::En];

    /// The locale injected when a request path carries no prefix.
    pub const DEFAULT: Locale = Locale::Tr;

    /// URL prefix and `lang` attribute value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        }
    }

    /// Parse a URL path segment. Anything outside the closed set is `None`.
    pub fn from_prefix(segment: &str) -> Option<Self> {
        match segment {
            "tr" => Some(Locale::Tr),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// The other language of the pair.
    pub const fn other(self) -> Self {
        match self {
            Locale::Tr => Locale::En,
            Locale::En => Locale::Tr,
        }
    }

    /// Label shown on the language toggle — names the language it switches *to*.
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Locale::Tr => "EN",
            Locale::En => "TR",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a recognized locale prefix off an absolute request path.
///
/// Matches whole segments only: `/en` and `/en/projects/x` split, while
/// `/english` and `/entry.png` do not.
pub fn split_locale_prefix(path: &str) -> Option<(Locale, &str)> {
    for locale in Locale::ALL {
        let prefix = locale.as_str();
        if let Some(rest) = path.strip_prefix('/')
            && let Some(rest) = rest.strip_prefix(prefix)
            && (rest.is_empty() || rest.starts_with('/'))
        {
            return Some((locale, rest));
        }
    }
    None
}

/// Rewrite the locale segment of an absolute path.
///
/// This is what the language toggle links to: the same page in the other
/// language. Only a whole leading segment is replaced, so slugs that happen
/// to contain a locale string are left alone. A path without the `from`
/// prefix is simply re-rooted under `to`.
pub fn rewrite_locale_path(path: &str, from: Locale, to: Locale) -> String {
    let rest = match split_locale_prefix(path) {
        Some((found, rest)) if found == from => rest,
        _ => path,
    };
    if rest.is_empty() || rest == "/" {
        format!("/{}", to.as_str())
    } else {
        format!("/{}{}", to.as_str(), rest)
    }
}
