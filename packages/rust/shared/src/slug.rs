//! Anchor slugs shared by catalog entry paths and injected anchor ids.
//!
//! Both sides must call [`slugify`] so an entry's `#fragment` always lands on
//! the anchor the formatter inserted for the same heading.

use std::sync::LazyLock;

use regex::Regex;

/// Build a lowercase, hyphen-separated, URL-safe token from free text.
///
/// Punctuation is dropped rather than turned into a separator, so
/// `"Don't panic"` becomes `dont-panic`. `@` reads as `at`. Non-ASCII letters
/// and symbols are transliterated first, so `€` reads as `eur`. Text with no
/// letters or digits yields an empty string.
pub fn slugify(text: &str) -> String {
    static PUNCTUATION_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^-\p{L}\p{N}\s]+").expect("valid regex"));

    let spaced = transliterate_symbols(&text.replace('_', "-").replace('@', "-at-"));
    let stripped = PUNCTUATION_RE.replace_all(&spaced, "");

    slug::slugify(stripped)
}

/// Spell out non-ASCII symbols (`€`, `©`, `™`) before punctuation is stripped.
fn transliterate_symbols(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut out, c| {
        if c.is_ascii() || c.is_alphanumeric() || c.is_whitespace() {
            out.push(c);
        } else {
            out.push_str(&slug::slugify(c.to_string()).replace('-', ""));
        }
        out
    })
}
