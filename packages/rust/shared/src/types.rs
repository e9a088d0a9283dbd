//! Core domain types for docset catalogs and page formatting.

use serde::{Deserialize, Serialize};

/// Base file name of a docset's landing page; it never yields entries.
pub const INDEX_FILE_NAME: &str = "index.html";

// ---------------------------------------------------------------------------
// CatalogEntry
// ---------------------------------------------------------------------------

/// Kind of navigable unit in the docset index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// A whole page, keyed by a level-2 heading.
    Guide,
    /// An anchored region of a page, keyed by a level-3 heading.
    Section,
}

impl EntryType {
    /// Type tag as written into the docset index.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guide => "Guide",
            Self::Section => "Section",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One searchable entry handed to the docset index writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name shown in the browser's search results.
    pub name: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Page file name, optionally followed by `#anchor`.
    pub path: String,
}

impl CatalogEntry {
    /// A guide entry pointing at a whole page.
    pub fn guide(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::Guide,
            path: path.into(),
        }
    }

    /// A section entry pointing at an anchor within a page.
    pub fn section(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::Section,
            path: path.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Format rules
// ---------------------------------------------------------------------------

/// A single mutation applied to every element an attached selector matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleOp {
    /// Detach the element and its subtree.
    Remove,
    /// Drop one class token; absent tokens are ignored.
    RemoveClass { token: String },
    /// Append one class token unless it is already present.
    AddClass { token: String },
    /// Set one inline style declaration, replacing any earlier value.
    SetStyle { property: String, value: String },
}

/// Selector-scoped formatting rule. A rule table is applied top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRule {
    /// CSS selector choosing the elements to mutate.
    pub selector: String,
    /// Mutation applied to each match.
    pub op: RuleOp,
}

impl FormatRule {
    pub fn remove(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            op: RuleOp::Remove,
        }
    }

    pub fn remove_class(selector: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            op: RuleOp::RemoveClass {
                token: token.into(),
            },
        }
    }

    pub fn add_class(selector: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            op: RuleOp::AddClass {
                token: token.into(),
            },
        }
    }

    pub fn set_style(
        selector: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            selector: selector.into(),
            op: RuleOp::SetStyle {
                property: property.into(),
                value: value.into(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Last path segment of a storage path (`docs/setup.html` -> `setup.html`).
///
/// Accepts both `/` and `\` separators since storage paths come from callers.
pub fn base_file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed)
}
