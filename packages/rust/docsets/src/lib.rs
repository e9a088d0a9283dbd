//! Documentation sources turned into docsets.
//!
//! Each source implements [`Docset`]: it classifies a stored page's headings
//! into [`CatalogEntry`] records for the docset index, and rewrites page HTML
//! so it renders offline without the site's chrome.
//!
//! The building blocks are reusable:
//! - [`extract_entries`] — heading classification over a read-only parse
//! - [`Formatter`] — rule-table driven rewriting plus anchor injection
//! - [`dom`] — the mutable tree and its [`NodeMut`] capability trait

pub mod dom;
mod extract;
mod format;
mod jigsaw;

use docsetbuilder_shared::{CatalogEntry, Result};

pub use dom::{NodeMut, Page};
pub use extract::extract_entries;
pub use format::{Formatter, validate_rules};
pub use jigsaw::{Jigsaw, jigsaw_rules};

/// Static description of a documentation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocsetInfo {
    /// Short identifier, also the docset bundle name.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Host the pages were fetched from.
    pub url: &'static str,
    /// Page the browser opens first.
    pub index: &'static str,
    /// Online playground link, empty when there is none.
    pub playground: &'static str,
    pub icon_16: &'static str,
    pub icon_32: &'static str,
    /// Other hosts whose assets the pages pull in.
    pub external_domains: &'static [&'static str],
}

/// A documentation source that can be indexed and formatted for offline use.
pub trait Docset: Send + Sync {
    fn info(&self) -> &DocsetInfo;

    /// Catalog entries for the stored page at `path`, in index order.
    ///
    /// A missing page surfaces the store's not-found error unchanged.
    fn entries(&self, path: &str) -> Result<Vec<CatalogEntry>>;

    /// Rewrite one page's HTML for offline rendering.
    fn format(&self, html: &str) -> Result<String>;
}
