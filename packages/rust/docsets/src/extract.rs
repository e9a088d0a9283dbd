//! Catalog entry extraction.
//!
//! Level-2 headings become guides, level-3 headings become sections labelled
//! with the page's parent heading. Guides come first, then sections, each in
//! document order.

use scraper::{Html, Selector};
use tracing::{debug, instrument};

use docsetbuilder_shared::{CatalogEntry, INDEX_FILE_NAME, base_file_name, slugify};

/// Separator between a section's own heading and its parent label.
const SECTION_NAME_SEPARATOR: &str = " - ";

/// Extract catalog entries from one page's HTML.
///
/// `path` is the storage path of the page; only its base file name ends up in
/// entry paths. Landing pages (`index.html`) yield nothing.
#[instrument(skip(html), fields(bytes = html.len()))]
pub fn extract_entries(html: &str, path: &str) -> Vec<CatalogEntry> {
    let file_name = base_file_name(path);
    if file_name == INDEX_FILE_NAME {
        debug!("landing page, no entries");
        return Vec::new();
    }

    let doc = Html::parse_document(html);

    let mut entries = guide_entries(&doc, file_name);
    let guides = entries.len();

    let parent = parent_label(&doc);
    entries.extend(section_entries(&doc, file_name, &parent));

    debug!(
        guides,
        sections = entries.len() - guides,
        parent = %parent,
        "entries extracted"
    );

    entries
}

/// One guide per `h2`, all pointing at the page itself.
fn guide_entries(doc: &Html, file_name: &str) -> Vec<CatalogEntry> {
    heading_texts(doc, "h2")
        .into_iter()
        .map(|text| CatalogEntry::guide(text.trim(), file_name))
        .collect()
}

/// One section per `h3`, anchored at the slug of its heading.
fn section_entries(doc: &Html, file_name: &str, parent: &str) -> Vec<CatalogEntry> {
    heading_texts(doc, "h3")
        .into_iter()
        .map(|text| {
            let heading = text.trim();
            let name = if parent.is_empty() {
                heading.to_string()
            } else {
                format!("{heading}{SECTION_NAME_SEPARATOR}{parent}")
            };
            CatalogEntry::section(name, format!("{file_name}#{}", slugify(&text)))
        })
        .collect()
}

/// Label appended to every section name: the first `h4`, else the first `h2`.
///
/// Empty when the page has neither.
pub(crate) fn parent_label(doc: &Html) -> String {
    let first_text = |tag: &str| {
        heading_texts(doc, tag)
            .into_iter()
            .next()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    };

    first_text("h4")
        .or_else(|| first_text("h2"))
        .unwrap_or_default()
}

/// Raw text of every element named `tag`, in document order.
fn heading_texts(doc: &Html, tag: &str) -> Vec<String> {
    let selector = Selector::parse(tag).expect("heading tag is a valid selector");
    doc.select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect()
}
