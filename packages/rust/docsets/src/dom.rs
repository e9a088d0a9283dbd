//! Mutable page tree used by the formatter.
//!
//! Matching and mutation are separate steps: [`Page::select`] collects the
//! matched elements first, then each one is changed through [`NodeMut`].
//! Detaching nodes while a descendants iterator is live would skip siblings.

use kuchiki::iter::NodeIterator;
use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeDataRef, NodeRef, Selectors};

use docsetbuilder_shared::{DocsetError, Result};

/// A matched element in a [`Page`].
pub type Element = NodeDataRef<ElementData>;

/// Parsed, mutable HTML document.
pub struct Page {
    document: NodeRef,
}

impl Page {
    /// Parse a full HTML document. Malformed markup is recovered, never rejected.
    pub fn parse(html: &str) -> Self {
        Self {
            document: kuchiki::parse_html().one(html),
        }
    }

    /// All elements matching `selectors`, in document order.
    pub fn select(&self, selectors: &Selectors) -> Vec<Element> {
        self.document
            .inclusive_descendants()
            .elements()
            .filter(|el| selectors.matches(el))
            .collect()
    }

    /// Compile `selector` and collect its matches.
    pub fn select_css(&self, selector: &str) -> Result<Vec<Element>> {
        Ok(self.select(&compile_selector(selector)?))
    }

    /// Serialize the whole document back to HTML text.
    pub fn to_html(&self) -> Result<String> {
        let mut out = Vec::new();
        self.document
            .serialize(&mut out)
            .map_err(|e| DocsetError::Serialize(e.to_string()))?;
        String::from_utf8(out).map_err(|e| DocsetError::Serialize(e.to_string()))
    }
}

/// Compile a CSS selector list, mapping failures to a parse error.
pub fn compile_selector(selector: &str) -> Result<Selectors> {
    Selectors::compile(selector)
        .map_err(|()| DocsetError::parse(format!("invalid selector {selector:?}")))
}

/// Build a detached node from a single-element HTML snippet.
pub fn fragment_node(html: &str, tag: &str) -> Result<NodeRef> {
    let parsed = kuchiki::parse_html().one(html);
    let element = parsed
        .select_first(tag)
        .map_err(|()| DocsetError::parse(format!("no <{tag}> in fragment {html:?}")))?;

    let node = element.as_node().clone();
    node.detach();
    Ok(node)
}

// ---------------------------------------------------------------------------
// Capability interface
// ---------------------------------------------------------------------------

/// The mutations the formatter may perform on a matched element.
pub trait NodeMut {
    /// Detach the element and everything below it.
    fn remove(&self);

    /// Current value of an attribute.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set an attribute, replacing any previous value.
    fn set_attribute(&self, name: &str, value: &str);

    /// Append a class token unless present.
    fn add_class(&self, token: &str);

    /// Drop a class token. The `class` attribute goes away once empty.
    fn remove_class(&self, token: &str);

    /// Set one inline style declaration, keeping the others.
    fn set_style(&self, property: &str, value: &str);

    /// Insert `node` as the immediately preceding sibling.
    fn insert_before(&self, node: NodeRef);

    /// Nearest preceding sibling that is an element, skipping text.
    fn previous_element(&self) -> Option<Element>;

    /// Concatenated text of all descendant text nodes.
    fn text(&self) -> String;
}

impl NodeMut for Element {
    fn remove(&self) {
        self.as_node().detach();
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).map(str::to_string)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name, value.to_string());
    }

    fn add_class(&self, token: &str) {
        let current = self.attribute("class").unwrap_or_default();
        if current.split_whitespace().any(|t| t == token) {
            return;
        }

        let updated = if current.trim().is_empty() {
            token.to_string()
        } else {
            format!("{} {token}", current.trim())
        };
        self.set_attribute("class", &updated);
    }

    fn remove_class(&self, token: &str) {
        let Some(current) = self.attribute("class") else {
            return;
        };
        if !current.split_whitespace().any(|t| t == token) {
            return;
        }

        let remaining = current
            .split_whitespace()
            .filter(|t| *t != token)
            .collect::<Vec<_>>()
            .join(" ");

        if remaining.is_empty() {
            self.attributes.borrow_mut().remove("class");
        } else {
            self.set_attribute("class", &remaining);
        }
    }

    fn set_style(&self, property: &str, value: &str) {
        let current = self.attribute("style").unwrap_or_default();
        self.set_attribute("style", &merge_style(&current, property, value));
    }

    fn insert_before(&self, node: NodeRef) {
        self.as_node().insert_before(node);
    }

    fn previous_element(&self) -> Option<Element> {
        self.as_node().preceding_siblings().elements().next()
    }

    fn text(&self) -> String {
        self.as_node().text_contents()
    }
}

/// Set `property: value` in an inline style string, replacing an existing
/// declaration of the same property in place.
fn merge_style(style: &str, property: &str, value: &str) -> String {
    let mut declarations: Vec<(String, String)> = style
        .split(';')
        .filter_map(|decl| {
            let (name, val) = decl.split_once(':')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_string(), val.trim().to_string()))
        })
        .collect();

    match declarations
        .iter_mut()
        .find(|(name, _)| name.eq_ignore_ascii_case(property))
    {
        Some(existing) => existing.1 = value.to_string(),
        None => declarations.push((property.to_string(), value.to_string())),
    }

    declarations
        .iter()
        .map(|(name, val)| format!("{name}: {val};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(page: &Page, selector: &str) -> Element {
        page.select_css(selector)
            .unwrap()
            .into_iter()
            .next()
            .expect("element present")
    }

    #[test]
    fn select_collects_in_document_order() {
        let page = Page::parse("<h3>One</h3><div><h3>Two</h3></div><h3>Three</h3>");
        let texts: Vec<String> = page
            .select_css("h3")
            .unwrap()
            .iter()
            .map(|el| el.text())
            .collect();
        assert_eq!(texts, ["One", "Two", "Three"]);
    }

    #[test]
    fn invalid_selector_is_parse_error() {
        let page = Page::parse("<p>x</p>");
        let err = page.select_css("div >").unwrap_err();
        assert!(matches!(err, DocsetError::Parse { .. }));
    }

    #[test]
    fn remove_detaches_subtree() {
        let page = Page::parse("<footer><p>Legal</p></footer><p>Body</p>");
        for el in page.select_css("footer").unwrap() {
            el.remove();
        }
        let html = page.to_html().unwrap();
        assert!(!html.contains("Legal"));
        assert!(html.contains("Body"));
    }

    #[test]
    fn class_tokens_add_and_remove() {
        let page = Page::parse(r#"<div class="pt-4 markdown md:px-6">x</div>"#);
        let div = first(&page, "div");

        div.remove_class("md:px-6");
        div.remove_class("absent");
        div.add_class("text-3xl");
        div.add_class("markdown");
        assert_eq!(div.attribute("class").unwrap(), "pt-4 markdown text-3xl");

        div.remove_class("pt-4");
        div.remove_class("markdown");
        div.remove_class("text-3xl");
        assert_eq!(div.attribute("class"), None);
    }

    #[test]
    fn set_style_merges_declarations() {
        let page = Page::parse(r#"<h3 style="color: red; font-size: 1rem">T</h3>"#);
        let h3 = first(&page, "h3");

        h3.set_style("font-size", "1.5rem");
        h3.set_style("margin-top", "2rem");
        assert_eq!(
            h3.attribute("style").unwrap(),
            "color: red; font-size: 1.5rem; margin-top: 2rem;"
        );
    }

    #[test]
    fn insert_before_places_sibling() {
        let page = Page::parse("<div><h2>Title</h2></div>");
        let h2 = first(&page, "h2");
        h2.insert_before(fragment_node(r#"<a name="top"></a>"#, "a").unwrap());

        let html = page.to_html().unwrap();
        assert!(html.contains(r#"<div><a name="top"></a><h2>Title</h2></div>"#));
    }

    #[test]
    fn previous_element_skips_text() {
        let page = Page::parse("<div><p>Lead</p>\n  <h3>T</h3></div>");
        let h3 = first(&page, "h3");
        let prev = h3.previous_element().expect("p before h3");
        assert_eq!(prev.text(), "Lead");

        let p = first(&page, "p");
        assert!(p.previous_element().is_none());
    }

    #[test]
    fn merge_style_on_empty() {
        assert_eq!(merge_style("", "margin-top", "-1.5rem"), "margin-top: -1.5rem;");
        assert_eq!(merge_style(";;", "a", "b"), "a: b;");
    }
}
