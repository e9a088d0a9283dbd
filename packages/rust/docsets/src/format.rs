//! Offline page formatting.
//!
//! A [`Formatter`] runs a rule table over the parsed page, top to bottom, and
//! then injects the anchor markers the documentation browser builds its
//! per-page table of contents from. Rules that match nothing are skipped.

use tracing::{debug, instrument};

use docsetbuilder_shared::{
    AnchorConfig, FormatRule, Result, RuleOp, slugify, validate_anchors,
};

use crate::dom::{Element, NodeMut, Page, compile_selector, fragment_node};

/// Label of the anchor placed before every level-2 heading.
const TOP_SECTION_LABEL: &str = "Top";

/// Rule-table driven HTML rewriter.
#[derive(Debug, Clone)]
pub struct Formatter {
    rules: Vec<FormatRule>,
    anchors: AnchorConfig,
}

impl Formatter {
    /// Create a formatter without checking the rule selectors up front.
    ///
    /// An invalid selector then surfaces as a parse error from [`format`](Self::format).
    pub fn new(rules: Vec<FormatRule>, anchors: AnchorConfig) -> Self {
        Self { rules, anchors }
    }

    /// Create a formatter, rejecting invalid selectors and anchor settings.
    pub fn validated(rules: Vec<FormatRule>, anchors: AnchorConfig) -> Result<Self> {
        validate_rules(&rules)?;
        validate_anchors(&anchors)?;
        Ok(Self::new(rules, anchors))
    }

    pub fn rules(&self) -> &[FormatRule] {
        &self.rules
    }

    /// Parse `html`, apply every rule, insert anchors, and serialize.
    #[instrument(skip_all, fields(bytes = html.len(), rules = self.rules.len()))]
    pub fn format(&self, html: &str) -> Result<String> {
        let page = Page::parse(html);

        for rule in &self.rules {
            apply_rule(&page, rule)?;
        }
        insert_anchors(&page, &self.anchors)?;

        page.to_html()
    }
}

/// Check that every rule selector compiles.
pub fn validate_rules(rules: &[FormatRule]) -> Result<()> {
    for rule in rules {
        compile_selector(&rule.selector)?;
    }
    Ok(())
}

fn apply_rule(page: &Page, rule: &FormatRule) -> Result<()> {
    let matched = page.select_css(&rule.selector)?;
    if matched.is_empty() {
        return Ok(());
    }

    debug!(selector = %rule.selector, op = ?rule.op, matched = matched.len(), "applying rule");

    for el in &matched {
        match &rule.op {
            RuleOp::Remove => el.remove(),
            RuleOp::RemoveClass { token } => el.remove_class(token),
            RuleOp::AddClass { token } => el.add_class(token),
            RuleOp::SetStyle { property, value } => el.set_style(property, value),
        }
    }
    Ok(())
}

/// Put a "Top" marker before each `h2` and a slug-id marker before each `h3`.
///
/// Headings already preceded by a marker are left alone.
fn insert_anchors(page: &Page, anchors: &AnchorConfig) -> Result<()> {
    let mut inserted = 0;

    for heading in page.select_css("h2")? {
        if has_marker_before(&heading, anchors) {
            continue;
        }
        heading.insert_before(anchor_node(anchors, None, TOP_SECTION_LABEL)?);
        inserted += 1;
    }

    for heading in page.select_css("h3")? {
        if has_marker_before(&heading, anchors) {
            continue;
        }
        let text = heading.text();
        let label = urlencoding::encode(text.trim());
        heading.insert_before(anchor_node(anchors, Some(slugify(&text).as_str()), &label)?);
        inserted += 1;
    }

    debug!(inserted, "anchors inserted");
    Ok(())
}

fn has_marker_before(heading: &Element, anchors: &AnchorConfig) -> bool {
    heading.previous_element().is_some_and(|prev| {
        &*prev.name.local == "a"
            && prev
                .attribute("class")
                .is_some_and(|class| class.split_whitespace().any(|t| t == anchors.class))
    })
}

fn anchor_node(anchors: &AnchorConfig, id: Option<&str>, label: &str) -> Result<kuchiki::NodeRef> {
    let name = format!("{}{label}", anchors.name_prefix);
    let id_attr = id
        .map(|id| format!(r#" id="{}""#, html_escape::encode_double_quoted_attribute(id)))
        .unwrap_or_default();

    let html = format!(
        r#"<a{id_attr} name="{}" class="{}"></a>"#,
        html_escape::encode_double_quoted_attribute(&name),
        html_escape::encode_double_quoted_attribute(&anchors.class),
    );
    fragment_node(&html, "a")
}
