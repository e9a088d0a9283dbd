//! Jigsaw (jigsaw.tighten.co) documentation docset.

use std::sync::Arc;

use tracing::instrument;

use docsetbuilder_shared::{AnchorConfig, AppConfig, CatalogEntry, FormatRule, Result};
use docsetbuilder_storage::DocumentStore;

use crate::extract::extract_entries;
use crate::format::Formatter;
use crate::{Docset, DocsetInfo};

/// App-root container the site's Vue app mounts into.
const APP_ROOT: &str = "#vue-app";

/// Responsive layout tokens that assume the site header and a wide viewport.
const LAYOUT_TOKENS: &[(&str, &[&str])] = &[
    ("#vue-app > div", &["pt-16", "md:pt-24", "lg:pt-32", "md:px-6"]),
    ("#vue-app > div > div", &["max-w-3xl"]),
    (
        "div.markdown",
        &[
            "lg:max-w-md",
            "xl:max-w-lg",
            "md:mb-6",
            "lg:mb-10",
            "xl:px-10",
            "sm:shadow",
            "md:rounded-lg",
        ],
    ),
];

/// Built-in formatting rules for Jigsaw pages, in application order.
pub fn jigsaw_rules() -> Vec<FormatRule> {
    let mut rules = vec![
        // site navigation; the content div left after an earlier pass is the last one
        FormatRule::remove(format!("{APP_ROOT} > div:first-child:not(:last-of-type)")),
        FormatRule::remove(format!("{APP_ROOT} > header")),
        FormatRule::remove("footer"),
        // content wrapper sat below the fixed header
        FormatRule::remove_class(format!("{APP_ROOT} > div > div > div"), "pt-4"),
        FormatRule::set_style(format!("{APP_ROOT} > div > div > div"), "margin-top", "-1.5rem"),
    ];

    for (selector, tokens) in LAYOUT_TOKENS {
        rules.extend(
            tokens
                .iter()
                .map(|token| FormatRule::remove_class(*selector, *token)),
        );
    }

    rules.extend([
        FormatRule::add_class("h2", "text-3xl"),
        FormatRule::set_style("h3", "font-size", "1.5rem"),
        FormatRule::set_style("h4", "margin-top", "2.5rem"),
        FormatRule::remove("script"),
    ]);

    rules
}

/// The Jigsaw docset: catalog extraction plus offline formatting.
pub struct Jigsaw {
    store: Arc<dyn DocumentStore>,
    formatter: Formatter,
}

impl Jigsaw {
    pub const INFO: DocsetInfo = DocsetInfo {
        code: "jigsaw",
        name: "Jigsaw",
        url: "jigsaw.tighten.co",
        index: "installation.html",
        playground: "",
        icon_16: "favicon-16x16.png",
        icon_32: "favicon-32x32.png",
        external_domains: &[],
    };

    /// Docset with the built-in rules and default anchor settings.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            formatter: Formatter::new(jigsaw_rules(), AnchorConfig::default()),
        }
    }

    /// Docset honoring `[anchors]` and any `[[format.rules]]` override.
    pub fn from_config(config: &AppConfig, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let rules = if config.format.rules.is_empty() {
            jigsaw_rules()
        } else {
            config.format.rules.clone()
        };

        Ok(Self {
            store,
            formatter: Formatter::validated(rules, config.anchors.clone())?,
        })
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }
}

impl Docset for Jigsaw {
    fn info(&self) -> &DocsetInfo {
        &Self::INFO
    }

    #[instrument(skip(self), fields(docset = Jigsaw::INFO.code))]
    fn entries(&self, path: &str) -> Result<Vec<CatalogEntry>> {
        let html = self.store.read(path)?;
        Ok(extract_entries(&html, path))
    }

    fn format(&self, html: &str) -> Result<String> {
        self.formatter.format(html)
    }
}
