//! Document snapshot types and the HTML snapshot builder.
//!
//! A snapshot is a read-only view of one page at one point in time: the
//! rendered body text plus every anchor element. The extension builds
//! snapshots in the page context; [`DocumentSnapshot::from_html`] builds an
//! equivalent one from raw HTML so the same extractor serves both delivery
//! paths.

use lazy_static::lazy_static;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

lazy_static! {
    static ref BODY_SELECTOR: Selector = Selector::parse("body").unwrap();
    static ref ANCHOR_SELECTOR: Selector = Selector::parse("a[href]").unwrap();
}

/// An anchor element captured from the document.
///
/// `href` is the resolved absolute URL; `raw_href` is the literal attribute
/// text. Telephone detection reads `raw_href` (URL resolution may rewrite
/// the number), social classification reads `href`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorElement {
    pub href: String,
    #[serde(default)]
    pub raw_href: String,
}

impl AnchorElement {
    pub fn new(href: impl Into<String>, raw_href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            raw_href: raw_href.into(),
        }
    }
}

/// Read-only view of a single document at one point in time.
///
/// Both fields default to empty on deserialization: a snapshot missing its
/// text or anchor list extracts to an empty result instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub anchors: Vec<AnchorElement>,
}

impl DocumentSnapshot {
    /// Build a snapshot from raw HTML.
    ///
    /// Body text is collected from the text nodes of `<body>` (the whole
    /// document when no body is present). Anchors come from `a[href]`,
    /// skipping empty attributes; relative and protocol-relative hrefs
    /// resolve against `base_url`.
    pub fn from_html(html: &str, base_url: Option<&Url>) -> Self {
        let document = Html::parse_document(html);

        let text = match document.select(&BODY_SELECTOR).next() {
            Some(body) => body.text().collect::<Vec<_>>().join("\n"),
            None => document.root_element().text().collect::<Vec<_>>().join("\n"),
        };

        let mut anchors = Vec::new();
        for element in document.select(&ANCHOR_SELECTOR) {
            let raw = element.value().attr("href").unwrap_or("").trim();
            if raw.is_empty() {
                continue;
            }
            anchors.push(AnchorElement::new(resolve_href(raw, base_url), raw));
        }

        Self { text, anchors }
    }
}

/// Resolve an href attribute to absolute form.
///
/// Absolute and scheme-carrying hrefs (`https:`, `mailto:`, `tel:`) pass
/// through; everything else joins against the base URL. Unresolvable hrefs
/// fall back to the raw attribute text.
fn resolve_href(raw: &str, base_url: Option<&Url>) -> String {
    match Url::parse(raw) {
        Ok(url) => url.to_string(),
        Err(_) => match base_url {
            Some(base) => base
                .join(raw)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| raw.to_string()),
            None => raw.to_string(),
        },
    }
}
