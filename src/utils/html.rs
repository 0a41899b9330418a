//! Parsed page view shared by every extractor.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::utils::{normalize_whitespace, truncate_chars};

/// Elements whose text never reaches the visible page.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Parse a CSS selector, mapping failures to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// A fetched page together with its flattened visible text.
pub struct ParsedPage {
    pub document: Html,
    /// Visible text, one space between text nodes
    pub text: String,
}

impl ParsedPage {
    /// Parse rendered HTML. Blank content is a parse failure.
    pub fn parse(url: &str, html: &str) -> Result<Self> {
        if html.trim().is_empty() {
            return Err(AppError::parse(url, "empty document"));
        }

        let document = Html::parse_document(html);
        let text = visible_text(&document);
        Ok(Self { document, text })
    }

    /// Trimmed text of the first `<title>` element, cut to `max` characters.
    pub fn title(&self, max: usize) -> String {
        let Ok(selector) = Selector::parse("title") else {
            return String::new();
        };
        self.document
            .select(&selector)
            .next()
            .map(|el| {
                let raw: String = el.text().collect();
                truncate_chars(raw.trim(), max).to_string()
            })
            .unwrap_or_default()
    }
}

/// Flatten a document to its visible text.
///
/// Text nodes are trimmed, joined by single spaces and whitespace-normalized.
pub fn visible_text(document: &Html) -> String {
    let chunks: Vec<&str> = document
        .tree
        .root()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect();

    normalize_whitespace(&chunks.join(" "))
}
