// src/services/harvester.rs

//! Link harvester.
//!
//! Finds detail-page links on a portal's listing index using the portal's
//! card selector.

use std::collections::HashSet;

use scraper::Html;

use crate::error::Result;
use crate::models::HarvestConfig;
use crate::utils::html::parse_selector;
use crate::utils::url::{is_absolute, join};

/// Derives a bounded set of candidate detail-page URLs from an index page.
#[derive(Debug, Clone)]
pub struct LinkHarvester {
    max_links: usize,
    detail_marker: String,
    sort_links: bool,
}

impl LinkHarvester {
    pub fn new(config: &HarvestConfig) -> Self {
        Self {
            max_links: config.max_links,
            detail_marker: config.detail_marker.clone(),
            sort_links: config.sort_links,
        }
    }

    /// Harvest candidate links from `page_html`.
    ///
    /// Only an invalid selector is an error; a selector that matches nothing
    /// is logged and yields an empty list.
    pub fn harvest(&self, page_html: &str, selector: &str, base_url: &str) -> Result<Vec<String>> {
        let card_sel = parse_selector(selector)?;
        let anchor_sel = parse_selector("a[href]")?;
        let document = Html::parse_document(page_html);

        let mut card_count = 0;
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for card in document.select(&card_sel) {
            card_count += 1;

            let Some(href) = card
                .select(&anchor_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
            else {
                continue;
            };

            let Some(link) = self.candidate(href.trim(), base_url) else {
                continue;
            };

            if seen.insert(link.clone()) {
                links.push(link);
            }
        }

        if card_count == 0 {
            log::warn!("No listings found with selector: {}", selector);
            return Ok(Vec::new());
        }

        if self.sort_links {
            links.sort();
        }
        links.truncate(self.max_links);

        log::debug!(
            "Harvested {} of {} cards with selector {}",
            links.len(),
            card_count,
            selector
        );
        Ok(links)
    }

    /// Absolute detail URL for an href, or `None` if it is not a detail link.
    fn candidate(&self, href: &str, base_url: &str) -> Option<String> {
        if !href.contains(&self.detail_marker) {
            return None;
        }
        if is_absolute(href) && !href.starts_with(base_url) {
            log::debug!("Skipping off-portal link {}", href);
            return None;
        }
        Some(join(base_url, href))
    }
}

impl Default for LinkHarvester {
    fn default() -> Self {
        Self::new(&HarvestConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.properstar.es";
    const SELECTOR: &str = "div[data-testid='listing-card']";

    fn card(href: &str) -> String {
        format!(
            r#"<div data-testid="listing-card"><span>Plot</span><a href="{href}">View</a><a href="/other">x</a></div>"#
        )
    }

    fn page(cards: &[String]) -> String {
        format!("<html><body>{}</body></html>", cards.join("\n"))
    }

    #[test]
    fn test_harvest_caps_at_three() {
        let html = page(&[
            card("/listing/105"),
            card("/listing/101"),
            card("/listing/104"),
            card("/listing/102"),
            card("/listing/103"),
        ]);
        let links = LinkHarvester::default().harvest(&html, SELECTOR, BASE).unwrap();

        assert_eq!(
            links,
            vec![
                "https://www.properstar.es/listing/101".to_string(),
                "https://www.properstar.es/listing/102".to_string(),
                "https://www.properstar.es/listing/103".to_string(),
            ]
        );
        for link in &links {
            assert!(link.starts_with(BASE));
            assert!(link.contains("/listing/"));
        }
    }

    #[test]
    fn test_harvest_deduplicates() {
        let html = page(&[
            card("/listing/1"),
            card("/listing/1"),
            card("/listing/2"),
        ]);
        let links = LinkHarvester::default().harvest(&html, SELECTOR, BASE).unwrap();
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_harvest_skips_non_detail_links() {
        let html = page(&[card("/agency/7"), card("/listing/9")]);
        let links = LinkHarvester::default().harvest(&html, SELECTOR, BASE).unwrap();
        assert_eq!(links, vec!["https://www.properstar.es/listing/9".to_string()]);
    }

    #[test]
    fn test_harvest_uses_first_anchor_only() {
        let html = page(&[
            r#"<div data-testid="listing-card"><a href="/search">s</a><a href="/listing/3">v</a></div>"#
                .to_string(),
        ]);
        let links = LinkHarvester::default().harvest(&html, SELECTOR, BASE).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_harvest_absolute_links() {
        let html = page(&[
            card("https://www.properstar.es/listing/4"),
            card("https://elsewhere.com/listing/5"),
        ]);
        let links = LinkHarvester::default().harvest(&html, SELECTOR, BASE).unwrap();
        assert_eq!(links, vec!["https://www.properstar.es/listing/4".to_string()]);
    }

    #[test]
    fn test_harvest_no_cards_is_empty() {
        let html = page(&[r#"<div class="card"><a href="/listing/1">x</a></div>"#.to_string()]);
        let links = LinkHarvester::default().harvest(&html, SELECTOR, BASE).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_harvest_invalid_selector() {
        assert!(LinkHarvester::default()
            .harvest("<html></html>", "[[invalid", BASE)
            .is_err());
    }

    #[test]
    fn test_harvest_custom_cap_and_order() {
        let config = HarvestConfig {
            max_links: 5,
            sort_links: false,
            ..HarvestConfig::default()
        };
        let html = page(&[card("/listing/b"), card("/listing/a")]);
        let links = LinkHarvester::new(&config).harvest(&html, SELECTOR, BASE).unwrap();
        assert_eq!(
            links,
            vec![
                "https://www.properstar.es/listing/b".to_string(),
                "https://www.properstar.es/listing/a".to_string(),
            ]
        );
    }
}
