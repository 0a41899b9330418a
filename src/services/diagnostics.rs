// src/services/diagnostics.rs

//! Anchor class diagnostics.
//!
//! Counts how often each `class` attribute value appears on `<a>` elements.
//! The report helps pick a new card selector when a portal changes its
//! markup; it never affects extracted records.

use std::collections::HashMap;

use scraper::{Html, Selector};

/// Class combinations on anchors, most frequent first.
///
/// Ties are ordered alphabetically so the report is stable.
pub fn anchor_class_frequencies(html: &str, top_n: usize) -> Vec<(String, usize)> {
    let Ok(anchor_sel) = Selector::parse("a[class]") else {
        return Vec::new();
    };
    let document = Html::parse_document(html);

    let mut counts: HashMap<String, usize> = HashMap::new();
    for anchor in document.select(&anchor_sel) {
        let classes = anchor
            .value()
            .attr("class")
            .unwrap_or_default()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if !classes.is_empty() {
            *counts.entry(classes).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);
    ranked
}

/// Log the top anchor classes of a portal's index page.
pub fn report(portal: &str, html: &str, top_n: usize) {
    let ranked = anchor_class_frequencies(html, top_n);
    if ranked.is_empty() {
        log::info!("[{}] No classed anchors found", portal);
        return;
    }

    log::info!("[{}] Top anchor class names:", portal);
    for (classes, count) in ranked {
        log::info!("  - {} : {} occurrences", classes, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <a class="card-link" href="/listing/1">1</a>
        <a class="card-link" href="/listing/2">2</a>
        <a class="card-link  stretched" href="/listing/3">3</a>
        <a class="nav" href="/">home</a>
        <a class="btn" href="/login">login</a>
        <a href="/plain">plain</a>
        <a class="" href="/empty">empty</a>
    "#;

    #[test]
    fn test_counts_and_order() {
        let ranked = anchor_class_frequencies(PAGE, 10);
        assert_eq!(
            ranked,
            vec![
                ("card-link".to_string(), 2),
                ("btn".to_string(), 1),
                ("card-link stretched".to_string(), 1),
                ("nav".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_n() {
        let ranked = anchor_class_frequencies(PAGE, 1);
        assert_eq!(ranked, vec![("card-link".to_string(), 2)]);
    }

    #[test]
    fn test_garbage_input() {
        assert!(anchor_class_frequencies("<<<not html", 10).is_empty());
        assert!(anchor_class_frequencies("", 10).is_empty());
    }
}
