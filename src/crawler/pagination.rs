//! Next-page discovery
//!
//! Finds the single most likely "next page" URL in a document. Strategies
//! are independent lookups tried in strict priority order; the first hit
//! wins and nothing is merged:
//!
//! 1. `<link rel="next">`
//! 2. `<a rel="next">`
//! 3. `<a>` with a class token containing `next`
//! 4. `<a>` whose visible text is a known next-page label or chevron
//! 5. `<li>` with a class token containing `next`, holding an anchor
//!
//! Relative hrefs are resolved against the current page URL; only absolute
//! HTTP(S) results count.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Visible anchor texts accepted by the text strategy (lowercase)
const NEXT_LABELS: &[&str] = &["next", "next page", "›", "»"];

/// One independent next-link lookup
type NextStrategy = fn(&Html, &Url) -> Option<Url>;

/// Resolver strategies in priority order
const STRATEGIES: &[(&str, NextStrategy)] = &[
    ("link-rel", link_rel_next),
    ("anchor-rel", anchor_rel_next),
    ("anchor-class", anchor_class_next),
    ("anchor-text", anchor_text_next),
    ("list-item", list_item_next),
];

/// Finds the most likely next-page URL in a document
///
/// # Arguments
///
/// * `document` - The parsed HTML document
/// * `base_url` - The current page URL, used to resolve relative hrefs
///
/// # Returns
///
/// The first absolute URL any strategy produces, or None when all miss
pub fn find_next(document: &Html, base_url: &Url) -> Option<Url> {
    for (name, strategy) in STRATEGIES {
        if let Some(url) = strategy(document, base_url) {
            tracing::debug!("Next page via {} strategy: {}", name, url);
            return Some(url);
        }
    }
    None
}

/// Strategy 1: `<link rel="next" href="...">`
fn link_rel_next(document: &Html, base_url: &Url) -> Option<Url> {
    let selector = Selector::parse("link[rel][href]").ok()?;

    document
        .select(&selector)
        .filter(|el| has_rel_token(el, "next"))
        .find_map(|el| resolve_href(el.value().attr("href")?, base_url))
}

/// Strategy 2: `<a rel="next" href="...">`
fn anchor_rel_next(document: &Html, base_url: &Url) -> Option<Url> {
    let selector = Selector::parse("a[rel][href]").ok()?;

    document
        .select(&selector)
        .filter(|el| has_rel_token(el, "next"))
        .find_map(|el| resolve_href(el.value().attr("href")?, base_url))
}

/// Strategy 3: `<a class="...next...">`
fn anchor_class_next(document: &Html, base_url: &Url) -> Option<Url> {
    let selector = Selector::parse("a[class][href]").ok()?;

    document
        .select(&selector)
        .filter(|el| has_class_token_containing(el, "next"))
        .find_map(|el| resolve_href(el.value().attr("href")?, base_url))
}

/// Strategy 4: `<a>` whose trimmed visible text is a next label
fn anchor_text_next(document: &Html, base_url: &Url) -> Option<Url> {
    let selector = Selector::parse("a[href]").ok()?;

    document
        .select(&selector)
        .filter(|el| {
            let text = el.text().collect::<String>().trim().to_lowercase();
            NEXT_LABELS.contains(&text.as_str())
        })
        .find_map(|el| resolve_href(el.value().attr("href")?, base_url))
}

/// Strategy 5: `<li class="...next...">` containing an anchor
fn list_item_next(document: &Html, base_url: &Url) -> Option<Url> {
    let li_selector = Selector::parse("li[class]").ok()?;
    let a_selector = Selector::parse("a[href]").ok()?;

    document
        .select(&li_selector)
        .filter(|el| has_class_token_containing(el, "next"))
        .find_map(|li| {
            let anchor = li.select(&a_selector).next()?;
            resolve_href(anchor.value().attr("href")?, base_url)
        })
}

/// Whether the element's `rel` attribute carries the exact token (ASCII
/// case-insensitive); substring matches do not count
fn has_rel_token(element: &ElementRef, token: &str) -> bool {
    element
        .value()
        .attr("rel")
        .map(|rel| rel.split_whitespace().any(|t| t.eq_ignore_ascii_case(token)))
        .unwrap_or(false)
}

/// Whether any class token of the element contains `needle` (case-insensitive)
fn has_class_token_containing(element: &ElementRef, needle: &str) -> bool {
    element
        .value()
        .attr("class")
        .map(|classes| {
            classes
                .split_whitespace()
                .any(|token| token.to_lowercase().contains(needle))
        })
        .unwrap_or(false)
}

/// Resolves an href to an absolute HTTP(S) URL against the base
///
/// Fragment-only links and non-web schemes are rejected.
fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with("mailto:") || href.starts_with("data:") {
        return None;
    }

    let resolved = base_url.join(href).ok()?;
    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page/1/").unwrap()
    }

    fn next(html: &str) -> Option<String> {
        find_next(&Html::parse_document(html), &base_url()).map(|u| u.to_string())
    }

    #[test]
    fn test_link_rel_next() {
        let html = r#"<head><link rel="next" href="/page/2/"></head>"#;
        assert_eq!(next(html), Some("https://example.com/page/2/".to_string()));
    }

    #[test]
    fn test_anchor_rel_next() {
        let html = r#"<a rel="next" href="/page/2/">more</a>"#;
        assert_eq!(next(html), Some("https://example.com/page/2/".to_string()));
    }

    #[test]
    fn test_rel_token_is_exact() {
        // "nexter" must not count as the next relation
        let html = r#"<a rel="nexter" href="/page/2/">more</a>"#;
        assert_eq!(next(html), None);
    }

    #[test]
    fn test_rel_token_among_others() {
        let html = r#"<a rel="nofollow next" href="/page/2/">more</a>"#;
        assert_eq!(next(html), Some("https://example.com/page/2/".to_string()));
    }

    #[test]
    fn test_anchor_class_substring() {
        let html = r#"<a class="pagination-next-button" href="/page/2/">→</a>"#;
        assert_eq!(next(html), Some("https://example.com/page/2/".to_string()));
    }

    #[test]
    fn test_anchor_text_next() {
        let html = r#"<a href="/page/2/">  Next  </a>"#;
        assert_eq!(next(html), Some("https://example.com/page/2/".to_string()));
    }

    #[test]
    fn test_anchor_text_chevron() {
        let html = r#"<a href="/page/2/">»</a>"#;
        assert_eq!(next(html), Some("https://example.com/page/2/".to_string()));
    }

    #[test]
    fn test_anchor_text_must_match_exactly() {
        let html = r#"<a href="/page/2/">what comes next</a>"#;
        assert_eq!(next(html), None);
    }

    #[test]
    fn test_list_item_next() {
        let html = r#"<ul class="pager"><li class="next"><a href="/page/2/">Next →</a></li></ul>"#;
        assert_eq!(next(html), Some("https://example.com/page/2/".to_string()));
    }

    #[test]
    fn test_priority_link_rel_beats_text() {
        let html = r#"
            <head><link rel="next" href="/from-link-rel/"></head>
            <body><a href="/from-chevron/">›</a></body>
        "#;
        assert_eq!(
            next(html),
            Some("https://example.com/from-link-rel/".to_string())
        );
    }

    #[test]
    fn test_priority_rel_anchor_beats_class() {
        let html = r#"
            <a class="next" href="/from-class/">x</a>
            <a rel="next" href="/from-rel/">y</a>
        "#;
        assert_eq!(next(html), Some("https://example.com/from-rel/".to_string()));
    }

    #[test]
    fn test_absolute_href_kept() {
        let html = r#"<a rel="next" href="https://example.com/p2">n</a>"#;
        assert_eq!(next(html), Some("https://example.com/p2".to_string()));
    }

    #[test]
    fn test_relative_href_resolved_against_base() {
        let html = r#"<a rel="next" href="2/">n</a>"#;
        assert_eq!(next(html), Some("https://example.com/page/1/2/".to_string()));
    }

    #[test]
    fn test_fragment_href_rejected() {
        let html = r##"<a rel="next" href="#top">n</a>"##;
        assert_eq!(next(html), None);
    }

    #[test]
    fn test_javascript_href_rejected() {
        let html = r#"<a rel="next" href="javascript:void(0)">n</a>"#;
        assert_eq!(next(html), None);
    }

    #[test]
    fn test_no_next_link() {
        let html = r#"<a href="/somewhere">elsewhere</a>"#;
        assert_eq!(next(html), None);
    }
}
