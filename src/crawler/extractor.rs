//! Quote extraction from parsed markup
//!
//! Quote-listing sites disagree wildly on structure, so extraction runs an
//! ordered list of independent strategies over the same document and unions
//! their results:
//!
//! 1. Container: a `.quote` element holding `.text` and `.author` children
//! 2. Blockquote: `<blockquote>` with a `<cite>` author, a trailing
//!    `— Author` pattern, or no author at all
//! 3. Compound: a single text blob shaped `"quoted text" — Author`
//!
//! Candidates are trimmed, noise-filtered, and deduplicated by
//! case-insensitive `(author, text)` key, first-seen order preserved.
//! Adding support for a new site shape means adding one function to
//! `STRATEGIES`.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;

/// An extracted `(author, text)` pair, not yet checked against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub author: String,
    pub text: String,
}

/// Candidates with shorter text than this are discarded as noise
const MIN_TEXT_LEN: usize = 5;

/// Author assigned when no strategy can recover one
const FALLBACK_AUTHOR: &str = "Unknown";

/// Quotation-mark characters stripped from the ends of quote text
const QUOTE_MARKS: &[char] = &[
    '"', '\'', '\u{201C}', '\u{201D}', '\u{201E}', '\u{2018}', '\u{2019}', '«', '»',
];

/// Trailing `— Author Name` at the end of a blockquote's text
static TRAILING_AUTHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?P<text>.+?)\s*[—–―]\s*(?P<author>[^—–―\n]{1,80})\s*$")
        .expect("Invalid trailing author regex")
});

/// A whole blob shaped `"quoted text" — Author`
static COMPOUND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)^["'\u{201C}\u{201E}\u{2018}«](?P<text>.+?)["'\u{201D}\u{2019}»]\s*[—–―-]+\s*(?P<author>.+)$"#,
    )
    .expect("Invalid compound quote regex")
});

/// One independent extraction heuristic
type Strategy = fn(&Html) -> Vec<Candidate>;

/// Extraction strategies in application order
const STRATEGIES: &[(&str, Strategy)] = &[
    ("container", container_quotes),
    ("blockquote", blockquote_quotes),
    ("compound", compound_quotes),
];

/// Extracts all quote candidates from a parsed document
///
/// Runs every strategy, unions the results in order, then trims, drops
/// candidates whose text is under five characters, and dedups by
/// case-insensitive `(author, text)` key.
///
/// # Arguments
///
/// * `document` - The parsed HTML document
///
/// # Returns
///
/// Deduplicated candidates in first-seen order
pub fn extract_quotes(document: &Html) -> Vec<Candidate> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut out = Vec::new();

    for (name, strategy) in STRATEGIES {
        for raw in strategy(document) {
            let author = raw.author.trim();
            let text = raw.text.trim();

            if text.chars().count() < MIN_TEXT_LEN {
                continue;
            }

            let key = (author.to_lowercase(), text.to_lowercase());
            if seen.insert(key) {
                tracing::trace!("Candidate via {} strategy: {} - {}", name, author, text);
                out.push(Candidate {
                    author: author.to_string(),
                    text: text.to_string(),
                });
            }
        }
    }

    out
}

/// Strategy 1: `.quote` containers with `.text` and `.author` sub-elements
fn container_quotes(document: &Html) -> Vec<Candidate> {
    let mut out = Vec::new();

    let (Ok(container_sel), Ok(text_sel), Ok(author_sel)) = (
        Selector::parse(".quote"),
        Selector::parse(".text"),
        Selector::parse(".author"),
    ) else {
        return out;
    };

    for container in document.select(&container_sel) {
        let Some(text_el) = container.select(&text_sel).next() else {
            continue;
        };
        let Some(author_el) = container.select(&author_sel).next() else {
            continue;
        };

        let text = strip_quote_marks(&element_text(&text_el));
        let author = element_text(&author_el);

        out.push(Candidate { author, text });
    }

    out
}

/// Strategy 2: `<blockquote>` elements
///
/// The author is an explicit `<cite>` sub-element when present, otherwise a
/// trailing `— Author` pattern in the quoted text, otherwise `"Unknown"`.
fn blockquote_quotes(document: &Html) -> Vec<Candidate> {
    let mut out = Vec::new();

    let (Ok(block_sel), Ok(cite_sel)) = (Selector::parse("blockquote"), Selector::parse("cite"))
    else {
        return out;
    };

    for block in document.select(&block_sel) {
        let (author, text) = if let Some(cite) = block.select(&cite_sel).next() {
            let author = element_text(&cite)
                .trim_start_matches(['—', '–', '―', '-', ' '])
                .to_string();
            (author, text_outside_citation(&block))
        } else {
            let body = element_text(&block);
            match TRAILING_AUTHOR_RE.captures(body.trim()) {
                Some(caps) => (caps["author"].to_string(), caps["text"].to_string()),
                None => (FALLBACK_AUTHOR.to_string(), body),
            }
        };

        out.push(Candidate {
            author,
            text: strip_quote_marks(&text),
        });
    }

    out
}

/// Strategy 3: compound text blobs shaped `"quoted text" — Author`
///
/// Looked for in `<p>` elements and in `<div>`s whose class mentions
/// "quote" (the Goodreads `quoteText` shape). The author part is cut at
/// the first comma to shed trailing work titles.
fn compound_quotes(document: &Html) -> Vec<Candidate> {
    let mut out = Vec::new();

    let (Ok(div_sel), Ok(p_sel)) = (Selector::parse("div[class]"), Selector::parse("p")) else {
        return out;
    };

    let divs = document
        .select(&div_sel)
        .filter(|el| has_class_token_containing(el, "quote"));
    let paragraphs = document.select(&p_sel);

    for element in divs.chain(paragraphs) {
        let body = element_text(&element);
        let Some(caps) = COMPOUND_RE.captures(body.trim()) else {
            continue;
        };

        let author = caps["author"]
            .split(',')
            .next()
            .unwrap_or(FALLBACK_AUTHOR)
            .to_string();

        out.push(Candidate {
            author,
            text: strip_quote_marks(&caps["text"]),
        });
    }

    out
}

/// Collects an element's visible text with whitespace runs collapsed
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collects a blockquote's text, skipping `<cite>` and `<footer>` subtrees
/// so the attribution line does not leak into the quote body
fn text_outside_citation(block: &ElementRef) -> String {
    let mut raw = String::new();
    collect_non_citation_text(block, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_non_citation_text(element: &ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    let name = child_el.value().name();
                    if name != "cite" && name != "footer" {
                        collect_non_citation_text(&child_el, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Strips enclosing quotation-mark characters and surrounding whitespace
fn strip_quote_marks(text: &str) -> String {
    text.trim()
        .trim_matches(|c| QUOTE_MARKS.contains(&c))
        .trim()
        .to_string()
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

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<Candidate> {
        extract_quotes(&Html::parse_document(html))
    }

    fn candidate(author: &str, text: &str) -> Candidate {
        Candidate {
            author: author.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_container_strategy() {
        let html = r#"
            <div class="quote">
                <span class="text">“Imagination is more important than knowledge.”</span>
                <small class="author">Albert Einstein</small>
            </div>
        "#;
        assert_eq!(
            extract(html),
            vec![candidate(
                "Albert Einstein",
                "Imagination is more important than knowledge."
            )]
        );
    }

    #[test]
    fn test_container_strips_quote_marks() {
        let html = r#"<div class="quote"><span class="text">"Think."</span><span class="author">Ada</span></div>"#;
        assert_eq!(extract(html), vec![candidate("Ada", "Think.")]);
    }

    #[test]
    fn test_container_without_author_is_skipped() {
        let html = r#"<div class="quote"><span class="text">"No author here."</span></div>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_blockquote_with_cite() {
        let html = r#"<blockquote>Stay hungry, stay foolish.<cite>Steve Jobs</cite></blockquote>"#;
        assert_eq!(
            extract(html),
            vec![candidate("Steve Jobs", "Stay hungry, stay foolish.")]
        );
    }

    #[test]
    fn test_blockquote_cite_with_leading_dash() {
        let html = r#"<blockquote>Less is more.<cite>— Mies</cite></blockquote>"#;
        assert_eq!(extract(html), vec![candidate("Mies", "Less is more.")]);
    }

    #[test]
    fn test_blockquote_trailing_author() {
        let html = r#"<blockquote>Stay curious.— Grace</blockquote>"#;
        assert_eq!(extract(html), vec![candidate("Grace", "Stay curious.")]);
    }

    #[test]
    fn test_blockquote_without_author_is_unknown() {
        let html = r#"<blockquote>Nobody claimed this line.</blockquote>"#;
        assert_eq!(
            extract(html),
            vec![candidate("Unknown", "Nobody claimed this line.")]
        );
    }

    #[test]
    fn test_compound_div() {
        let html = r#"<div class="quoteText">“Be yourself; everyone else is taken.” ― Oscar Wilde</div>"#;
        assert_eq!(
            extract(html),
            vec![candidate("Oscar Wilde", "Be yourself; everyone else is taken.")]
        );
    }

    #[test]
    fn test_compound_author_cut_at_comma() {
        let html =
            r#"<div class="quoteText">“So it goes.” ― Kurt Vonnegut, Slaughterhouse-Five</div>"#;
        assert_eq!(extract(html), vec![candidate("Kurt Vonnegut", "So it goes.")]);
    }

    #[test]
    fn test_compound_paragraph() {
        let html = r#"<p>"Simplicity is the soul of efficiency." — Austin Freeman</p>"#;
        assert_eq!(
            extract(html),
            vec![candidate("Austin Freeman", "Simplicity is the soul of efficiency.")]
        );
    }

    #[test]
    fn test_plain_paragraph_is_not_a_quote() {
        let html = r#"<p>Just some body copy with a dash - nothing else.</p>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_short_text_is_noise() {
        let html = r#"<div class="quote"><span class="text">"Hi."</span><span class="author">A</span></div>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_dedup_is_case_insensitive() {
        let html = r#"
            <div class="quote"><span class="text">"Think."</span><span class="author">Ada</span></div>
            <blockquote>Think.<cite>ADA</cite></blockquote>
        "#;
        let candidates = extract(html);
        assert_eq!(candidates, vec![candidate("Ada", "Think.")]);
    }

    #[test]
    fn test_union_of_strategies() {
        let html = r#"
            <div class="quote"><span class="text">"Think."</span><span class="author">Ada</span></div>
            <blockquote>Stay curious.— Grace</blockquote>
        "#;
        let candidates = extract(html);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], candidate("Ada", "Think."));
        assert_eq!(candidates[1], candidate("Grace", "Stay curious."));
    }

    #[test]
    fn test_in_page_duplicate_yields_one_candidate() {
        // Two identical containers plus one blockquote: exactly two
        // distinct candidates survive
        let html = r#"
            <div class="quote"><span class="text">"Think."</span><span class="author">Ada</span></div>
            <div class="quote"><span class="text">"Think."</span><span class="author">Ada</span></div>
            <blockquote>Stay curious.— Grace</blockquote>
        "#;
        let candidates = extract(html);
        assert_eq!(
            candidates,
            vec![candidate("Ada", "Think."), candidate("Grace", "Stay curious.")]
        );
    }

    #[test]
    fn test_first_seen_order_is_preserved() {
        let html = r#"
            <div class="quote"><span class="text">"First of the pair."</span><span class="author">A</span></div>
            <div class="quote"><span class="text">"Second of the pair."</span><span class="author">B</span></div>
        "#;
        let candidates = extract(html);
        assert_eq!(candidates[0].author, "A");
        assert_eq!(candidates[1].author, "B");
    }

    #[test]
    fn test_empty_document() {
        assert!(extract("<html><body></body></html>").is_empty());
    }
}
