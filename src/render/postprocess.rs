//! Post-processing of rendered fragments
//!
//! Turns the renderer's raw fragment into the canonical output: headings get
//! sequential anchor ids, the citation list becomes a references section, the
//! optional reading-time banner is prepended and everything is wrapped in the
//! output container.

use super::{ReadingTime, TitleEntry};
use crate::compat::dom;
use crate::config::RenderOptions;
use crate::markdown::{Citation, RawFragment};
use crate::string_utils::escape_html;
use kuchikiki::NodeRef;
use log::{debug, warn};

/// Class of the element wrapping every processed fragment.
pub const CONTAINER_CLASS: &str = "container";

/// Output of `process`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub html: String,
    pub titles: Vec<TitleEntry>,
    pub reading_time: ReadingTime,
}

/// Address headings, append references and wrap a raw fragment.
///
/// Reading time is computed from `source`, the raw markdown the fragment was
/// rendered from. The result depends only on the inputs, so processing the
/// same fragment twice gives identical output.
pub fn process(fragment: &RawFragment, source: &str, options: &RenderOptions) -> Processed {
    let reading_time = ReadingTime::from_text(source);

    let mut body = String::with_capacity(fragment.html.len() + 256);
    if options.count_status {
        body.push_str(&reading_time_banner(&reading_time));
    }
    body.push_str(&fragment.html);
    if !fragment.citations.is_empty() {
        body.push_str(&references_section(&fragment.citations));
    }

    let container = dom::parse_fragment(&body, "section", &[("class", CONTAINER_CLASS)]);
    let titles = address_in(&container);
    debug!(
        "Processed fragment: {} headings, {} citations, {} words",
        titles.len(),
        fragment.citations.len(),
        reading_time.words
    );

    Processed {
        html: dom::outer_html(&container),
        titles,
        reading_time,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Heading Addressing
// ─────────────────────────────────────────────────────────────────────────────

/// Headings tagged by the renderer; raw HTML headings carry no marker.
const TAGGED_HEADINGS: &str = "h1[data-heading], h2[data-heading], h3[data-heading], \
                               h4[data-heading], h5[data-heading], h6[data-heading]";

/// Give every tagged heading a sequential `id` and collect the title list.
///
/// Any id already present on a tagged heading is replaced, so running this on
/// its own output changes nothing.
pub fn address_headings(html: &str) -> (String, Vec<TitleEntry>) {
    let container = dom::parse_fragment(html, "div", &[]);
    let titles = address_in(&container);
    (dom::inner_html(&container), titles)
}

fn address_in(container: &NodeRef) -> Vec<TitleEntry> {
    let headings: Vec<NodeRef> = match container.select(TAGGED_HEADINGS) {
        Ok(selected) => selected.map(|heading| heading.as_node().clone()).collect(),
        Err(()) => {
            warn!("Heading selector failed to compile");
            return Vec::new();
        }
    };

    let mut titles = Vec::with_capacity(headings.len());
    for heading in headings {
        let Some(level) = dom::tag_name(&heading)
            .and_then(|tag| tag.strip_prefix('h').and_then(|digit| digit.parse::<u8>().ok()))
        else {
            continue;
        };
        let anchor_id = titles.len().to_string();
        dom::set_attribute(&heading, "id", &anchor_id);
        titles.push(TitleEntry::new(anchor_id, heading.text_contents().trim(), level));
    }
    titles
}

// ─────────────────────────────────────────────────────────────────────────────
// Decorations
// ─────────────────────────────────────────────────────────────────────────────

fn reading_time_banner(reading_time: &ReadingTime) -> String {
    format!(
        "<blockquote class=\"reading-time\"><p>{}</p></blockquote>",
        escape_html(&reading_time.format_compact())
    )
}

fn references_section(citations: &[Citation]) -> String {
    let mut section = String::from("<h4 class=\"footnotes-title\">References</h4><p class=\"footnotes\">");
    for citation in citations {
        section.push_str(&format!(
            "<code style=\"font-size: 90%; opacity: 0.6;\">[{}]</code> {}: <i style=\"word-break: break-all\">{}</i><br/>",
            citation.index,
            escape_html(&citation.title),
            escape_html(&citation.url)
        ));
    }
    section.push_str("</p>");
    section
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(html: &str) -> RawFragment {
        RawFragment {
            html: html.to_string(),
            citations: Vec::new(),
        }
    }

    #[test]
    fn test_headings_get_sequential_ids() {
        let raw = fragment(
            "<h1 data-heading=\"true\">One</h1><p>x</p><h2 data-heading=\"true\">Two &amp; <em>more</em></h2>",
        );
        let processed = process(&raw, "", &RenderOptions::default());
        assert_eq!(
            processed.titles,
            vec![
                TitleEntry::new("0", "One", 1),
                TitleEntry::new("1", "Two & more", 2)
            ]
        );
        assert!(processed.html.contains("<h1 data-heading=\"true\" id=\"0\">One</h1>"));
        assert!(processed.html.contains("<h2 data-heading=\"true\" id=\"1\">"));
    }

    #[test]
    fn test_untagged_headings_are_ignored() {
        let (html, titles) = address_headings("<h3>plain</h3>");
        assert!(titles.is_empty());
        assert_eq!(html, "<h3>plain</h3>");
    }

    #[test]
    fn test_existing_ids_are_replaced() {
        let (html, titles) =
            address_headings("<h2 data-heading=\"true\" id=\"old\">A</h2><h2 id=\"keep\">B</h2>");
        assert_eq!(titles, vec![TitleEntry::new("0", "A", 2)]);
        assert_eq!(
            html,
            "<h2 data-heading=\"true\" id=\"0\">A</h2><h2 id=\"keep\">B</h2>"
        );
    }

    #[test]
    fn test_headings_inside_repaired_markup() {
        let raw = fragment("<div><p>intro<h3 data-heading=\"true\">Nested</h3></div>");
        let processed = process(&raw, "", &RenderOptions::default());
        assert_eq!(processed.titles, vec![TitleEntry::new("0", "Nested", 3)]);
        assert!(processed
            .html
            .contains("<p>intro</p><h3 data-heading=\"true\" id=\"0\">Nested</h3>"));
    }

    #[test]
    fn test_addressing_is_idempotent() {
        let raw = "<h1 data-heading=\"true\">A</h1><h3 data-heading=\"true\">B</h3>";
        let (once, first_titles) = address_headings(raw);
        let (twice, second_titles) = address_headings(&once);
        assert_eq!(once, twice);
        assert_eq!(first_titles, second_titles);
    }

    #[test]
    fn test_process_is_deterministic() {
        let raw = fragment("<h1 data-heading=\"true\">Hello</h1><p>World</p>");
        let options = RenderOptions {
            count_status: true,
            ..RenderOptions::default()
        };
        let a = process(&raw, "# Hello\n\nWorld", &options);
        let b = process(&raw, "# Hello\n\nWorld", &options);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_headings() {
        let processed = process(&fragment("<p>text</p>"), "text", &RenderOptions::default());
        assert!(processed.titles.is_empty());
        assert_eq!(
            processed.html,
            "<section class=\"container\"><p>text</p></section>"
        );
    }

    #[test]
    fn test_count_status_prepends_banner() {
        let options = RenderOptions {
            count_status: true,
            ..RenderOptions::default()
        };
        let processed = process(&fragment("<p>a b</p>"), "a b", &options);
        assert!(processed
            .html
            .starts_with("<section class=\"container\"><blockquote class=\"reading-time\">"));
        assert!(processed.html.contains("2 words, about 1 min read"));
    }

    #[test]
    fn test_references_are_appended_untagged() {
        let raw = RawFragment {
            html: "<p>see docs<sup>[1]</sup></p>".to_string(),
            citations: vec![Citation {
                index: 1,
                title: "docs".to_string(),
                url: "https://example.com/?a=1&b=2".to_string(),
            }],
        };
        let processed = process(&raw, "", &RenderOptions::default());
        assert!(processed.html.contains("<p class=\"footnotes\">"));
        assert!(processed.html.contains("https://example.com/?a=1&amp;b=2"));
        assert!(processed.titles.is_empty());
    }

    #[test]
    fn test_reading_time_uses_source_not_html() {
        let raw = fragment("<p>one two three four five</p>");
        let processed = process(&raw, "one", &RenderOptions::default());
        assert_eq!(processed.reading_time.words, 1);
    }
}
