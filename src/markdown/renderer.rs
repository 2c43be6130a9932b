//! Markdown to HTML rendering using comrak
//!
//! The document is parsed into a comrak AST, the nodes whose markup we own
//! (code blocks, images and, when citing, external links) are replaced in
//! place by raw HTML, and the tree is formatted. Markdown headings are tagged
//! with `data-heading` so the post-processor can address them; headings in
//! raw HTML written by the author are not.

use super::highlight::{render_code_block, CodeBlockStyle};
use crate::config::RenderOptions;
use crate::string_utils::escape_html;
use comrak::adapters::{HeadingAdapter, HeadingMeta};
use comrak::nodes::{AstNode, NodeHtmlBlock, NodeLink, NodeValue, Sourcepos};
use comrak::{format_html_with_plugins, parse_document, Arena, Options, Plugins};
use log::{debug, warn};
use std::io::{self, Write};

/// Links to this host are never turned into citations.
const WECHAT_ARTICLE_PREFIX: &str = "https://mp.weixin.qq.com";

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// A link collected as a numbered citation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    /// 1-based citation number
    pub index: usize,
    /// Link title, or the link text when there is no title
    pub title: String,
    pub url: String,
}

/// HTML produced by the renderer, before post-processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFragment {
    pub html: String,
    /// Citations in order of first appearance
    pub citations: Vec<Citation>,
}

/// Markdown renderer configured with a fixed set of structural options.
///
/// Holds nothing but its options: the output depends only on the options and
/// the text passed to `render`.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Replace the renderer's options.
    pub fn reset(&mut self, options: RenderOptions) {
        debug!("Renderer options reset: {:?}", options);
        self.options = options;
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render markdown text with the current options.
    pub fn render(&self, text: &str) -> RawFragment {
        render(text, &self.options)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn comrak_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    // Raw HTML written by the author passes through
    options.render.unsafe_ = true;
    options
}

/// Render markdown text into a raw fragment.
///
/// Never fails: syntax comrak does not recognize is kept as literal text.
pub fn render(text: &str, options: &RenderOptions) -> RawFragment {
    let arena = Arena::new();
    let comrak_options = comrak_options();
    let root = parse_document(&arena, text, &comrak_options);

    let mut citations = CitationList::default();
    let nodes: Vec<_> = root.descendants().collect();
    for node in nodes {
        if let Some(value) = replacement_for(node, options, &mut citations) {
            let children: Vec<_> = node.children().collect();
            for child in children {
                child.detach();
            }
            node.data.borrow_mut().value = value;
        }
    }

    let mut plugins = Plugins::default();
    plugins.render.heading_adapter = Some(&TaggedHeadings);

    let mut buffer = Vec::with_capacity(text.len() * 2);
    if let Err(e) = format_html_with_plugins(root, &comrak_options, &mut buffer, &plugins) {
        warn!("Failed to format rendered markdown: {}", e);
    }
    let html = String::from_utf8_lossy(&buffer).into_owned();

    debug!(
        "Rendered {} bytes of markdown into {} bytes of HTML",
        text.len(),
        html.len()
    );
    RawFragment {
        html,
        citations: citations.into_inner(),
    }
}

/// The raw HTML that replaces `node`, if we render it ourselves.
fn replacement_for<'a>(
    node: &'a AstNode<'a>,
    options: &RenderOptions,
    citations: &mut CitationList,
) -> Option<NodeValue> {
    let ast = node.data.borrow();
    match &ast.value {
        NodeValue::CodeBlock(block) => {
            let language = block.info.split_whitespace().next().unwrap_or("");
            let style = CodeBlockStyle {
                mac_sign: options.mac_style_code_block,
                line_numbers: options.show_line_numbers,
            };
            Some(NodeValue::HtmlBlock(NodeHtmlBlock {
                block_type: 0,
                literal: render_code_block(&block.literal, language, style),
            }))
        }
        NodeValue::Image(image) => {
            let alt = collect_text(node);
            Some(NodeValue::HtmlInline(figure_html(image, &alt, options)))
        }
        NodeValue::Link(link) if options.cite_as_footnote => {
            let text = collect_text(node);
            if !is_citable(link, &text) {
                return None;
            }
            let title = if link.title.is_empty() {
                text.clone()
            } else {
                link.title.clone()
            };
            let index = citations.cite(&title, &link.url);
            Some(NodeValue::HtmlInline(format!(
                "{}<sup>[{}]</sup>",
                escape_html(&text),
                index
            )))
        }
        _ => None,
    }
}

/// External links become citations; in-page, relative and bare URL links don't.
fn is_citable(link: &NodeLink, text: &str) -> bool {
    let external = link.url.starts_with("http://") || link.url.starts_with("https://");
    external && !link.url.starts_with(WECHAT_ARTICLE_PREFIX) && text != link.url
}

fn figure_html(image: &NodeLink, alt: &str, options: &RenderOptions) -> String {
    let mut html = format!("<figure><img src=\"{}\"", escape_html(&image.url));
    if !image.title.is_empty() {
        html.push_str(&format!(" title=\"{}\"", escape_html(&image.title)));
    }
    html.push_str(&format!(" alt=\"{}\"/>", escape_html(alt)));
    if let Some(caption) = options.legend_format.caption(&image.title, alt) {
        html.push_str(&format!("<figcaption>{}</figcaption>", escape_html(caption)));
    }
    html.push_str("</figure>");
    html
}

/// Plain text content of a node's descendants.
fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(literal) => text.push_str(literal),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => text.push_str(&collect_text(child)),
        }
    }
    text
}

/// Writes markdown headings with the `data-heading` marker.
struct TaggedHeadings;

impl HeadingAdapter for TaggedHeadings {
    fn enter(
        &self,
        output: &mut dyn Write,
        heading: &HeadingMeta,
        _sourcepos: Option<Sourcepos>,
    ) -> io::Result<()> {
        write!(output, "<h{} data-heading=\"true\">", heading.level)
    }

    fn exit(&self, output: &mut dyn Write, heading: &HeadingMeta) -> io::Result<()> {
        writeln!(output, "</h{}>", heading.level)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Citations
// ─────────────────────────────────────────────────────────────────────────────

/// Citations collected during one render; a repeated URL keeps its number.
#[derive(Debug, Default)]
struct CitationList {
    entries: Vec<Citation>,
}

impl CitationList {
    fn cite(&mut self, title: &str, url: &str) -> usize {
        if let Some(existing) = self.entries.iter().find(|c| c.url == url) {
            return existing.index;
        }
        let index = self.entries.len() + 1;
        self.entries.push(Citation {
            index,
            title: title.to_string(),
            url: url.to_string(),
        });
        index
    }

    fn into_inner(self) -> Vec<Citation> {
        self.entries
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LegendFormat;

    fn citing() -> RenderOptions {
        RenderOptions {
            cite_as_footnote: true,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn test_headings_are_tagged() {
        let fragment = render("# Hello\n\nWorld", &RenderOptions::default());
        assert!(fragment
            .html
            .contains(r#"<h1 data-heading="true">Hello</h1>"#));
        assert!(fragment.html.contains("<p>World</p>"));
        assert!(fragment.citations.is_empty());
    }

    #[test]
    fn test_raw_html_headings_are_not_tagged() {
        let text = "<h2>Written by hand</h2>\n\n## From markdown\n\nSetext\n---\n";
        let html = render(text, &RenderOptions::default()).html;
        assert!(html.contains("<h2>Written by hand</h2>"));
        assert!(html.contains(r#"<h2 data-heading="true">From markdown</h2>"#));
        assert!(html.contains(r#"<h2 data-heading="true">Setext</h2>"#));
        assert_eq!(html.matches("data-heading").count(), 2);
    }

    #[test]
    fn test_render_is_pure() {
        let renderer = MarkdownRenderer::new(citing());
        let text = "## A [link](https://example.com)\n\n```rust\nlet x = 1;\n```";
        assert_eq!(renderer.render(text), renderer.render(text));
    }

    #[test]
    fn test_reset_changes_output() {
        let mut renderer = MarkdownRenderer::default();
        let text = "```\ncode\n```";
        assert!(!renderer.render(text).html.contains("mac-sign"));
        renderer.reset(RenderOptions {
            mac_style_code_block: true,
            ..RenderOptions::default()
        });
        assert!(renderer.options().mac_style_code_block);
        assert!(renderer.render(text).html.contains("mac-sign"));
    }

    #[test]
    fn test_code_blocks() {
        let options = RenderOptions {
            show_line_numbers: true,
            ..RenderOptions::default()
        };
        let html = render("```rust\nfn main() {}\n```\n\n    indented\n", &options).html;
        assert_eq!(html.matches(r#"<pre class="code__pre hljs">"#).count(), 2);
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains(r#"<code class="language-plaintext">indented</code>"#));
        assert!(html.contains(r#"<span class="line-numbers">"#));
    }

    #[test]
    fn test_image_legend_formats() {
        let text = "![the alt](pic.png \"the title\")";
        let caption = |legend| {
            let options = RenderOptions {
                legend_format: legend,
                ..RenderOptions::default()
            };
            render(text, &options).html
        };

        let html = caption(LegendFormat::TitleAlt);
        assert!(html.contains(r#"<img src="pic.png" title="the title" alt="the alt"/>"#));
        assert!(html.contains("<figcaption>the title</figcaption>"));
        assert!(caption(LegendFormat::Alt).contains("<figcaption>the alt</figcaption>"));
        assert!(!caption(LegendFormat::None).contains("figcaption"));
    }

    #[test]
    fn test_citations_numbered_and_deduplicated() {
        let text = "[one](https://a.example) [two](https://b.example \"B\") [again](https://a.example)";
        let fragment = render(text, &citing());
        assert!(fragment.html.contains("one<sup>[1]</sup>"));
        assert!(fragment.html.contains("two<sup>[2]</sup>"));
        assert!(fragment.html.contains("again<sup>[1]</sup>"));
        assert!(!fragment.html.contains("<a "));
        assert_eq!(
            fragment.citations,
            vec![
                Citation {
                    index: 1,
                    title: "one".into(),
                    url: "https://a.example".into()
                },
                Citation {
                    index: 2,
                    title: "B".into(),
                    url: "https://b.example".into()
                },
            ]
        );
    }

    #[test]
    fn test_links_kept_when_not_citing_or_not_external() {
        let text = "[w](https://mp.weixin.qq.com/s/abc) [local](#top) https://auto.example";
        let fragment = render(text, &citing());
        assert!(fragment.citations.is_empty());
        assert!(fragment.html.contains(r#"<a href="https://mp.weixin.qq.com/s/abc">"#));
        assert!(fragment.html.contains(r##"<a href="#top">"##));

        let plain = render("[x](https://a.example)", &RenderOptions::default());
        assert!(plain.html.contains(r#"<a href="https://a.example">x</a>"#));
        assert!(plain.citations.is_empty());
    }

    #[test]
    fn test_gfm_extensions_and_raw_html() {
        let text = "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done\n\n<span class=\"raw\">kept</span>";
        let html = render(text, &RenderOptions::default()).html;
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains(r#"<span class="raw">kept</span>"#));
    }

    #[test]
    fn test_malformed_markdown_degrades_to_text() {
        let html = render("**unclosed and [broken](", &RenderOptions::default()).html;
        assert!(html.contains("**unclosed and [broken]("));
    }
}
