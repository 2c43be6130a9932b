//! Paste-compatible output
//!
//! Publishing hosts strip stylesheets and do not understand CSS custom
//! properties, so before copying or exporting, a disposable styled copy of
//! the output is flattened: every element's computed text and background
//! color is written back as a literal inline style.
//!
//! # Architecture
//!
//! The transform itself (`flatten`) only needs a tree of `StyledNode`s. The
//! `StyledTree` in this module provides one: it parses the rendered HTML with
//! kuchikiki, mounts it under an `#output` container and runs a small color
//! cascade against a resolved `StyleDefinition`.
//!
//! ```ignore
//! let mut tree = StyledTree::mount(&html, &definition);
//! flatten(Some(tree.root_mut()), "#0F4C81");
//! let inlined = tree.inner_html();
//! ```
//!
//! # Files
//!
//! - `dom.rs` - Fragment parsing, serialization and attribute access
//! - `color.rs` - Color normalization and transparency checks
//! - `cascade.rs` - Selector matching and computed colors

mod cascade;
pub mod color;
pub mod dom;

pub use cascade::resolve_variables;

use crate::theme::css::parse_declarations;
use crate::theme::{StyleDefinition, PRIMARY_COLOR_VAR};
use cascade::Cascade;
use color::is_transparent;
use kuchikiki::NodeRef;
use log::debug;
use regex::{NoExpand, Regex};
use std::sync::OnceLock;

/// Id of the container the fragment is mounted in.
pub const OUTPUT_ID: &str = "output";

// ─────────────────────────────────────────────────────────────────────────────
// Styled Node
// ─────────────────────────────────────────────────────────────────────────────

/// A node of a realized, styled tree.
pub trait StyledNode {
    /// Effective text color, if the node has one.
    fn computed_color(&self) -> Option<&str>;

    /// Effective background color, if the node has one.
    fn computed_background(&self) -> Option<&str>;

    /// The raw inline `style` attribute.
    fn inline_style(&self) -> Option<String>;

    /// Set one inline style property, keeping the others.
    fn set_inline_style(&mut self, property: &str, value: &str);

    fn children_mut(&mut self) -> Vec<&mut Self>;
}

/// An element of a mounted tree together with its computed colors.
#[derive(Debug)]
pub struct StyledElement {
    node: NodeRef,
    color: Option<String>,
    background: Option<String>,
    children: Vec<StyledElement>,
}

impl StyledElement {
    pub(crate) fn new(
        node: NodeRef,
        color: Option<String>,
        background: Option<String>,
        children: Vec<StyledElement>,
    ) -> Self {
        Self {
            node,
            color,
            background,
            children,
        }
    }

    /// The underlying DOM node.
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    pub fn tag(&self) -> String {
        dom::tag_name(&self.node).unwrap_or_default()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        dom::attribute(&self.node, name)
    }

    /// Child elements, in document order.
    pub fn children(&self) -> &[StyledElement] {
        &self.children
    }
}

impl StyledNode for StyledElement {
    fn computed_color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    fn computed_background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    fn inline_style(&self) -> Option<String> {
        self.attribute("style")
    }

    fn set_inline_style(&mut self, property: &str, value: &str) {
        dom::set_style_property(&self.node, property, value);
    }

    fn children_mut(&mut self) -> Vec<&mut Self> {
        self.children.iter_mut().collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Flatten
// ─────────────────────────────────────────────────────────────────────────────

fn primary_var_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"var\({}[^)]*\)", regex::escape(PRIMARY_COLOR_VAR)))
            .expect("primary color var pattern is valid")
    })
}

/// Inline the computed colors of `root` and all its descendants.
///
/// Transparent and missing colors are left alone. References to the primary
/// color variable that remain in inline styles are replaced by
/// `primary_color`. A missing container is a no-op.
pub fn flatten<N: StyledNode>(root: Option<&mut N>, primary_color: &str) {
    let Some(root) = root else {
        debug!("Flatten skipped: no output container");
        return;
    };
    flatten_node(root, primary_color);
}

fn flatten_node<N: StyledNode>(node: &mut N, primary_color: &str) {
    let color = node
        .computed_color()
        .filter(|c| !is_transparent(c))
        .map(str::to_string);
    let background = node
        .computed_background()
        .filter(|c| !is_transparent(c))
        .map(str::to_string);
    if let Some(color) = color {
        node.set_inline_style("color", &color);
    }
    if let Some(background) = background {
        node.set_inline_style("background-color", &background);
    }

    let pending: Vec<(String, String)> = node
        .inline_style()
        .map(|style| parse_declarations(&style))
        .unwrap_or_default()
        .into_iter()
        .filter(|d| primary_var_regex().is_match(&d.value))
        .map(|d| {
            let value = primary_var_regex()
                .replace_all(&d.value, NoExpand(primary_color))
                .into_owned();
            (d.property, value)
        })
        .collect();
    for (property, value) in pending {
        node.set_inline_style(&property, &value);
    }

    for child in node.children_mut() {
        flatten_node(child, primary_color);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Styled Tree
// ─────────────────────────────────────────────────────────────────────────────

/// A rendered fragment mounted in an `#output` container with computed colors.
#[derive(Debug)]
pub struct StyledTree {
    root: StyledElement,
}

impl StyledTree {
    /// Parse `html` into a fresh container and cascade `definition` over it.
    pub fn mount(html: &str, definition: &StyleDefinition) -> Self {
        let container = dom::parse_fragment(html, "section", &[("id", OUTPUT_ID)]);
        let root = Cascade::new(definition).apply(&container);
        Self { root }
    }

    /// The `#output` container.
    pub fn root(&self) -> &StyledElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut StyledElement {
        &mut self.root
    }

    /// The mounted fragment, without the container.
    pub fn inner_html(&self) -> String {
        dom::inner_html(self.root.node())
    }
}

/// Mount `html`, flatten it and serialize the result.
pub fn flatten_html(html: &str, definition: &StyleDefinition, primary_color: &str) -> String {
    let mut tree = StyledTree::mount(html, definition);
    flatten(Some(tree.root_mut()), primary_color);
    tree.inner_html()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
