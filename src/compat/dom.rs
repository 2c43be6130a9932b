//! DOM helpers over kuchikiki
//!
//! Fragments go through html5ever's tree builder, so implicit end tags,
//! void elements and misnested markup come out the way a browser builds
//! them. Each fragment is moved into a container element of the caller's
//! choosing, which is what the cascade and the heading pass walk.

use crate::string_utils::escape_html;
use crate::theme::css::parse_declarations;
use crate::theme::Declaration;
use kuchikiki::traits::TendrilSink;
use kuchikiki::NodeRef;
use log::warn;

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse `html` as the content of a new `<tag attributes…>` element.
///
/// The returned container is detached from the scratch document it was
/// parsed in. Parsing never fails; malformed markup is repaired.
pub fn parse_fragment(html: &str, tag: &str, attributes: &[(&str, &str)]) -> NodeRef {
    let mut open = format!("<{}", tag);
    for (name, value) in attributes {
        open.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }
    let document = kuchikiki::parse_html().one(format!(
        "<!DOCTYPE html><html><head></head><body>{}></{}>{}</body></html>",
        open, tag, html
    ));

    // The container is the first element of an otherwise empty document
    let container = match document.select_first(tag) {
        Ok(found) => found.as_node().clone(),
        Err(()) => {
            warn!("Container <{}> missing after parse, using the document", tag);
            return document;
        }
    };
    let fragment: Vec<NodeRef> = container.following_siblings().collect();
    for node in fragment {
        container.append(node);
    }
    container.detach();
    container
}

// ─────────────────────────────────────────────────────────────────────────────
// Serialization
// ─────────────────────────────────────────────────────────────────────────────

/// Serialize the children of `node`.
pub fn inner_html(node: &NodeRef) -> String {
    let mut out = Vec::new();
    for child in node.children() {
        if let Err(e) = child.serialize(&mut out) {
            warn!("Failed to serialize node: {}", e);
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Serialize `node` itself.
pub fn outer_html(node: &NodeRef) -> String {
    let mut out = Vec::new();
    if let Err(e) = node.serialize(&mut out) {
        warn!("Failed to serialize node: {}", e);
    }
    String::from_utf8_lossy(&out).into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Element Access
// ─────────────────────────────────────────────────────────────────────────────

/// Lowercase tag name, `None` for text and comments.
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.as_element().map(|element| element.name.local.to_string())
}

pub fn attribute(node: &NodeRef, name: &str) -> Option<String> {
    let element = node.as_element()?;
    let attributes = element.attributes.borrow();
    attributes.get(name).map(str::to_string)
}

/// Set an attribute; no-op on non-elements.
pub fn set_attribute(node: &NodeRef, name: &str, value: &str) {
    if let Some(element) = node.as_element() {
        element
            .attributes
            .borrow_mut()
            .insert(name, value.to_string());
    }
}

/// Child elements, skipping text and comments.
pub fn child_elements(node: &NodeRef) -> impl Iterator<Item = NodeRef> {
    node.children().filter(|child| child.as_element().is_some())
}

/// Set one property in the `style` attribute, keeping the others.
pub fn set_style_property(node: &NodeRef, property: &str, value: &str) {
    let mut declarations = parse_declarations(&attribute(node, "style").unwrap_or_default());
    match declarations.iter_mut().find(|d| d.property == property) {
        Some(existing) => existing.value = value.to_string(),
        None => declarations.push(Declaration::new(property, value)),
    }
    let style = declarations
        .iter()
        .map(|d| format!("{}: {}", d.property, d.value))
        .collect::<Vec<_>>()
        .join("; ");
    set_attribute(node, "style", &format!("{};", style));
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
