//! A simple cascade for colors
//!
//! Computes each element's `color` (inherited) and background color (not
//! inherited) from a `StyleDefinition`. Supported selectors are compounds of
//! a type, an id and classes, joined by descendant combinators; rules using
//! anything else (child or sibling combinators, pseudo-classes, attribute
//! selectors) are skipped. The winner is the declaration with the highest
//! specificity, then the latest in source order; inline styles beat both.

use super::color::{background_shorthand_color, normalize_color};
use super::{dom, StyledElement};
use crate::theme::css::parse_declarations;
use crate::theme::{Declaration, StyleDefinition};
use kuchikiki::NodeRef;
use log::debug;

/// (ids, classes, types)
type Specificity = (u32, u32, u32);

/// Declaration ranking: specificity, then rule order, then position in rule.
type Rank = (Specificity, usize, usize);

// ─────────────────────────────────────────────────────────────────────────────
// Selectors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(text: &str) -> Option<Self> {
        let mut compound = Compound::default();
        let mut rest = text;

        let tag_len = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_len > 0 {
            let tag = &rest[..tag_len];
            if !tag.chars().all(is_name_char) {
                return None;
            }
            compound.tag = Some(tag.to_ascii_lowercase());
            rest = &rest[tag_len..];
        }

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let len = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..len];
            if name.is_empty() || !name.chars().all(is_name_char) {
                return None;
            }
            match marker {
                '.' => compound.classes.push(name.to_string()),
                '#' => compound.id = Some(name.to_string()),
                _ => return None,
            }
            rest = &body[len..];
        }
        Some(compound)
    }

    fn specificity(&self) -> Specificity {
        (
            u32::from(self.id.is_some()),
            self.classes.len() as u32,
            u32::from(self.tag.is_some()),
        )
    }

    fn matches(&self, element: &ElementKey) -> bool {
        self.tag.as_ref().map_or(true, |t| *t == element.tag)
            && self.id.as_ref().map_or(true, |id| Some(id) == element.id.as_ref())
            && self.classes.iter().all(|c| element.classes.contains(c))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Compounds joined by descendant combinators; the last one is the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    fn parse(text: &str) -> Option<Self> {
        let compounds = text
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Option<Vec<_>>>()?;
        if compounds.is_empty() {
            None
        } else {
            Some(Self { compounds })
        }
    }

    fn specificity(&self) -> Specificity {
        self.compounds.iter().fold((0, 0, 0), |acc, c| {
            let s = c.specificity();
            (acc.0 + s.0, acc.1 + s.1, acc.2 + s.2)
        })
    }

    /// Match against an element whose ancestors are `ancestors`, outermost first.
    fn matches(&self, element: &ElementKey, ancestors: &[ElementKey]) -> bool {
        let Some((subject, rest)) = self.compounds.split_last() else {
            return false;
        };
        if !subject.matches(element) {
            return false;
        }
        let mut remaining = rest.iter().rev().peekable();
        for ancestor in ancestors.iter().rev() {
            match remaining.peek() {
                Some(compound) if compound.matches(ancestor) => {
                    remaining.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        remaining.peek().is_none()
    }
}

/// What selectors can see of an element.
#[derive(Debug, Clone)]
struct ElementKey {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
}

impl ElementKey {
    fn of(node: &NodeRef) -> Self {
        Self {
            tag: dom::tag_name(node).unwrap_or_default(),
            id: dom::attribute(node, "id"),
            classes: dom::attribute(node, "class")
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cascade
// ─────────────────────────────────────────────────────────────────────────────

/// One selector of one rule with the declarations we care about.
struct Candidate {
    selector: Selector,
    specificity: Specificity,
    order: usize,
    declarations: Vec<Declaration>,
}

fn is_color_property(property: &str) -> bool {
    matches!(property, "color" | "background" | "background-color")
}

/// Computes colors for a whole tree.
pub(crate) struct Cascade<'a> {
    candidates: Vec<Candidate>,
    definition: &'a StyleDefinition,
}

impl<'a> Cascade<'a> {
    pub(crate) fn new(definition: &'a StyleDefinition) -> Self {
        let mut candidates = Vec::new();
        let mut skipped = 0;
        for (order, rule) in definition.rules.iter().enumerate() {
            let declarations: Vec<Declaration> = rule
                .declarations
                .iter()
                .filter(|d| is_color_property(&d.property))
                .cloned()
                .collect();
            if declarations.is_empty() {
                continue;
            }
            for text in rule.selectors() {
                match Selector::parse(text) {
                    Some(selector) => candidates.push(Candidate {
                        specificity: selector.specificity(),
                        selector,
                        order,
                        declarations: declarations.clone(),
                    }),
                    None => skipped += 1,
                }
            }
        }
        if skipped > 0 {
            debug!("Cascade skipped {} unsupported selectors", skipped);
        }
        Self {
            candidates,
            definition,
        }
    }

    /// Compute colors for `root` and all its descendant elements.
    pub(crate) fn apply(&self, root: &NodeRef) -> StyledElement {
        let mut ancestors = Vec::new();
        self.apply_element(root, &mut ancestors, None, None)
    }

    fn apply_element(
        &self,
        node: &NodeRef,
        ancestors: &mut Vec<ElementKey>,
        parent_color: Option<&str>,
        parent_background: Option<&str>,
    ) -> StyledElement {
        let key = ElementKey::of(node);
        let mut color: Option<(Rank, Declaration)> = None;
        let mut background: Option<(Rank, Declaration)> = None;

        for candidate in &self.candidates {
            if !candidate.selector.matches(&key, ancestors) {
                continue;
            }
            for (position, declaration) in candidate.declarations.iter().enumerate() {
                let rank = (candidate.specificity, candidate.order, position);
                let slot = if declaration.property == "color" {
                    &mut color
                } else {
                    &mut background
                };
                if slot.as_ref().map_or(true, |(best, _)| rank >= *best) {
                    *slot = Some((rank, declaration.clone()));
                }
            }
        }

        let mut color = color.map(|(_, d)| d);
        let mut background = background.map(|(_, d)| d);
        if let Some(style) = dom::attribute(node, "style") {
            for declaration in parse_declarations(&style) {
                match declaration.property.as_str() {
                    "color" => color = Some(declaration),
                    "background" | "background-color" => background = Some(declaration),
                    _ => {}
                }
            }
        }

        let own_color = match color {
            Some(d) => self.computed_color(&d.value).or(parent_color.map(str::to_string)),
            None => parent_color.map(str::to_string),
        };
        let own_background = background.and_then(|d| {
            let value = self.resolve_variables(&d.value);
            if value.trim().eq_ignore_ascii_case("inherit") {
                return parent_background.map(str::to_string);
            }
            if d.property == "background" {
                background_shorthand_color(&value)
            } else {
                normalize_color(&value)
            }
        });

        ancestors.push(key);
        let mut children = Vec::new();
        for child in dom::child_elements(node) {
            children.push(self.apply_element(
                &child,
                ancestors,
                own_color.as_deref(),
                own_background.as_deref(),
            ));
        }
        ancestors.pop();

        StyledElement::new(node.clone(), own_color, own_background, children)
    }

    /// `None` means "inherit".
    fn computed_color(&self, value: &str) -> Option<String> {
        normalize_color(&self.resolve_variables(value))
    }

    fn resolve_variables(&self, value: &str) -> String {
        resolve_variables(value, &|name| {
            self.definition.variable(name).map(str::to_string)
        })
    }
}

/// Substitute `var(--name)` and `var(--name, fallback)` references.
///
/// Unknown variables without a fallback resolve to an empty string.
pub fn resolve_variables(value: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("var(") {
        out.push_str(&rest[..start]);
        let inner_start = start + 4;
        let mut depth = 1usize;
        let mut end = rest.len();
        for (i, ch) in rest[inner_start..].char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = inner_start + i;
                        break;
                    }
                }
                _ => {}
            }
        }
        let inner = &rest[inner_start..end];
        let (name, fallback) = match inner.split_once(',') {
            Some((name, fallback)) => (name.trim(), Some(fallback.trim())),
            None => (inner.trim(), None),
        };
        let replacement = lookup(name)
            .or_else(|| fallback.map(|f| resolve_variables(f, lookup)))
            .unwrap_or_default();
        out.push_str(&replacement);
        rest = rest.get(end + 1..).unwrap_or("");
    }
    out.push_str(rest);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
