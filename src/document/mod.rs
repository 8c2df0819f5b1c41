// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document accessor - the read-only view of a rendered tree that rules consume.
//!
//! The engine never owns host nodes. It addresses them through opaque
//! [`NodeId`]s and asks the host for everything else: tag names, attributes,
//! text, computed style, tree structure and id lookup. The provided methods
//! on [`DocumentAccessor`] build the higher-level queries (closest ancestor,
//! label association, effective tab index) out of those primitives so every
//! host gets identical semantics.
//!
//! [`html::HtmlDocument`] is the bundled host for static HTML source.

pub mod html;
pub mod style;
pub mod values;

use serde::Serialize;

/// Opaque handle to an element in the host tree.
///
/// Handles are only meaningful for the document that issued them and may go
/// stale when the host tree changes; check [`DocumentAccessor::is_attached`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Computed style properties the rules read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Color,
    BackgroundColor,
    FontSize,
    FontWeight,
    OutlineStyle,
    OutlineWidth,
}

impl StyleProperty {
    /// CSS property name
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProperty::Color => "color",
            StyleProperty::BackgroundColor => "background-color",
            StyleProperty::FontSize => "font-size",
            StyleProperty::FontWeight => "font-weight",
            StyleProperty::OutlineStyle => "outline-style",
            StyleProperty::OutlineWidth => "outline-width",
        }
    }
}

/// Elements that take part in sequential focus navigation without a tabindex
pub const FOCUSABLE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

/// Elements whose tabIndex defaults to 0
const DEFAULT_TABBABLE_TAGS: &[&str] = &[
    "a", "area", "button", "iframe", "input", "select", "summary", "textarea",
];

/// Read-only queries over a rendered document.
pub trait DocumentAccessor {
    /// All attached elements in document order
    fn elements(&self) -> Vec<NodeId>;

    /// Lowercase tag name
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    /// Raw attribute value
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Concatenated text of the element and its descendants
    fn text_content(&self, node: NodeId) -> String;

    /// Serialized computed value of a style property
    fn computed_style(&self, node: NodeId, property: StyleProperty) -> Option<String>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Element children in document order
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Document-wide id lookup
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Resolve any CSS color syntax to `rgb(...)`/`rgba(...)` form
    fn resolve_color(&self, value: &str) -> Option<String>;

    /// Whether the node is still part of the tree
    fn is_attached(&self, node: NodeId) -> bool;

    /// Whether the element currently matches `:focus-visible`
    fn matches_focus_visible(&self, _node: NodeId) -> bool {
        false
    }

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Attribute is present and non-empty
    fn has_value(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some_and(|v| !v.is_empty())
    }

    fn is_tag(&self, node: NodeId, tag: &str) -> bool {
        self.tag_name(node) == Some(tag)
    }

    /// Elements whose tag is one of `tags`, in document order
    fn elements_by_tag(&self, tags: &[&str]) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|&n| self.tag_name(n).is_some_and(|t| tags.contains(&t)))
            .collect()
    }

    /// Elements carrying attribute `name`, in document order
    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|&n| self.has_attribute(n, name))
            .collect()
    }

    /// All descendant elements in document order (excluding `node`)
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).into_iter().rev());
        }
        out
    }

    /// Nearest inclusive ancestor with the given tag
    fn closest(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.is_tag(n, tag) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    /// `a, button, input, select, textarea, [tabindex]`
    fn is_focus_candidate(&self, node: NodeId) -> bool {
        self.tag_name(node).is_some_and(|t| FOCUSABLE_TAGS.contains(&t))
            || self.has_attribute(node, "tabindex")
    }

    /// Effective tab index: the parsed `tabindex`, else 0 for natively
    /// tabbable elements and -1 for everything else
    fn tab_index(&self, node: NodeId) -> i64 {
        if let Some(value) = self.attribute(node, "tabindex").and_then(values::parse_integer) {
            return value;
        }
        match self.tag_name(node) {
            Some(tag) if DEFAULT_TABBABLE_TAGS.contains(&tag) => 0,
            _ => -1,
        }
    }

    /// Inline click handler present, even an empty one
    fn has_click_handler(&self, node: NodeId) -> bool {
        self.has_attribute(node, "onclick")
    }

    /// Elements a `<label>` can be associated with
    fn is_labelable(&self, node: NodeId) -> bool {
        match self.tag_name(node) {
            Some("input") => !self
                .attribute(node, "type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("hidden")),
            Some("button" | "meter" | "output" | "progress" | "select" | "textarea") => true,
            _ => false,
        }
    }

    /// The control a `<label>` element labels
    fn labeled_control(&self, label: NodeId) -> Option<NodeId> {
        match self.attribute(label, "for") {
            Some(target) => self
                .element_by_id(target)
                .filter(|&control| self.is_labelable(control)),
            None => self
                .descendants(label)
                .into_iter()
                .find(|&control| self.is_labelable(control)),
        }
    }

    /// `<label>` elements associated with `node`
    fn labels(&self, node: NodeId) -> Vec<NodeId> {
        if !self.is_labelable(node) {
            return Vec::new();
        }
        self.elements_by_tag(&["label"])
            .into_iter()
            .filter(|&label| self.labeled_control(label) == Some(node))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::html::HtmlDocument;
    use super::*;

    fn doc(body: &str) -> HtmlDocument {
        HtmlDocument::parse(&format!("<html><body>{}</body></html>", body))
    }

    #[test]
    fn test_closest_and_descendants() {
        let d = doc(r#"<fieldset id="f"><div><input id="i" type="radio"></div></fieldset>"#);
        let input = d.element_by_id("i").expect("input");
        let fieldset = d.element_by_id("f").expect("fieldset");
        assert_eq!(d.closest(input, "fieldset"), Some(fieldset));
        assert_eq!(d.closest(fieldset, "div"), None);
        assert_eq!(d.descendants(fieldset).len(), 2);
    }

    #[test]
    fn test_tab_index_defaults() {
        let d = doc(r#"<a id="a">x</a><div id="d">x</div><span id="s" tabindex="3px">x</span><button id="b" tabindex="-1">x</button>"#);
        assert_eq!(d.tab_index(d.element_by_id("a").expect("a")), 0);
        assert_eq!(d.tab_index(d.element_by_id("d").expect("div")), -1);
        assert_eq!(d.tab_index(d.element_by_id("s").expect("span")), 3);
        assert_eq!(d.tab_index(d.element_by_id("b").expect("button")), -1);
    }

    #[test]
    fn test_label_association() {
        let d = doc(r#"
            <label for="email">Email</label><input id="email" type="email">
            <label>Name <input id="name" type="text"></label>
            <label for="missing">Ghost</label><input id="orphan" type="text">
            <label>Hidden <input id="hidden" type="hidden"></label>
        "#);
        assert_eq!(d.labels(d.element_by_id("email").expect("email")).len(), 1);
        assert_eq!(d.labels(d.element_by_id("name").expect("name")).len(), 1);
        assert!(d.labels(d.element_by_id("orphan").expect("orphan")).is_empty());
        assert!(d.labels(d.element_by_id("hidden").expect("hidden")).is_empty());
    }

    #[test]
    fn test_empty_onclick_is_a_handler() {
        let d = doc(r#"<div id="e" onclick="">x</div><div id="n">x</div>"#);
        assert!(d.has_click_handler(d.element_by_id("e").expect("empty")));
        assert!(!d.has_click_handler(d.element_by_id("n").expect("none")));
    }

    #[test]
    fn test_has_value_treats_empty_as_absent() {
        let d = doc(r#"<div id="x" role="" title="t">x</div>"#);
        let x = d.element_by_id("x").expect("div");
        assert!(d.has_attribute(x, "role"));
        assert!(!d.has_value(x, "role"));
        assert!(d.has_value(x, "title"));
    }
}
