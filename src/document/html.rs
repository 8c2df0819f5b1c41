// SPDX-License-Identifier: PMPL-1.0-or-later
//! Static HTML host.
//!
//! Parses a page with `scraper`, copies it into an index-addressed arena and
//! runs the cascade from [`super::style`] once up front. The arena keeps the
//! interleaving of text and child elements so `text_content` stays correct
//! after a subtree is detached.

use super::style::{parse_declarations, ComputedStyle, Declaration, Stylesheet};
use super::values::{self, CssColor};
use super::{DocumentAccessor, NodeId, StyleProperty};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::debug;

static STYLE_ELEMENTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("style").expect("valid selector"));

#[derive(Debug, Clone)]
enum Content {
    Text(String),
    Child(usize),
}

#[derive(Debug, Clone)]
struct ElementNode {
    tag: String,
    attributes: Vec<(String, String)>,
    parent: Option<usize>,
    content: Vec<Content>,
    style: ComputedStyle,
    attached: bool,
}

/// A parsed, styled HTML document
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    nodes: Vec<ElementNode>,
    ids: HashMap<String, NodeId>,
    focus_visible: HashSet<NodeId>,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);

        let css: String = html
            .select(&STYLE_ELEMENTS)
            .map(|style| style.text().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        let sheet = Stylesheet::parse(&css);

        let elements: Vec<ElementRef> = html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect();
        let index: HashMap<_, usize> = elements
            .iter()
            .enumerate()
            .map(|(i, element)| (element.id(), i))
            .collect();

        // Matched author declarations per element, tagged for sorting
        let mut matched: Vec<Vec<(super::style::Specificity, usize, &Declaration)>> =
            vec![Vec::new(); elements.len()];
        for (order, rule) in sheet.rules().iter().enumerate() {
            for element in html.select(&rule.selector) {
                if let Some(&i) = index.get(&element.id()) {
                    matched[i].extend(rule.declarations.iter().map(|d| (rule.specificity, order, d)));
                }
            }
        }

        let mut nodes: Vec<ElementNode> = Vec::with_capacity(elements.len());
        for (i, element) in elements.iter().enumerate() {
            let parent = element
                .parent()
                .and_then(|p| index.get(&p.id()).copied());

            let content = element
                .children()
                .filter_map(|child| match child.value() {
                    Node::Text(text) => Some(Content::Text(String::from(&**text))),
                    Node::Element(_) => index.get(&child.id()).map(|&c| Content::Child(c)),
                    _ => None,
                })
                .collect();

            let tag = element.value().name().to_ascii_lowercase();
            let attributes: Vec<(String, String)> = element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
                .collect();

            matched[i].sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
            let author: Vec<&Declaration> = matched[i].iter().map(|m| m.2).collect();
            let inline = element
                .value()
                .attr("style")
                .map(parse_declarations)
                .unwrap_or_default();
            let has_href = element.value().attr("href").is_some();
            let style = ComputedStyle::compute(
                &tag,
                has_href,
                parent.map(|p| &nodes[p].style),
                &author,
                &inline,
            );

            nodes.push(ElementNode {
                tag,
                attributes,
                parent,
                content,
                style,
                attached: true,
            });
        }

        debug!(
            "Parsed document: {} elements, {} style rules",
            nodes.len(),
            sheet.rules().len()
        );

        let mut doc = Self {
            nodes,
            ids: HashMap::new(),
            focus_visible: HashSet::new(),
        };
        doc.rebuild_ids();
        doc
    }

    /// Remove a subtree from the tree. Existing handles into it go stale.
    pub fn detach(&mut self, node: NodeId) {
        let Some(target) = self.nodes.get(node.index()) else {
            return;
        };
        if !target.attached {
            return;
        }
        if let Some(parent) = target.parent {
            self.nodes[parent]
                .content
                .retain(|c| !matches!(c, Content::Child(i) if *i == node.index()));
        }

        let mut stack = vec![node.index()];
        while let Some(i) = stack.pop() {
            self.nodes[i].attached = false;
            self.focus_visible.remove(&NodeId::from_index(i));
            stack.extend(self.child_indices(i));
        }
        self.rebuild_ids();
    }

    /// Flag an element as matching `:focus-visible`
    pub fn mark_focus_visible(&mut self, node: NodeId) {
        if self.is_attached(node) {
            self.focus_visible.insert(node);
        }
    }

    /// First attached `<body>`, if any
    pub fn body(&self) -> Option<NodeId> {
        self.elements_by_tag(&["body"]).into_iter().next()
    }

    fn node(&self, node: NodeId) -> Option<&ElementNode> {
        self.nodes.get(node.index()).filter(|n| n.attached)
    }

    fn child_indices(&self, i: usize) -> Vec<usize> {
        self.nodes[i]
            .content
            .iter()
            .filter_map(|c| match c {
                Content::Child(child) => Some(*child),
                Content::Text(_) => None,
            })
            .collect()
    }

    fn rebuild_ids(&mut self) {
        self.ids.clear();
        for (i, node) in self.nodes.iter().enumerate().filter(|(_, n)| n.attached) {
            if let Some((_, id)) = node.attributes.iter().find(|(name, _)| name == "id") {
                if !id.is_empty() {
                    self.ids.entry(id.clone()).or_insert(NodeId::from_index(i));
                }
            }
        }
    }

    fn collect_text(&self, i: usize, out: &mut String) {
        let mut stack = vec![self.nodes[i].content.iter()];
        while let Some(top) = stack.last_mut() {
            match top.next() {
                Some(Content::Text(text)) => out.push_str(text),
                Some(Content::Child(child)) => stack.push(self.nodes[*child].content.iter()),
                None => {
                    stack.pop();
                }
            }
        }
    }
}

impl DocumentAccessor for HtmlDocument {
    fn elements(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.attached)
            .map(|(i, _)| NodeId::from_index(i))
            .collect()
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.tag.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?
            .attributes
            .iter()
            .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        if self.node(node).is_some() {
            self.collect_text(node.index(), &mut out);
        }
        out
    }

    fn computed_style(&self, node: NodeId, property: StyleProperty) -> Option<String> {
        self.node(node).map(|n| n.style.value(property))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent.map(NodeId::from_index)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        if self.node(node).is_none() {
            return Vec::new();
        }
        self.child_indices(node.index())
            .into_iter()
            .map(NodeId::from_index)
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    fn resolve_color(&self, value: &str) -> Option<String> {
        match values::parse_color(value)? {
            CssColor::Value(color) => Some(color.to_css()),
            CssColor::CurrentColor => None,
        }
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn matches_focus_visible(&self, node: NodeId) -> bool {
        self.focus_visible.contains(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_in_document_order() {
        let doc = HtmlDocument::parse("<html><body><h1>A</h1><p>B <b>C</b></p></body></html>");
        let tags: Vec<&str> = doc
            .elements()
            .into_iter()
            .filter_map(|n| doc.tag_name(n))
            .collect();
        assert_eq!(tags, vec!["html", "head", "body", "h1", "p", "b"]);
    }

    #[test]
    fn test_text_content_after_detach() {
        let mut doc = HtmlDocument::parse(
            r#"<html><body><p id="p">Hello <span id="s">cruel </span>world</p></body></html>"#,
        );
        let p = doc.element_by_id("p").expect("p");
        let span = doc.element_by_id("s").expect("span");
        assert_eq!(doc.text_content(p), "Hello cruel world");

        doc.detach(span);
        assert_eq!(doc.text_content(p), "Hello world");
        assert!(!doc.is_attached(span));
        assert_eq!(doc.element_by_id("s"), None);
        assert_eq!(doc.tag_name(span), None);
    }

    #[test]
    fn test_deeply_nested_text() {
        const DEPTH: usize = 20_000;
        let source = format!(
            "<html><body>{}deep{}</body></html>",
            "<span>".repeat(DEPTH),
            "</span>".repeat(DEPTH)
        );
        let doc = HtmlDocument::parse(&source);
        let body = doc.body().expect("body");
        assert_eq!(doc.text_content(body), "deep");
        assert_eq!(doc.descendants(body).len(), DEPTH);
    }

    #[test]
    fn test_stylesheet_cascade() {
        let doc = HtmlDocument::parse(
            r#"<html><head><style>
                p { color: #777; }
                .dark { background-color: black; color: white; }
                #special { color: red; }
            </style></head>
            <body class="dark"><p id="special" style="font-size: 20px">x</p><p id="plain">y</p></body></html>"#,
        );
        let special = doc.element_by_id("special").expect("special");
        let plain = doc.element_by_id("plain").expect("plain");
        assert_eq!(
            doc.computed_style(special, StyleProperty::Color).as_deref(),
            Some("rgb(255, 0, 0)")
        );
        assert_eq!(
            doc.computed_style(special, StyleProperty::FontSize).as_deref(),
            Some("20px")
        );
        assert_eq!(
            doc.computed_style(plain, StyleProperty::Color).as_deref(),
            Some("rgb(119, 119, 119)")
        );
        assert_eq!(
            doc.computed_style(plain, StyleProperty::BackgroundColor).as_deref(),
            Some("rgba(0, 0, 0, 0)")
        );
        let body = doc.body().expect("body");
        assert_eq!(
            doc.computed_style(body, StyleProperty::BackgroundColor).as_deref(),
            Some("rgb(0, 0, 0)")
        );
    }

    #[test]
    fn test_link_default_color() {
        let doc = HtmlDocument::parse(r#"<html><body><a id="l" href="/x">x</a></body></html>"#);
        let link = doc.element_by_id("l").expect("link");
        assert_eq!(
            doc.computed_style(link, StyleProperty::Color).as_deref(),
            Some("rgb(0, 0, 238)")
        );
    }

    #[test]
    fn test_focus_visible_marking() {
        let mut doc = HtmlDocument::parse(r#"<html><body><button id="b">Go</button></body></html>"#);
        let button = doc.element_by_id("b").expect("button");
        assert!(!doc.matches_focus_visible(button));
        doc.mark_focus_visible(button);
        assert!(doc.matches_focus_visible(button));
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let mut doc = HtmlDocument::parse(
            r#"<html><body><p id="x">one</p><p id="x">two</p></body></html>"#,
        );
        let first = doc.element_by_id("x").expect("first");
        assert_eq!(doc.text_content(first), "one");
        doc.detach(first);
        let second = doc.element_by_id("x").expect("second");
        assert_eq!(doc.text_content(second), "two");
    }
}
