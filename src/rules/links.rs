// SPDX-License-Identifier: PMPL-1.0-or-later
//! Link purpose rule - WCAG 2.4.4 Link Purpose (In Context) (Level A)

use crate::document::{DocumentAccessor, NodeId};
use crate::issues::{Category, IssueSink, IssueTarget, Severity};
use crate::rules::Rule;

/// Link texts that say nothing about the destination
const VAGUE_LINK_TEXT: &[&str] = &["click here", "here", "read more", "more", "link", "learn more"];

const WCAG: &str = "2.4.4";

/// Rule for link text and destinations
pub struct LinksRule;

impl LinksRule {
    /// An `<img alt>` inside the link supplies its accessible name
    fn has_image_alt(doc: &dyn DocumentAccessor, link: NodeId) -> bool {
        doc.descendants(link)
            .into_iter()
            .any(|n| doc.is_tag(n, "img") && doc.has_attribute(n, "alt"))
    }

    fn has_destination(doc: &dyn DocumentAccessor, link: NodeId) -> bool {
        doc.attribute(link, "href")
            .map(str::trim)
            .is_some_and(|href| !href.is_empty() && href != "#")
    }
}

impl Rule for LinksRule {
    fn name(&self) -> &str {
        "Links"
    }

    fn category(&self) -> Category {
        Category::Links
    }

    fn description(&self) -> &str {
        "Checks anchors for accessible text, descriptive wording and a destination (WCAG 2.4.4)"
    }

    fn check(&self, doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        for link in doc.elements_by_tag(&["a"]) {
            let text = doc.text_content(link).trim().to_lowercase();

            if text.is_empty()
                && !Self::has_image_alt(doc, link)
                && !doc.has_value(link, "aria-label")
            {
                sink.add(
                    IssueTarget::Element(link),
                    Category::Links,
                    Severity::Critical,
                    "Empty link",
                    "Link has no accessible text",
                    WCAG,
                );
            } else if VAGUE_LINK_TEXT.contains(&text.as_str()) {
                sink.add(
                    IssueTarget::Element(link),
                    Category::Links,
                    Severity::Major,
                    "Vague link text",
                    format!("\"{}\" doesn't describe the destination", text),
                    WCAG,
                );
            }

            if !Self::has_destination(doc, link)
                && !doc.has_value(link, "role")
                && !doc.has_click_handler(link)
            {
                sink.add(
                    IssueTarget::Element(link),
                    Category::Links,
                    Severity::Minor,
                    "Non-functional link",
                    "Link has no destination",
                    WCAG,
                );
            }
        }
    }
}
