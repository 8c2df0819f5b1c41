// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard access rule - WCAG 2.1.1 Keyboard (Level A), 2.4.3 Focus Order (Level A)

use crate::document::values::parse_integer;
use crate::document::{DocumentAccessor, NodeId, FOCUSABLE_TAGS};
use crate::issues::{Category, IssueSink, IssueTarget, Severity};
use crate::rules::Rule;

/// Event handler attributes that only fire for pointer users
const MOUSE_ONLY_EVENTS: &[&str] = &["onmouseover", "onmouseout", "onmouseenter", "onmouseleave"];

/// Rule for keyboard operability
pub struct KeyboardRule;

impl KeyboardRule {
    fn check_positive_tabindex(doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        for el in doc.elements_with_attribute("tabindex") {
            let positive = doc
                .attribute(el, "tabindex")
                .and_then(parse_integer)
                .is_some_and(|value| value > 0);
            if positive {
                sink.add(
                    IssueTarget::Element(el),
                    Category::Keyboard,
                    Severity::Minor,
                    "Positive tabindex",
                    "Positive tabindex disrupts natural tab order",
                    "2.4.3",
                );
            }
        }
    }

    fn is_keyboard_reachable(doc: &dyn DocumentAccessor, el: NodeId) -> bool {
        doc.tag_name(el).is_some_and(|tag| FOCUSABLE_TAGS.contains(&tag))
            || doc.has_value(el, "tabindex")
            || doc.has_value(el, "role")
    }

    fn check_click_handlers(doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        for el in doc.elements_with_attribute("onclick") {
            if Self::is_keyboard_reachable(doc, el) {
                continue;
            }
            sink.add(
                IssueTarget::Element(el),
                Category::Keyboard,
                Severity::Major,
                "Click without keyboard",
                "Element has onclick but no keyboard access",
                "2.1.1",
            );
        }
    }

    fn check_mouse_only(doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        for event in MOUSE_ONLY_EVENTS {
            for el in doc.elements_with_attribute(event) {
                if doc.has_value(el, "onfocus") || doc.has_value(el, "onblur") {
                    continue;
                }
                sink.add(
                    IssueTarget::Element(el),
                    Category::Keyboard,
                    Severity::Minor,
                    "Mouse-only interaction",
                    format!("Has {} without keyboard equivalent", event),
                    "2.1.1",
                );
            }
        }
    }
}

impl Rule for KeyboardRule {
    fn name(&self) -> &str {
        "Keyboard"
    }

    fn category(&self) -> Category {
        Category::Keyboard
    }

    fn description(&self) -> &str {
        "Checks tab order, click handlers and mouse-only events (WCAG 2.1.1, 2.4.3)"
    }

    fn check(&self, doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        Self::check_positive_tabindex(doc, sink);
        Self::check_click_handlers(doc, sink);
        Self::check_mouse_only(doc, sink);
    }
}
