// SPDX-License-Identifier: PMPL-1.0-or-later
//! Focus indicator rule - WCAG 2.4.7 Focus Visible (Level AA)
//!
//! A static document cannot be focused, so the check is a heuristic over
//! computed style. The heuristic is a pluggable [`FocusHeuristic`] so hosts
//! that can probe real focus state may supply their own.

use crate::document::{DocumentAccessor, NodeId, StyleProperty};
use crate::issues::{Category, IssueSink, IssueTarget, Severity};
use crate::rules::Rule;

const WCAG: &str = "2.4.7";

/// Decides whether a focusable element appears to lack a focus indicator
pub trait FocusHeuristic: Send + Sync {
    fn name(&self) -> &str;

    fn lacks_indicator(&self, doc: &dyn DocumentAccessor, node: NodeId) -> bool;
}

/// Flags elements whose computed outline is `none` with width `0px` and
/// that are not currently `:focus-visible`.
///
/// Known error modes:
/// - false positives for elements that signal focus with `box-shadow`,
///   `border` or background changes instead of an outline
/// - false negatives for elements whose outline is removed only in a
///   `:focus` rule, which the static cascade never applies
pub struct StaticOutlineHeuristic;

impl FocusHeuristic for StaticOutlineHeuristic {
    fn name(&self) -> &str {
        "static-outline"
    }

    fn lacks_indicator(&self, doc: &dyn DocumentAccessor, node: NodeId) -> bool {
        doc.computed_style(node, StyleProperty::OutlineStyle).as_deref() == Some("none")
            && doc.computed_style(node, StyleProperty::OutlineWidth).as_deref() == Some("0px")
            && !doc.matches_focus_visible(node)
    }
}

/// Rule for visible focus indicators
pub struct FocusRule {
    heuristic: Box<dyn FocusHeuristic>,
}

impl Default for FocusRule {
    fn default() -> Self {
        Self::with_heuristic(Box::new(StaticOutlineHeuristic))
    }
}

impl FocusRule {
    pub fn with_heuristic(heuristic: Box<dyn FocusHeuristic>) -> Self {
        Self { heuristic }
    }

    pub fn heuristic(&self) -> &dyn FocusHeuristic {
        self.heuristic.as_ref()
    }
}

impl Rule for FocusRule {
    fn name(&self) -> &str {
        "Focus"
    }

    fn category(&self) -> Category {
        Category::Focus
    }

    fn description(&self) -> &str {
        "Flags focusable elements that may lack a visible focus indicator (WCAG 2.4.7)"
    }

    fn check(&self, doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        for el in doc.elements() {
            if !doc.is_focus_candidate(el) {
                continue;
            }
            if self.heuristic.lacks_indicator(doc, el) {
                sink.add(
                    IssueTarget::Element(el),
                    Category::Focus,
                    Severity::Major,
                    "Possible missing focus indicator",
                    "Element may lack visible focus indicator",
                    WCAG,
                );
            }
        }
    }
}
