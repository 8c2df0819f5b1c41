// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast rule - WCAG 1.4.3 Contrast (Minimum) (Level AA)
//!
//! Compares each text element's computed foreground against its own computed
//! background. Elements whose colors do not resolve to an extractable triple
//! (a transparent background, a gradient) are skipped.
//!
//! Thresholds:
//! - Normal text: 4.5:1
//! - Large text (>= 24px, or >= 18.66px bold): 3:1

use crate::color::{contrast_ratio, parse_color};
use crate::document::values::{parse_integer, parse_number_prefix};
use crate::document::{DocumentAccessor, NodeId, StyleProperty};
use crate::issues::{Category, IssueSink, IssueTarget, Severity};
use crate::rules::Rule;
use std::collections::HashSet;
use tracing::trace;

/// Elements whose text is measured
const TEXT_TAGS: &[&str] = &[
    "p", "span", "a", "li", "td", "th", "label", "h1", "h2", "h3", "h4", "h5", "h6",
];

const AA_NORMAL: f64 = 4.5;
const AA_LARGE: f64 = 3.0;
const LARGE_TEXT_PX: f64 = 24.0;
const LARGE_BOLD_TEXT_PX: f64 = 18.66;
const BOLD_WEIGHT: i64 = 700;

const WCAG: &str = "1.4.3";

/// Rule for text contrast
pub struct ContrastRule;

/// Minimum ratio for text of the given computed size and weight
pub fn minimum_ratio(font_size_px: f64, font_weight: i64) -> f64 {
    let large = font_size_px >= LARGE_TEXT_PX
        || (font_size_px >= LARGE_BOLD_TEXT_PX && font_weight >= BOLD_WEIGHT);
    if large {
        AA_LARGE
    } else {
        AA_NORMAL
    }
}

impl ContrastRule {
    fn measure(doc: &dyn DocumentAccessor, el: NodeId) -> Option<(f64, f64)> {
        let fg = doc
            .computed_style(el, StyleProperty::Color)
            .and_then(|value| parse_color(doc, &value));
        let bg = doc
            .computed_style(el, StyleProperty::BackgroundColor)
            .and_then(|value| parse_color(doc, &value));
        let (Some(fg), Some(bg)) = (fg, bg) else {
            trace!("Skipping {:?}: colors did not resolve", el);
            return None;
        };

        let font_size = doc
            .computed_style(el, StyleProperty::FontSize)
            .and_then(|v| parse_number_prefix(&v))
            .unwrap_or(16.0);
        let font_weight = doc
            .computed_style(el, StyleProperty::FontWeight)
            .and_then(|v| parse_integer(&v))
            .unwrap_or(400);

        Some((contrast_ratio(fg, bg), minimum_ratio(font_size, font_weight)))
    }
}

impl Rule for ContrastRule {
    fn name(&self) -> &str {
        "Contrast"
    }

    fn category(&self) -> Category {
        Category::Contrast
    }

    fn description(&self) -> &str {
        "Checks computed text and background colors against AA thresholds (WCAG 1.4.3)"
    }

    fn check(&self, doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        let mut checked: HashSet<NodeId> = HashSet::new();

        for el in doc.elements_by_tag(TEXT_TAGS) {
            if checked.contains(&el) || doc.text_content(el).trim().is_empty() {
                continue;
            }
            let Some((ratio, min)) = Self::measure(doc, el) else {
                continue;
            };

            if ratio < min && ratio > 1.0 {
                sink.add(
                    IssueTarget::Element(el),
                    Category::Contrast,
                    Severity::Critical,
                    "Insufficient contrast",
                    format!("Ratio: {:.2}:1 (min: {}:1)", ratio, min),
                    WCAG,
                );
                checked.insert(el);
            }
        }
    }
}
