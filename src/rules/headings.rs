// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading structure rule - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! Scans `h1`..`h6` in document order. Levels may go down freely but must
//! not skip on the way up, headings need text, and a page has exactly one
//! `h1`.

use crate::document::DocumentAccessor;
use crate::issues::{Category, IssueSink, IssueTarget, Severity};
use crate::rules::Rule;

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

const WCAG: &str = "1.3.1";

/// Rule for heading hierarchy
pub struct HeadingsRule;

fn heading_level(tag: &str) -> Option<u8> {
    match tag.as_bytes() {
        [b'h', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}

impl Rule for HeadingsRule {
    fn name(&self) -> &str {
        "Headings"
    }

    fn category(&self) -> Category {
        Category::Headings
    }

    fn description(&self) -> &str {
        "Checks heading order, empty headings and the page's h1 (WCAG 1.3.1)"
    }

    fn check(&self, doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        let mut prev_level = 0u8;
        let mut h1_count = 0usize;

        for heading in doc.elements_by_tag(HEADING_TAGS) {
            let Some(level) = doc.tag_name(heading).and_then(heading_level) else {
                continue;
            };
            if level == 1 {
                h1_count += 1;
            }

            if prev_level > 0 && level > prev_level + 1 {
                sink.add(
                    IssueTarget::Element(heading),
                    Category::Headings,
                    Severity::Major,
                    "Skipped heading level",
                    format!("Jumped from h{} to h{}", prev_level, level),
                    WCAG,
                );
            }

            if doc.text_content(heading).trim().is_empty() {
                sink.add(
                    IssueTarget::Element(heading),
                    Category::Headings,
                    Severity::Major,
                    "Empty heading",
                    "Heading has no text content",
                    WCAG,
                );
            }

            prev_level = level;
        }

        match h1_count {
            0 => {
                sink.add(
                    IssueTarget::Document,
                    Category::Headings,
                    Severity::Major,
                    "Missing h1",
                    "Page lacks a main heading (h1)",
                    WCAG,
                );
            }
            1 => {}
            n => {
                sink.add(
                    IssueTarget::Document,
                    Category::Headings,
                    Severity::Minor,
                    "Multiple h1 elements",
                    format!("Found {} h1 elements", n),
                    WCAG,
                );
            }
        }
    }
}
