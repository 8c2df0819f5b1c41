// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text rule - WCAG 1.1.1 Non-text Content (Level A)
//!
//! - Every `<img>` must carry an `alt` attribute
//! - An empty `alt` is only acceptable on images marked decorative
//! - Alt text should not announce itself as an image

use crate::document::{DocumentAccessor, NodeId};
use crate::issues::{Category, IssueSink, IssueTarget, Severity};
use crate::rules::Rule;

/// Alt phrasing that repeats what the screen reader already announces
const REDUNDANT_ALT_PHRASES: &[&str] = &["image of", "picture of"];

const WCAG: &str = "1.1.1";

/// Rule for image alt text
pub struct ImagesRule;

impl ImagesRule {
    /// `role` containing "presentation" or `aria-hidden="true"`
    fn is_decorative(doc: &dyn DocumentAccessor, img: NodeId) -> bool {
        doc.attribute(img, "role")
            .is_some_and(|role| role.contains("presentation"))
            || doc.attribute(img, "aria-hidden") == Some("true")
    }

    fn is_redundant(alt: &str) -> bool {
        let alt = alt.to_lowercase();
        alt == "image" || REDUNDANT_ALT_PHRASES.iter().any(|phrase| alt.contains(phrase))
    }
}

impl Rule for ImagesRule {
    fn name(&self) -> &str {
        "Images"
    }

    fn category(&self) -> Category {
        Category::Images
    }

    fn description(&self) -> &str {
        "Checks <img> elements for missing, empty and redundant alt text (WCAG 1.1.1)"
    }

    fn check(&self, doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        let images = doc.elements_by_tag(&["img"]);

        for &img in &images {
            match doc.attribute(img, "alt") {
                None => {
                    sink.add(
                        IssueTarget::Element(img),
                        Category::Images,
                        Severity::Critical,
                        "Missing alt attribute",
                        "Image lacks alt text for screen readers",
                        WCAG,
                    );
                }
                Some(alt) if alt.trim().is_empty() && !Self::is_decorative(doc, img) => {
                    sink.add(
                        IssueTarget::Element(img),
                        Category::Images,
                        Severity::Major,
                        "Empty alt attribute",
                        "Alt text is empty but image may not be decorative",
                        WCAG,
                    );
                }
                Some(_) => {}
            }
        }

        for &img in &images {
            let Some(alt) = doc.attribute(img, "alt") else {
                continue;
            };
            if Self::is_redundant(alt) {
                sink.add(
                    IssueTarget::Element(img),
                    Category::Images,
                    Severity::Minor,
                    "Redundant alt text",
                    "Avoid phrases like \"image of\" in alt text",
                    WCAG,
                );
            }
        }
    }
}
