// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility rules implementing the eight WCAG 2.x checks.
//!
//! Each rule reads the document through [`DocumentAccessor`] and appends what
//! it finds to the run's [`IssueSink`]. Rules never fail: an element that
//! cannot be evaluated (unresolvable color, dangling reference) is skipped.

pub mod aria;
pub mod contrast;
pub mod focus;
pub mod forms;
pub mod headings;
pub mod images;
pub mod keyboard;
pub mod links;

use crate::document::DocumentAccessor;
use crate::issues::{Category, IssueSink};

/// Trait implemented by all rules
pub trait Rule: Send + Sync {
    /// Human-readable name of this rule
    fn name(&self) -> &str;

    /// Category every issue from this rule is filed under
    fn category(&self) -> Category;

    /// Short description of what this rule checks
    fn description(&self) -> &str;

    /// Inspect the document and record findings
    fn check(&self, doc: &dyn DocumentAccessor, sink: &mut IssueSink);
}

/// The eight checks in run order
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(images::ImagesRule),
        Box::new(headings::HeadingsRule),
        Box::new(links::LinksRule),
        Box::new(forms::FormsRule),
        Box::new(contrast::ContrastRule),
        Box::new(aria::AriaRule),
        Box::new(focus::FocusRule::default()),
        Box::new(keyboard::KeyboardRule),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_order() {
        let categories: Vec<Category> = default_rules().iter().map(|r| r.category()).collect();
        assert_eq!(
            categories,
            vec![
                Category::Images,
                Category::Headings,
                Category::Links,
                Category::Forms,
                Category::Contrast,
                Category::Aria,
                Category::Focus,
                Category::Keyboard,
            ]
        );
    }

    #[test]
    fn test_rules_have_names() {
        for rule in default_rules() {
            assert!(!rule.name().is_empty());
            assert!(!rule.description().is_empty());
        }
    }
}
