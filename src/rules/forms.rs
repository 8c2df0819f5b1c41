// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form labelling rule - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! Checks that form controls have a programmatic label and that related
//! radio buttons and checkboxes are grouped in a `<fieldset>`.

use crate::document::{DocumentAccessor, NodeId};
use crate::issues::{Category, IssueSink, IssueTarget, Severity};
use crate::rules::Rule;

/// Input types that need no label
const UNLABELLED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "image", "reset"];

const WCAG: &str = "1.3.1";

/// Rule for form control labels
pub struct FormsRule;

/// Control type the way the DOM reports it: lowercase `type` for inputs
/// (defaulting to "text"), `select-one`/`select-multiple`, `textarea`
fn control_type(doc: &dyn DocumentAccessor, control: NodeId) -> String {
    match doc.tag_name(control) {
        Some("select") if doc.has_attribute(control, "multiple") => "select-multiple".to_string(),
        Some("select") => "select-one".to_string(),
        Some("textarea") => "textarea".to_string(),
        _ => doc
            .attribute(control, "type")
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "text".to_string()),
    }
}

impl FormsRule {
    fn check_labels(doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        for control in doc.elements_by_tag(&["input", "select", "textarea"]) {
            if UNLABELLED_INPUT_TYPES.contains(&control_type(doc, control).as_str()) {
                continue;
            }

            let has_label = !doc.labels(control).is_empty();
            let has_aria_label =
                doc.has_value(control, "aria-label") || doc.has_value(control, "aria-labelledby");
            if has_label || has_aria_label {
                continue;
            }

            // A placeholder is reported on its own so the control is never
            // flagged as both unlabelled and placeholder-labelled
            if doc.has_value(control, "placeholder") {
                sink.add(
                    IssueTarget::Element(control),
                    Category::Forms,
                    Severity::Major,
                    "Placeholder as label",
                    "Placeholder alone is insufficient labeling",
                    WCAG,
                );
            } else if !doc.has_value(control, "title") {
                sink.add(
                    IssueTarget::Element(control),
                    Category::Forms,
                    Severity::Critical,
                    "Missing form label",
                    "Input has no associated label",
                    WCAG,
                );
            }
        }
    }

    fn check_fieldsets(doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        let inputs = doc.elements_by_tag(&["input"]);

        for &input in &inputs {
            let kind = control_type(doc, input);
            if kind != "radio" && kind != "checkbox" {
                continue;
            }
            if doc.closest(input, "fieldset").is_some() {
                continue;
            }
            let Some(name) = doc.attribute(input, "name") else {
                continue;
            };

            let group_size = inputs
                .iter()
                .filter(|&&other| doc.attribute(other, "name") == Some(name))
                .count();
            if group_size > 1 {
                sink.add(
                    IssueTarget::Element(input),
                    Category::Forms,
                    Severity::Minor,
                    "Missing fieldset",
                    "Related inputs should be grouped in fieldset",
                    WCAG,
                );
            }
        }
    }
}

impl Rule for FormsRule {
    fn name(&self) -> &str {
        "Forms"
    }

    fn category(&self) -> Category {
        Category::Forms
    }

    fn description(&self) -> &str {
        "Checks form controls for labels and grouped inputs for fieldsets (WCAG 1.3.1)"
    }

    fn check(&self, doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        Self::check_labels(doc, sink);
        Self::check_fieldsets(doc, sink);
    }
}
