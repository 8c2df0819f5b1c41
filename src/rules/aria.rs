// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA rule - WCAG 4.1.2 Name, Role, Value (Level A)
//!
//! - `role` values must come from the WAI-ARIA role vocabulary
//! - `aria-hidden="true"` must not hide keyboard-reachable content
//! - every id in `aria-labelledby` must exist in the document

use crate::document::{DocumentAccessor, NodeId};
use crate::issues::{Category, IssueSink, IssueTarget, Severity};
use crate::rules::Rule;

/// WAI-ARIA roles accepted in a `role` attribute
pub const VALID_ROLES: &[&str] = &[
    "alert", "alertdialog", "application", "article", "banner", "button", "cell", "checkbox",
    "columnheader", "combobox", "complementary", "contentinfo", "definition", "dialog",
    "directory", "document", "feed", "figure", "form", "grid", "gridcell", "group", "heading",
    "img", "link", "list", "listbox", "listitem", "log", "main", "marquee", "math", "menu",
    "menubar", "menuitem", "menuitemcheckbox", "menuitemradio", "navigation", "none", "note",
    "option", "presentation", "progressbar", "radio", "radiogroup", "region", "row", "rowgroup",
    "rowheader", "scrollbar", "search", "searchbox", "separator", "slider", "spinbutton",
    "status", "switch", "tab", "table", "tablist", "tabpanel", "term", "textbox", "timer",
    "toolbar", "tooltip", "tree", "treegrid", "treeitem",
];

const WCAG: &str = "4.1.2";

/// Rule for ARIA attribute usage
pub struct AriaRule;

impl AriaRule {
    fn check_roles(doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        for el in doc.elements_with_attribute("role") {
            let Some(role) = doc.attribute(el, "role") else {
                continue;
            };
            if !VALID_ROLES.contains(&role) {
                sink.add(
                    IssueTarget::Element(el),
                    Category::Aria,
                    Severity::Major,
                    "Invalid ARIA role",
                    format!("\"{}\" is not a valid role", role),
                    WCAG,
                );
            }
        }
    }

    /// A descendant that keyboard users can still tab to
    fn has_reachable_descendant(doc: &dyn DocumentAccessor, el: NodeId) -> bool {
        doc.descendants(el)
            .into_iter()
            .any(|d| doc.is_focus_candidate(d) && doc.tab_index(d) >= 0)
    }

    fn check_hidden(doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        for el in doc.elements_with_attribute("aria-hidden") {
            if doc.attribute(el, "aria-hidden") != Some("true") {
                continue;
            }
            if Self::has_reachable_descendant(doc, el) {
                sink.add(
                    IssueTarget::Element(el),
                    Category::Aria,
                    Severity::Critical,
                    "Hidden but focusable",
                    "aria-hidden element contains focusable content",
                    WCAG,
                );
            }
        }
    }

    fn check_labelledby(doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        for el in doc.elements_with_attribute("aria-labelledby") {
            let Some(ids) = doc.attribute(el, "aria-labelledby") else {
                continue;
            };
            for id in ids.split_whitespace() {
                if doc.element_by_id(id).is_none() {
                    sink.add(
                        IssueTarget::Element(el),
                        Category::Aria,
                        Severity::Major,
                        "Invalid aria-labelledby",
                        format!("Referenced id \"{}\" not found", id),
                        WCAG,
                    );
                }
            }
        }
    }
}

impl Rule for AriaRule {
    fn name(&self) -> &str {
        "ARIA"
    }

    fn category(&self) -> Category {
        Category::Aria
    }

    fn description(&self) -> &str {
        "Checks ARIA roles, hidden focusable content and aria-labelledby references (WCAG 4.1.2)"
    }

    fn check(&self, doc: &dyn DocumentAccessor, sink: &mut IssueSink) {
        Self::check_roles(doc, sink);
        Self::check_hidden(doc, sink);
        Self::check_labelledby(doc, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{check, page, titles};

    #[test]
    fn test_valid_aria() {
        let doc = page(
            r#"<nav role="navigation"><a href="/">Home</a></nav>
               <div aria-hidden="true"><span>decoration</span><a href="/x" tabindex="-1">x</a></div>
               <h2 id="title">Settings</h2><section aria-labelledby="title">...</section>"#,
        );
        let issues = check(&AriaRule, &doc);
        assert!(issues.is_empty(), "Expected no issues, got: {:?}", issues);
    }

    #[test]
    fn test_invalid_role() {
        let issues = check(&AriaRule, &page(r#"<div role="buton">Save</div>"#));
        assert_eq!(titles(&issues), vec!["Invalid ARIA role"]);
        assert_eq!(issues[0].description, "\"buton\" is not a valid role");
        assert_eq!(issues[0].severity, Severity::Major);
    }

    #[test]
    fn test_role_list_is_not_split() {
        let issues = check(&AriaRule, &page(r#"<div role="button link">x</div>"#));
        assert_eq!(titles(&issues), vec!["Invalid ARIA role"]);
    }

    #[test]
    fn test_hidden_but_focusable() {
        let doc = page(
            r#"<div aria-hidden="true"><p>Text</p><button>Close</button></div>
               <div aria-hidden="true"><span tabindex="0">Tab stop</span></div>
               <div aria-hidden="false"><button>Fine</button></div>"#,
        );
        let issues = check(&AriaRule, &doc);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.title == "Hidden but focusable"));
        assert!(issues.iter().all(|i| i.severity == Severity::Critical));
    }

    #[test]
    fn test_any_reachable_descendant_counts() {
        // First focusable child is removed from tab order, the second is not
        let doc = page(
            r#"<div aria-hidden="true"><a href="/a" tabindex="-1">a</a><button>b</button></div>"#,
        );
        assert_eq!(titles(&check(&AriaRule, &doc)), vec!["Hidden but focusable"]);
    }

    #[test]
    fn test_dangling_labelledby_one_issue_per_id() {
        let doc = page(
            r#"<span id="first">First</span>
               <input type="text" aria-labelledby="first  missing-a
                   missing-b">"#,
        );
        let issues = check(&AriaRule, &doc);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].description, "Referenced id \"missing-a\" not found");
        assert_eq!(issues[1].description, "Referenced id \"missing-b\" not found");
    }

    #[test]
    fn test_role_vocabulary() {
        assert_eq!(VALID_ROLES.len(), 69);
        assert!(VALID_ROLES.contains(&"presentation"));
        assert!(!VALID_ROLES.contains(&"buton"));
    }
}
