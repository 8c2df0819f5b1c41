// SPDX-License-Identifier: PMPL-1.0-or-later
//! Issue data model and the append-only issue sink.
//!
//! Every rule normalizes what it finds into an [`Issue`]. Issues are numbered
//! densely from 0 in discovery order; the sink is emptied (and the numbering
//! restarted) at the start of every evaluation run.

use crate::document::{DocumentAccessor, NodeId};
use serde::{Deserialize, Serialize};

/// Issue category, one per rule.
///
/// Variants are declared in lexicographic order of their display names so
/// that the derived `Ord` matches the order reports iterate categories in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "ARIA")]
    Aria,
    Contrast,
    Focus,
    Forms,
    Headings,
    Images,
    Keyboard,
    Links,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::Aria,
        Category::Contrast,
        Category::Focus,
        Category::Forms,
        Category::Headings,
        Category::Images,
        Category::Keyboard,
        Category::Links,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Category::Aria => "ARIA",
            Category::Contrast => "Contrast",
            Category::Focus => "Focus",
            Category::Forms => "Forms",
            Category::Headings => "Headings",
            Category::Images => "Images",
            Category::Keyboard => "Keyboard",
            Category::Links => "Links",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity of an issue, ordered by impact (`Critical > Major > Minor`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl Severity {
    /// Capitalized label for panel headings
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Major => "Major",
            Severity::Minor => "Minor",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Major => write!(f, "major"),
            Severity::Minor => write!(f, "minor"),
        }
    }
}

/// What an issue points at in the host tree.
///
/// Element targets are weak: the node may have been removed from the tree
/// since the run, so consumers go through [`IssueTarget::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "node")]
pub enum IssueTarget {
    /// No single element (e.g. a page without any `h1`)
    Document,
    Element(NodeId),
}

impl IssueTarget {
    /// The target node, if it is an element still attached to `doc`
    pub fn resolve(&self, doc: &dyn DocumentAccessor) -> Option<NodeId> {
        match *self {
            IssueTarget::Document => None,
            IssueTarget::Element(node) => doc.is_attached(node).then_some(node),
        }
    }
}

/// A single accessibility finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Dense, 0-based, unique within a run
    pub id: usize,
    pub target: IssueTarget,
    pub category: Category,
    pub severity: Severity,
    /// Short label, fixed per rule branch
    pub title: String,
    /// Human sentence, may embed measured values
    pub description: String,
    /// WCAG success criterion (e.g. "1.1.1")
    pub wcag: String,
}

impl Issue {
    /// Criterion as shown in reports, e.g. "WCAG 1.1.1"
    pub fn wcag_label(&self) -> String {
        format!("WCAG {}", self.wcag)
    }
}

/// Severity counts over an issue list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub critical: usize,
    pub major: usize,
    pub minor: usize,
}

impl Summary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut summary = Summary {
            total: issues.len(),
            ..Summary::default()
        };
        for issue in issues {
            match issue.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Major => summary.major += 1,
                Severity::Minor => summary.minor += 1,
            }
        }
        summary
    }
}

/// Append-only collector for one run's issues
#[derive(Debug, Clone, Default)]
pub struct IssueSink {
    issues: Vec<Issue>,
}

impl IssueSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an issue with the next sequential id
    pub fn add(
        &mut self,
        target: IssueTarget,
        category: Category,
        severity: Severity,
        title: &str,
        description: impl Into<String>,
        wcag: &str,
    ) -> &Issue {
        let id = self.issues.len();
        self.issues.push(Issue {
            id,
            target,
            category,
            severity,
            title: title.to_string(),
            description: description.into(),
            wcag: wcag.to_string(),
        });
        &self.issues[id]
    }

    /// Empty the sink; the next issue gets id 0 again
    pub fn clear(&mut self) {
        self.issues.clear();
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn by_severity(&self, severity: Severity) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.severity == severity).collect()
    }

    pub fn summary(&self) -> Summary {
        Summary::from_issues(&self.issues)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
