// SPDX-License-Identifier: PMPL-1.0-or-later
//! Overlay collaborator seam.
//!
//! A renderer marks issue targets in the host view. The evaluator clears the
//! attached renderer when a run starts and hands it the finished issue list
//! when the run ends. Badge planning is shared so every renderer skips the
//! same targets and uses the same palette.

use crate::config::PALETTE;
use crate::document::{DocumentAccessor, NodeId};
use crate::issues::{Category, Issue, IssueTarget, Severity};
use crate::report::export::selector_path;
use tracing::debug;

/// One marker to draw on an element
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub issue_id: usize,
    pub node: NodeId,
    pub color: &'static str,
    /// First letter of the category name
    pub label: char,
    pub category: Category,
    pub severity: Severity,
}

/// Badges for every issue whose target is still an attached element.
/// Document-level and stale targets get no badge.
pub fn plan_badges(issues: &[Issue], doc: &dyn DocumentAccessor) -> Vec<Badge> {
    issues
        .iter()
        .filter_map(|issue| {
            let node = issue.target.resolve(doc)?;
            if doc.is_tag(node, "body") {
                return None;
            }
            Some(Badge {
                issue_id: issue.id,
                node,
                color: PALETTE.color(issue.severity),
                label: issue.category.name().chars().next().unwrap_or('?'),
                category: issue.category,
                severity: issue.severity,
            })
        })
        .collect()
}

/// Presentation layer driven by the evaluator
pub trait OverlayRenderer: Send {
    /// Remove everything drawn for the previous run
    fn clear(&mut self);

    /// Draw markers for a finished run
    fn apply(&mut self, issues: &[Issue], doc: &dyn DocumentAccessor);
}

/// In-memory renderer keeping planned badges and a visibility toggle
#[derive(Debug, Clone)]
pub struct BadgeOverlay {
    visible: bool,
    issues: Vec<Issue>,
    badges: Vec<Badge>,
}

impl Default for BadgeOverlay {
    fn default() -> Self {
        Self {
            visible: true,
            issues: Vec::new(),
            badges: Vec::new(),
        }
    }
}

impl BadgeOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Currently drawn badges (empty while hidden)
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    /// Flip visibility. Hiding clears the badges; showing re-plans them from
    /// the last applied issue list against the current tree.
    pub fn toggle(&mut self, doc: &dyn DocumentAccessor) -> bool {
        self.visible = !self.visible;
        self.badges = if self.visible {
            plan_badges(&self.issues, doc)
        } else {
            Vec::new()
        };
        self.visible
    }
}

impl OverlayRenderer for BadgeOverlay {
    fn clear(&mut self) {
        self.issues.clear();
        self.badges.clear();
    }

    fn apply(&mut self, issues: &[Issue], doc: &dyn DocumentAccessor) {
        self.issues = issues.to_vec();
        if self.visible {
            self.badges = plan_badges(issues, doc);
            for badge in &self.badges {
                debug!(
                    "Badge {} ({}) on {} for issue {}",
                    badge.label,
                    badge.severity,
                    selector_path(doc, IssueTarget::Element(badge.node)),
                    badge.issue_id
                );
            }
        }
    }
}
