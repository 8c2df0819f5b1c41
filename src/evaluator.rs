// SPDX-License-Identifier: PMPL-1.0-or-later
//! Evaluation run controller.
//!
//! An [`Evaluator`] owns its rule list, its issue sink and its running flag,
//! so independent evaluators never share state. A run is synchronous and
//! always completes; a run requested while another is in progress on the same
//! evaluator is ignored and returns `None`.

use crate::document::DocumentAccessor;
use crate::issues::{Issue, IssueSink, Summary};
use crate::overlay::OverlayRenderer;
use crate::rules::{default_rules, Rule};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

/// Runs the rule set over a document
pub struct Evaluator {
    rules: Vec<Box<dyn Rule>>,
    running: AtomicBool,
    sink: Mutex<IssueSink>,
    overlay: Mutex<Option<Box<dyn OverlayRenderer>>>,
}

/// Resets the running flag when a run ends
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Evaluator with the eight default rules
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            rules,
            running: AtomicBool::new(false),
            sink: Mutex::new(IssueSink::new()),
            overlay: Mutex::new(None),
        }
    }

    /// Attach a renderer that is cleared and re-applied on every run
    pub fn with_overlay(self, overlay: Box<dyn OverlayRenderer>) -> Self {
        *self.overlay.lock().unwrap_or_else(PoisonError::into_inner) = Some(overlay);
        self
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run every rule in order and return the finished issue list.
    ///
    /// Returns `None` without touching the previous results when a run is
    /// already in progress.
    pub fn run(&self, doc: &dyn DocumentAccessor) -> Option<Vec<Issue>> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Evaluation already running, ignoring request");
            return None;
        }
        let _guard = RunGuard(&self.running);

        info!("Starting accessibility evaluation ({} rules)", self.rules.len());

        self.sink.lock().unwrap_or_else(PoisonError::into_inner).clear();
        if let Some(overlay) = self.overlay.lock().unwrap_or_else(PoisonError::into_inner).as_mut() {
            overlay.clear();
        }

        // The shared sink stays unlocked while rules call into the host
        let mut sink = IssueSink::new();
        for rule in &self.rules {
            let before = sink.len();
            rule.check(doc, &mut sink);
            debug!("Rule {}: {} issues", rule.name(), sink.len() - before);
        }

        let issues = sink.issues().to_vec();
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = sink;

        if let Some(overlay) = self.overlay.lock().unwrap_or_else(PoisonError::into_inner).as_mut() {
            overlay.apply(&issues, doc);
        }

        let summary = Summary::from_issues(&issues);
        info!(
            "Evaluation complete: {} issues ({} critical, {} major, {} minor)",
            summary.total, summary.critical, summary.major, summary.minor
        );

        Some(issues)
    }

    /// Issues of the last finished run
    pub fn issues(&self) -> Vec<Issue> {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .issues()
            .to_vec()
    }

    pub fn summary(&self) -> Summary {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner).summary()
    }
}
