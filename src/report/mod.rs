// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for accessibility issues.
//!
//! Supports multiple output formats:
//! - Text: the results panel as plain text, grouped by category
//! - JSON: the export schema for programmatic consumption
//! - CSV: one quoted row per issue for spreadsheets
//! - HTML: a printable report page

pub mod export;

use crate::document::DocumentAccessor;
use crate::error::{A11yError, Result};
use crate::issues::{Category, Issue, Summary};
use std::collections::BTreeMap;

pub use export::{ExportedIssue, RunReport};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// Comma-separated values
    Csv,
    /// Printable HTML page
    Html,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = A11yError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "html" => Ok(OutputFormat::Html),
            other => Err(A11yError::UnknownFormat(other.to_string())),
        }
    }
}

/// Group issues by category. Categories iterate in name order; issues keep
/// their run order within a category.
pub fn group_by_category(issues: &[Issue]) -> BTreeMap<Category, Vec<&Issue>> {
    let mut groups: BTreeMap<Category, Vec<&Issue>> = BTreeMap::new();
    for issue in issues {
        groups.entry(issue.category).or_default().push(issue);
    }
    groups
}

/// Generate a report for one run in the requested format
pub fn generate_report(
    issues: &[Issue],
    doc: &dyn DocumentAccessor,
    source: &str,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text_report(source, issues)),
        OutputFormat::Json => export::to_json(&RunReport::new(source, issues, doc)),
        OutputFormat::Csv => Ok(export::to_csv(&RunReport::new(source, issues, doc))),
        OutputFormat::Html => Ok(export::to_html(&RunReport::new(source, issues, doc))),
    }
}

/// Plain-text rendition of the results panel
pub fn text_report(source: &str, issues: &[Issue]) -> String {
    let mut output = String::new();

    output.push_str("=== a11ybot Accessibility Report ===\n");
    output.push_str(&format!("Page: {}\n\n", source));

    if issues.is_empty() {
        output.push_str("No accessibility issues found!\n");
        return output;
    }

    let summary = Summary::from_issues(issues);
    output.push_str(&format!(
        "Found {} issue(s): {} critical, {} major, {} minor\n\n",
        summary.total, summary.critical, summary.major, summary.minor
    ));

    for (category, group) in group_by_category(issues) {
        output.push_str(&format!("--- {} ({}) ---\n", category, group.len()));
        for issue in group {
            output.push_str(&format!(
                "[{}] {} - {} ({})\n",
                issue.severity,
                issue.title,
                issue.description,
                issue.wcag_label()
            ));
        }
        output.push('\n');
    }

    if summary.critical > 0 {
        output.push_str("RESULT: FAIL (critical issues found)\n");
    } else {
        output.push_str("RESULT: PASS WITH ISSUES\n");
    }

    output
}
