// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page scanner for running the evaluator over files on disk.
//!
//! Every page gets its own document and its own run; results from one page
//! never leak into the next.

use crate::document::html::HtmlDocument;
use crate::error::{A11yError, Result};
use crate::evaluator::Evaluator;
use crate::issues::{Issue, Severity, Summary};
use crate::report::{self, OutputFormat, RunReport};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// File extensions to scan
const SCANNABLE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Directories to skip
const SKIP_DIRS: &[&str] = &["node_modules", "target", "dist", "build", "vendor"];

/// Outcome of evaluating one page
#[derive(Debug, Clone)]
pub struct PageResult {
    pub path: PathBuf,
    pub issues: Vec<Issue>,
    /// Export snapshot taken while the page's tree was still available
    pub report: RunReport,
}

impl PageResult {
    pub fn has_critical(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Critical)
    }
}

/// Evaluate one HTML source string
pub fn scan_source(source: &str, path: &Path, evaluator: &Evaluator) -> Result<PageResult> {
    let doc = HtmlDocument::parse(source);
    let issues = evaluator
        .run(&doc)
        .ok_or_else(|| A11yError::RunInProgress(path.to_path_buf()))?;
    let report = RunReport::new(path.display().to_string(), &issues, &doc);
    Ok(PageResult {
        path: path.to_path_buf(),
        issues,
        report,
    })
}

/// Evaluate a single HTML file
pub fn scan_file(path: &Path, evaluator: &Evaluator) -> Result<PageResult> {
    let source = std::fs::read_to_string(path)?;
    info!("Evaluating {}", path.display());
    scan_source(&source, path, evaluator)
}

/// Evaluate every HTML file under a directory, in path order
pub fn scan_directory(dir: &Path, evaluator: &Evaluator) -> Result<Vec<PageResult>> {
    let mut results = Vec::new();

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.file_type().is_dir() && e.depth() > 0 {
                return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !SCANNABLE_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }

        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        results.push(scan_source(&source, path, evaluator)?);
    }

    let total: usize = results.iter().map(|r| r.issues.len()).sum();
    info!("Scanned {} pages, found {} issues", results.len(), total);

    Ok(results)
}

/// Evaluate a file or, for a directory, every page under it
pub fn scan_path(path: &Path, evaluator: &Evaluator) -> Result<Vec<PageResult>> {
    if path.is_dir() {
        scan_directory(path, evaluator)
    } else {
        Ok(vec![scan_file(path, evaluator)?])
    }
}

/// Render scan results for the `check` command (text or JSON)
pub fn render_results(results: &[PageResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            if results.is_empty() {
                return Ok("No HTML pages found.\n".to_string());
            }
            let pages: Vec<String> = results
                .iter()
                .map(|r| report::text_report(&r.path.display().to_string(), &r.issues))
                .collect();
            Ok(pages.join("\n"))
        }
        OutputFormat::Json => {
            let reports: Vec<&RunReport> = results.iter().map(|r| &r.report).collect();
            Ok(serde_json::to_string_pretty(&reports)?)
        }
        other => Err(A11yError::UnsupportedFormat(other.to_string())),
    }
}

/// Severity counts across all pages
pub fn total_summary(results: &[PageResult]) -> Summary {
    let issues: Vec<Issue> = results.iter().flat_map(|r| r.issues.iter().cloned()).collect();
    Summary::from_issues(&issues)
}
