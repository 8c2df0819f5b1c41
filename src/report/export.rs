// SPDX-License-Identifier: PMPL-1.0-or-later
//! Export encoders for a finished run: JSON, CSV and printable HTML.
//!
//! Each issue is flattened to [`ExportedIssue`], which replaces the weak
//! element target with the tag name and a CSS-like selector path computed at
//! export time. Targets that are document-level or no longer attached export
//! as `BODY` / `body`.

use crate::config::{PALETTE, SELECTOR_PATH_LIMIT};
use crate::document::{DocumentAccessor, NodeId};
use crate::error::Result;
use crate::issues::{Category, Issue, IssueTarget, Severity, Summary};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One issue in export form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedIssue {
    pub category: Category,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// Criterion with prefix, e.g. "WCAG 1.1.1"
    pub wcag: String,
    /// Uppercase tag name
    pub element: String,
    pub selector: String,
}

/// Everything written by an export
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Page the run evaluated
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub summary: Summary,
    pub issues: Vec<ExportedIssue>,
}

impl RunReport {
    /// Snapshot a run's issues against the current tree
    pub fn new(url: impl Into<String>, issues: &[Issue], doc: &dyn DocumentAccessor) -> Self {
        Self {
            url: url.into(),
            timestamp: Utc::now(),
            summary: Summary::from_issues(issues),
            issues: issues.iter().map(|issue| export_issue(issue, doc)).collect(),
        }
    }
}

/// Flatten an issue for export
pub fn export_issue(issue: &Issue, doc: &dyn DocumentAccessor) -> ExportedIssue {
    ExportedIssue {
        category: issue.category,
        severity: issue.severity,
        title: issue.title.clone(),
        description: issue.description.clone(),
        wcag: issue.wcag_label(),
        element: element_name(doc, issue.target),
        selector: selector_path(doc, issue.target),
    }
}

fn element_name(doc: &dyn DocumentAccessor, target: IssueTarget) -> String {
    target
        .resolve(doc)
        .and_then(|node| doc.tag_name(node))
        .map(str::to_ascii_uppercase)
        .unwrap_or_else(|| "BODY".to_string())
}

/// `tag.class1.class2` for one level of the path
fn path_segment(doc: &dyn DocumentAccessor, node: NodeId) -> String {
    let mut segment = doc.tag_name(node).unwrap_or_default().to_string();
    if let Some(class) = doc.attribute(node, "class") {
        let classes: Vec<&str> = class.split_whitespace().collect();
        if !classes.is_empty() {
            segment.push('.');
            segment.push_str(&classes.join("."));
        }
    }
    segment
}

/// Selector path for an issue target.
///
/// `#id` when the element has an id; otherwise the ancestor chain up to
/// (excluding) `body`, one `tag.classes` segment per level joined with
/// `" > "`, cut to [`SELECTOR_PATH_LIMIT`] characters. Document-level, stale
/// and `body` targets give `"body"`.
pub fn selector_path(doc: &dyn DocumentAccessor, target: IssueTarget) -> String {
    let Some(node) = target.resolve(doc) else {
        return "body".to_string();
    };
    if doc.is_tag(node, "body") {
        return "body".to_string();
    }
    if let Some(id) = doc.attribute(node, "id").filter(|id| !id.is_empty()) {
        return format!("#{}", id);
    }

    let mut segments = Vec::new();
    let mut current = Some(node);
    while let Some(n) = current {
        if doc.is_tag(n, "body") {
            break;
        }
        segments.push(path_segment(doc, n));
        current = doc.parent(n);
    }
    segments.reverse();

    segments
        .join(" > ")
        .chars()
        .take(SELECTOR_PATH_LIMIT)
        .collect()
}

/// Pretty-printed JSON export
pub fn to_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// CSV export: header row plus one row per issue, every cell quoted
pub fn to_csv(report: &RunReport) -> String {
    let mut lines = vec!["Category,Severity,Title,Description,WCAG,Element,Selector".to_string()];
    for issue in &report.issues {
        let severity = issue.severity.to_string();
        let cells: [&str; 7] = [
            issue.category.name(),
            &severity,
            &issue.title,
            &issue.description,
            &issue.wcag,
            &issue.element,
            &issue.selector,
        ];
        lines.push(cells.iter().map(|c| csv_cell(c)).collect::<Vec<_>>().join(","));
    }
    lines.join("\n")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const PRINT_STYLES: &str = "body{font-family:system-ui,sans-serif;max-width:800px;margin:0 auto;padding:20px}\
h1{color:#1e293b}h2{color:#475569;border-bottom:2px solid #e2e8f0;padding-bottom:8px}\
.summary{display:flex;gap:20px;margin:20px 0}.stat{padding:15px;border-radius:8px;text-align:center}\
.critical{background:#fef2f2;color:#dc2626}.major{background:#fff7ed;color:#ea580c}.minor{background:#fefce8;color:#ca8a04}\
.stat-num{font-size:32px;font-weight:700}.stat-label{font-size:12px;text-transform:uppercase}\
table{width:100%;border-collapse:collapse;margin:20px 0}th,td{padding:10px;text-align:left;border-bottom:1px solid #e2e8f0}\
th{background:#f8fafc}.sev{display:inline-block;width:10px;height:10px;border-radius:50%;margin-right:8px}";

/// Printable HTML export with summary cards and an issue table
pub fn to_html(report: &RunReport) -> String {
    let summary = report.summary;
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">");
    out.push_str("<title>a11ybot Accessibility Report</title>");
    out.push_str(&format!("<style>{}</style></head>\n<body>\n", PRINT_STYLES));
    out.push_str("<h1>a11ybot Accessibility Report</h1>\n");
    out.push_str(&format!("<p><strong>URL:</strong> {}</p>\n", escape_html(&report.url)));
    out.push_str(&format!(
        "<p><strong>Date:</strong> {}</p>\n",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str("<div class=\"summary\">\n");
    for (class, label, count) in [
        ("critical", "Critical", summary.critical),
        ("major", "Major", summary.major),
        ("minor", "Minor", summary.minor),
    ] {
        out.push_str(&format!(
            "<div class=\"stat {}\"><div class=\"stat-num\">{}</div><div class=\"stat-label\">{}</div></div>\n",
            class, count, label
        ));
    }
    out.push_str("</div>\n");

    out.push_str(&format!("<h2>Issues ({})</h2>\n", summary.total));
    out.push_str("<table><thead><tr><th>Severity</th><th>Category</th><th>Issue</th><th>WCAG</th></tr></thead><tbody>\n");
    for issue in &report.issues {
        out.push_str(&format!(
            "<tr><td><span class=\"sev\" style=\"background:{}\"></span>{}</td><td>{}</td><td><strong>{}</strong><br><small>{}</small></td><td>{}</td></tr>\n",
            PALETTE.color(issue.severity),
            issue.severity,
            issue.category,
            escape_html(&issue.title),
            escape_html(&issue.description),
            escape_html(&issue.wcag),
        ));
    }
    out.push_str("</tbody></table>\n</body></html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::html::HtmlDocument;
    use crate::issues::IssueSink;

    fn doc() -> HtmlDocument {
        HtmlDocument::parse(
            r#"<html><body>
                <main class="content  wide"><section><p class="lead intro"><a href="/x">more</a></p></section></main>
                <img id="hero" src="a.png">
            </body></html>"#,
        )
    }

    fn find(doc: &HtmlDocument, tag: &str) -> NodeId {
        doc.elements_by_tag(&[tag])[0]
    }

    #[test]
    fn test_selector_path_walks_to_body() {
        let doc = doc();
        let link = find(&doc, "a");
        assert_eq!(
            selector_path(&doc, IssueTarget::Element(link)),
            "main.content.wide > section > p.lead.intro > a"
        );
    }

    #[test]
    fn test_selector_path_prefers_id() {
        let doc = doc();
        let img = find(&doc, "img");
        assert_eq!(selector_path(&doc, IssueTarget::Element(img)), "#hero");
    }

    #[test]
    fn test_selector_path_document_and_stale() {
        let mut doc = doc();
        assert_eq!(selector_path(&doc, IssueTarget::Document), "body");
        let body = doc.body().expect("body");
        assert_eq!(selector_path(&doc, IssueTarget::Element(body)), "body");

        let link = find(&doc, "a");
        let section = find(&doc, "section");
        doc.detach(section);
        assert_eq!(selector_path(&doc, IssueTarget::Element(link)), "body");
        assert_eq!(element_name(&doc, IssueTarget::Element(link)), "BODY");
    }

    #[test]
    fn test_selector_path_truncated() {
        let nested = (0..30).fold(String::from("x"), |inner, _| {
            format!("<div class=\"wrapper\">{}</div>", inner)
        });
        let doc = HtmlDocument::parse(&format!("<html><body>{}</body></html>", nested));
        let deepest = *doc.elements_by_tag(&["div"]).last().expect("div");
        let path = selector_path(&doc, IssueTarget::Element(deepest));
        assert_eq!(path.chars().count(), SELECTOR_PATH_LIMIT);
        assert!(path.starts_with("div.wrapper > div.wrapper"));
    }

    fn report(doc: &HtmlDocument) -> RunReport {
        let mut sink = IssueSink::new();
        sink.add(
            IssueTarget::Element(find(doc, "a")),
            Category::Links,
            Severity::Major,
            "Vague link text",
            "\"more\" doesn't describe the destination",
            "2.4.4",
        );
        sink.add(
            IssueTarget::Document,
            Category::Headings,
            Severity::Major,
            "Missing h1",
            "Page lacks a main heading (h1)",
            "1.3.1",
        );
        RunReport::new("file:///tmp/page.html", sink.issues(), doc)
    }

    #[test]
    fn test_export_issue_fields() {
        let doc = doc();
        let report = report(&doc);
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.issues[0].element, "A");
        assert_eq!(report.issues[0].wcag, "WCAG 2.4.4");
        assert_eq!(report.issues[1].element, "BODY");
        assert_eq!(report.issues[1].selector, "body");
    }

    #[test]
    fn test_json_export() {
        let doc = doc();
        let json = to_json(&report(&doc)).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["url"], "file:///tmp/page.html");
        assert_eq!(value["summary"]["major"], 2);
        assert_eq!(value["issues"][0]["category"], "Links");
        assert_eq!(value["issues"][0]["severity"], "major");
        assert_eq!(value["issues"][1]["selector"], "body");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_csv_export_quotes_cells() {
        let doc = doc();
        let csv = to_csv(&report(&doc));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Category,Severity,Title,Description,WCAG,Element,Selector");
        assert_eq!(
            lines[1],
            r#""Links","major","Vague link text","""more"" doesn't describe the destination","WCAG 2.4.4","A","main.content.wide > section > p.lead.intro > a""#
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_html_export_escapes_text() {
        let doc = doc();
        let html = to_html(&report(&doc));
        assert!(html.contains("<h2>Issues (2)</h2>"));
        assert!(html.contains("&quot;more&quot; doesn&#39;t describe the destination"));
        assert!(html.contains("background:#ea580c"));
        assert!(!html.contains("\"more\" doesn't"));
    }
}
