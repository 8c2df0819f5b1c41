// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for a11ybot

use a11ybot::document::html::HtmlDocument;
use a11ybot::document::DocumentAccessor;
use a11ybot::evaluator::Evaluator;
use a11ybot::issues::{Category, IssueTarget, Severity};
use a11ybot::overlay::BadgeOverlay;
use a11ybot::report::export::{self, RunReport};
use a11ybot::report::{generate_report, group_by_category, OutputFormat};
use a11ybot::scanner;
use std::collections::BTreeSet;
use std::path::Path;

fn page(body: &str) -> HtmlDocument {
    HtmlDocument::parse(&format!(
        "<!DOCTYPE html><html><head></head><body>{}</body></html>",
        body
    ))
}

#[test]
fn test_scan_accessible_fixture() {
    let result = scanner::scan_file(Path::new("tests/fixtures/accessible.html"), &Evaluator::new())
        .expect("scan should succeed");

    assert!(
        result.issues.is_empty(),
        "Accessible fixture should have no issues, got: {:?}",
        result.issues.iter().map(|i| &i.title).collect::<Vec<_>>()
    );
}

#[test]
fn test_scan_inaccessible_fixture() {
    let result = scanner::scan_file(Path::new("tests/fixtures/inaccessible.html"), &Evaluator::new())
        .expect("scan should succeed");

    assert!(result.has_critical(), "Inaccessible fixture should have critical issues");

    let categories: BTreeSet<Category> = result.issues.iter().map(|i| i.category).collect();
    assert_eq!(
        categories.into_iter().collect::<Vec<_>>(),
        Category::ALL.to_vec(),
        "every rule should fire on the inaccessible fixture"
    );

    let titles: Vec<&str> = result.issues.iter().map(|i| i.title.as_str()).collect();
    for expected in [
        "Missing alt attribute",
        "Redundant alt text",
        "Skipped heading level",
        "Missing h1",
        "Empty link",
        "Vague link text",
        "Placeholder as label",
        "Missing fieldset",
        "Insufficient contrast",
        "Invalid ARIA role",
        "Hidden but focusable",
        "Invalid aria-labelledby",
        "Possible missing focus indicator",
        "Positive tabindex",
        "Click without keyboard",
        "Mouse-only interaction",
    ] {
        assert!(titles.contains(&expected), "missing {:?} in {:?}", expected, titles);
    }
}

#[test]
fn test_scan_partial_fixture() {
    let result = scanner::scan_file(Path::new("tests/fixtures/partial.html"), &Evaluator::new())
        .expect("scan should succeed");

    assert!(!result.has_critical());
    let mut titles: Vec<&str> = result.issues.iter().map(|i| i.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, vec!["Multiple h1 elements", "Positive tabindex", "Vague link text"]);
}

#[test]
fn test_run_idempotent_on_static_tree() {
    let source = std::fs::read_to_string("tests/fixtures/inaccessible.html").expect("fixture");
    let doc = HtmlDocument::parse(&source);
    let evaluator = Evaluator::new();

    let first = evaluator.run(&doc).expect("first run");
    let second = evaluator.run(&doc).expect("second run");

    let shape = |issues: &[a11ybot::issues::Issue]| {
        issues
            .iter()
            .map(|i| (i.category, i.severity, i.title.clone(), i.target))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&first), shape(&second));
    assert_eq!(second.first().map(|i| i.id), Some(0));
}

#[test]
fn test_overlay_does_not_change_results() {
    let path = Path::new("tests/fixtures/inaccessible.html");
    let plain = scanner::scan_file(path, &Evaluator::new()).expect("plain scan");
    let overlaid = Evaluator::new().with_overlay(Box::new(BadgeOverlay::new()));
    let badged = scanner::scan_file(path, &overlaid).expect("overlay scan");
    assert_eq!(plain.issues, badged.issues);
}

#[test]
fn test_deep_nesting_runs_to_completion() {
    let depth = 20_000;
    let doc = page(&format!(
        "<h1>Deep</h1>{}<a href=\"/x\" style=\"outline: 2px solid\">here</a>{}",
        "<span>".repeat(depth),
        "</span>".repeat(depth)
    ));
    let issues = Evaluator::new().run(&doc).expect("run");
    let titles: Vec<&str> = issues.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Vague link text"]);
}

#[test]
fn test_independent_evaluators() {
    let broken = page(r#"<img src="a.png">"#);
    let fine = page(r#"<h1>Title</h1>"#);
    let a = Evaluator::new();
    let b = Evaluator::new();

    a.run(&broken).expect("run a");
    b.run(&fine).expect("run b");

    assert!(a.summary().critical > 0);
    assert_eq!(b.summary().total, 0);
}

#[test]
fn test_heading_skip_reported_once() {
    let doc = page("<h1>Guide</h1><h3>Install</h3>");
    let issues = Evaluator::new().run(&doc).expect("run");
    let skips: Vec<_> = issues.iter().filter(|i| i.title == "Skipped heading level").collect();
    assert_eq!(skips.len(), 1);
    assert!(skips[0].description.contains("h1") && skips[0].description.contains("h3"));
}

#[test]
fn test_missing_h1_reported_once() {
    let doc = page("<h2>A</h2><h2>B</h2><h3>C</h3><h6>D</h6>");
    let issues = Evaluator::new().run(&doc).expect("run");
    let missing: Vec<_> = issues.iter().filter(|i| i.title == "Missing h1").collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].severity, Severity::Major);
    assert_eq!(missing[0].target, IssueTarget::Document);
}

#[test]
fn test_descriptive_alt_has_no_image_issues() {
    let doc = page(r#"<h1>Pets</h1><img src="cat.jpg" alt="A photo of a cat">"#);
    let issues = Evaluator::new().run(&doc).expect("run");
    assert!(issues.iter().all(|i| i.category != Category::Images));
}

#[test]
fn test_placeholder_excludes_missing_label() {
    let doc = page(r#"<h1>Newsletter</h1><input type="text" placeholder="Email">"#);
    let issues = Evaluator::new().run(&doc).expect("run");
    let forms: Vec<&str> = issues
        .iter()
        .filter(|i| i.category == Category::Forms)
        .map(|i| i.title.as_str())
        .collect();
    assert_eq!(forms, vec!["Placeholder as label"]);
}

#[test]
fn test_report_groups_by_category_name() {
    let source = std::fs::read_to_string("tests/fixtures/inaccessible.html").expect("fixture");
    let doc = HtmlDocument::parse(&source);
    let issues = Evaluator::new().run(&doc).expect("run");

    let groups = group_by_category(&issues);
    let names: Vec<&str> = groups.keys().map(|c| c.name()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    for group in groups.values() {
        let ids: Vec<usize> = group.iter().map(|i| i.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_generate_report_formats() {
    let doc = page(r#"<h1>Shop</h1><a href="/deals">here</a>"#);
    let issues = Evaluator::new().run(&doc).expect("run");

    let text = generate_report(&issues, &doc, "shop.html", OutputFormat::Text).expect("text");
    assert!(text.contains("--- Links (1) ---"));

    let json = generate_report(&issues, &doc, "shop.html", OutputFormat::Json).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["url"], "shop.html");
    let exported = value["issues"].as_array().expect("issues array");
    let link = exported
        .iter()
        .find(|i| i["title"] == "Vague link text")
        .expect("vague link");
    assert_eq!(link["element"], "A");
    assert_eq!(link["selector"], "a");
    assert_eq!(link["wcag"], "WCAG 2.4.4");

    let csv = generate_report(&issues, &doc, "shop.html", OutputFormat::Csv).expect("csv");
    assert_eq!(csv.lines().count(), issues.len() + 1);

    let html = generate_report(&issues, &doc, "shop.html", OutputFormat::Html).expect("html");
    assert!(html.contains(&format!("<h2>Issues ({})</h2>", issues.len())));
}

#[test]
fn test_export_after_element_removed() {
    let mut doc = page(r#"<h1>Gallery</h1><div class="grid"><img src="a.png"></div>"#);
    let issues = Evaluator::new().run(&doc).expect("run");
    let img_issue = issues
        .iter()
        .find(|i| i.title == "Missing alt attribute")
        .expect("img issue")
        .clone();

    let before = export::export_issue(&img_issue, &doc);
    assert_eq!(before.element, "IMG");
    assert_eq!(before.selector, "div.grid > img");

    let grid = doc.elements_by_tag(&["div"])[0];
    doc.detach(grid);

    let after = export::export_issue(&img_issue, &doc);
    assert_eq!(after.element, "BODY");
    assert_eq!(after.selector, "body");
    assert_eq!(img_issue.target.resolve(&doc), None);

    let report = RunReport::new("gallery.html", &issues, &doc);
    assert_eq!(report.summary.total, issues.len());
}

#[test]
fn test_scan_directory() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let root = dir.path();
    std::fs::write(root.join("a.html"), "<html><body><h1>A</h1></body></html>").expect("write");
    std::fs::write(root.join("b.htm"), r#"<html><body><h1>B</h1><img src="x.png"></body></html>"#)
        .expect("write");
    std::fs::write(root.join("notes.txt"), "<img>").expect("write");
    std::fs::create_dir_all(root.join("node_modules/pkg")).expect("mkdir");
    std::fs::write(root.join("node_modules/pkg/index.html"), "<img>").expect("write");
    std::fs::create_dir_all(root.join(".cache")).expect("mkdir");
    std::fs::write(root.join(".cache/page.html"), "<img>").expect("write");
    std::fs::create_dir_all(root.join("sub")).expect("mkdir");
    std::fs::write(root.join("sub/c.HTML"), "<html><body><h2>C</h2></body></html>").expect("write");

    let results = scanner::scan_directory(root, &Evaluator::new()).expect("scan");
    let names: Vec<String> = results
        .iter()
        .map(|r| r.path.strip_prefix(root).expect("under root").display().to_string())
        .collect();
    assert_eq!(names.len(), 3, "scanned: {:?}", names);
    assert!(names[0].ends_with("a.html"));
    assert!(names[1].ends_with("b.htm"));
    assert!(names[2].ends_with("c.HTML"));

    assert!(results[0].issues.is_empty());
    assert!(results[1].has_critical());
    assert_eq!(results[2].issues.len(), 1);
    assert_eq!(results[2].issues[0].title, "Missing h1");

    let total = scanner::total_summary(&results);
    assert_eq!(total.total, 2);
}

#[test]
fn test_scan_path_single_file() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let file = dir.path().join("index.html");
    std::fs::write(&file, "<html><body><h1>Home</h1></body></html>").expect("write");

    let results = scanner::scan_path(&file, &Evaluator::new()).expect("scan");
    assert_eq!(results.len(), 1);
    assert!(results[0].issues.is_empty());

    let json = scanner::render_results(&results, OutputFormat::Json).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value.as_array().map(Vec::len), Some(1));
}
