// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11ybot - WCAG 2.x accessibility evaluator for rendered pages
//!
//! a11ybot walks a rendered document through a read-only accessor, runs eight
//! checks over it, and reports each finding with a severity, a WCAG success
//! criterion and a weak reference to the offending element. Results feed a
//! text panel, an overlay renderer and JSON/CSV/HTML exports.
//!
//! ## Rules
//!
//! - **Images** (1.1.1): missing, empty and redundant alt text
//! - **Headings** (1.3.1): skipped levels, empty headings, the page h1
//! - **Links** (2.4.4): empty, vague and non-functional links
//! - **Forms** (1.3.1): labels, placeholder-only labelling, fieldsets
//! - **Contrast** (1.4.3): computed text/background contrast
//! - **ARIA** (4.1.2): roles, hidden focusable content, labelledby references
//! - **Focus** (2.4.7): heuristic for missing focus indicators
//! - **Keyboard** (2.1.1/2.4.3): tab order, click handlers, mouse-only events

pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod evaluator;
pub mod issues;
pub mod overlay;
pub mod report;
pub mod rules;
pub mod scanner;
