// SPDX-License-Identifier: PMPL-1.0-or-later
//! Static configuration.
//!
//! a11ybot has no configuration file and reads no environment variables.
//! Everything tunable lives here as a constant and is fixed at build time.

use crate::issues::Severity;

/// Maximum length of an exported selector path, in characters.
pub const SELECTOR_PATH_LIMIT: usize = 100;

/// Default file name for the JSON export.
pub const JSON_REPORT_FILE: &str = "a11ybot-report.json";

/// Default file name for the CSV export.
pub const CSV_REPORT_FILE: &str = "a11ybot-report.csv";

/// Default file name for the printable HTML export.
pub const HTML_REPORT_FILE: &str = "a11ybot-report.html";

/// Severity to display color mapping used by overlays and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub critical: &'static str,
    pub major: &'static str,
    pub minor: &'static str,
}

impl Palette {
    /// Color for a severity
    pub fn color(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Critical => self.critical,
            Severity::Major => self.major,
            Severity::Minor => self.minor,
        }
    }
}

/// The fixed severity palette.
pub const PALETTE: Palette = Palette {
    critical: "#dc2626",
    major: "#ea580c",
    minor: "#ca8a04",
};
