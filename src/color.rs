// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color model - relative luminance and contrast ratio per WCAG 2.x
//!
//! Colors reach the rules as computed-style strings. [`parse_color`] hands the
//! string to the host's color resolution and pattern-matches the resolved
//! `rgb(...)`/`rgba(...)` form, so any syntax the host understands (named,
//! hex, functional) ends up as the same opaque channel triple.

use crate::document::DocumentAccessor;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Linear-light threshold of the sRGB companding curve
const SRGB_THRESHOLD: f64 = 0.03928;

static RESOLVED_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rgba?\((\d+),\s*(\d+),\s*(\d+)(?:,\s*([\d.]+))?").expect("valid regex")
});

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= SRGB_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Calculate relative luminance per WCAG 2.x, in `[0, 1]`
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminance(color: Color) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Calculate the contrast ratio between two colors.
/// Returns a ratio >= 1.0 (e.g., 4.5, 7.0, 21.0) and is symmetric in its arguments.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let l1 = relative_luminance(a);
    let l2 = relative_luminance(b);
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

/// Resolve any CSS color string to a channel triple through the host.
///
/// Returns `None` when the host cannot resolve the value, or when the
/// resolved form carries no usable triple (gradients, fully transparent).
pub fn parse_color(doc: &dyn DocumentAccessor, value: &str) -> Option<Color> {
    let resolved = doc.resolve_color(value)?;
    extract_channels(&resolved)
}

/// Pattern-match a resolved `rgb(r, g, b)` / `rgba(r, g, b, a)` string.
pub fn extract_channels(resolved: &str) -> Option<Color> {
    let caps = RESOLVED_COLOR.captures(resolved)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;

    if let Some(alpha) = caps.get(4) {
        let alpha: f64 = alpha.as_str().parse().ok()?;
        if alpha <= 0.0 {
            return None;
        }
    }

    Some(Color::new(r, g, b))
}
