// SPDX-License-Identifier: PMPL-1.0-or-later
//! Stylesheet collection and a minimal cascade for static documents.
//!
//! Cascade order: user-agent defaults, then author rules sorted by
//! importance, specificity and source order, with the inline `style`
//! attribute winning ties at each importance level. `color`, `font-size` and
//! `font-weight` inherit; backgrounds and outlines do not.
//!
//! Only the properties the rules read are computed.

use super::values::{self, CssColor, Rgba};
use super::StyleProperty;
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;
use tracing::trace;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));

/// Selectors that depend on interaction or generated content never match a
/// static document
static STATEFUL_SELECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i):(hover|focus|focus-visible|focus-within|active|visited|target)\b|::?(before|after|placeholder|selection|marker|first-line|first-letter)\b",
    )
    .expect("valid regex")
});

static ID_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\w-]+").expect("valid regex"));
static CLASS_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[\w-]+|\[[^\]]*\]|:[\w-]+").expect("valid regex"));
static TYPE_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s>+~(])([a-zA-Z][\w-]*)").expect("valid regex"));

/// Outline styles that count as "no outline"
const OUTLINE_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
    "auto",
];

/// Initial outline width (`medium`)
const MEDIUM_OUTLINE_PX: f64 = 3.0;

/// Selector specificity as (ids, classes/attributes/pseudo-classes, types)
pub type Specificity = (u32, u32, u32);

/// Approximate specificity of a single complex selector
pub fn specificity(selector: &str) -> Specificity {
    let ids = ID_PART.find_iter(selector).count() as u32;
    let classes = CLASS_PART.find_iter(selector).count() as u32;
    let types = TYPE_PART.captures_iter(selector).count() as u32;
    (ids, classes, types)
}

/// One `name: value` pair
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

/// Parse the body of a rule block or an inline `style` attribute
pub fn parse_declarations(block: &str) -> Vec<Declaration> {
    block
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            let (value, important) = match value.to_ascii_lowercase().rfind("!important") {
                Some(pos) => (value[..pos].trim(), true),
                None => (value, false),
            };
            Some(Declaration {
                name,
                value: value.to_string(),
                important,
            })
        })
        .collect()
}

/// A style rule with a single selector
#[derive(Debug)]
pub struct StyleRule {
    pub selector: Selector,
    pub specificity: Specificity,
    pub declarations: Vec<Declaration>,
}

/// All author rules of a document, in source order
#[derive(Debug, Default)]
pub struct Stylesheet {
    rules: Vec<StyleRule>,
}

impl Stylesheet {
    pub fn parse(css: &str) -> Self {
        let css = COMMENT.replace_all(css, "");
        let mut sheet = Stylesheet::default();
        sheet.collect(&css);
        sheet
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    fn collect(&mut self, css: &str) {
        let mut rest = css;
        while let Some(open) = rest.find('{') {
            let Some(close) = matching_brace(rest, open) else {
                break;
            };
            // Statement at-rules (`@import ...;`) end at a semicolon before the block
            let prelude = rest[..open].rsplit(';').next().unwrap_or_default().trim();
            let body = &rest[open + 1..close];

            if let Some(at_rule) = prelude.strip_prefix('@') {
                let at_rule = at_rule.to_ascii_lowercase();
                if at_rule.starts_with("media") || at_rule.starts_with("supports") {
                    self.collect(body);
                }
            } else {
                self.push_rule(prelude, body);
            }
            rest = &rest[close + 1..];
        }
    }

    fn push_rule(&mut self, selectors: &str, body: &str) {
        let declarations = parse_declarations(body);
        if declarations.is_empty() {
            return;
        }
        for text in selectors.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if STATEFUL_SELECTOR.is_match(text) {
                continue;
            }
            match Selector::parse(text) {
                Ok(selector) => self.rules.push(StyleRule {
                    selector,
                    specificity: specificity(text),
                    declarations: declarations.clone(),
                }),
                Err(_) => trace!("Ignoring unsupported selector: {}", text),
            }
        }
    }
}

fn matching_brace(css: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in css[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Computed values for the properties the rules read
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub color: Rgba,
    pub background_color: Rgba,
    pub font_size_px: f64,
    pub font_weight: u16,
    pub outline_style: String,
    pub outline_width_px: f64,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            background_color: Rgba::TRANSPARENT,
            font_size_px: 16.0,
            font_weight: 400,
            outline_style: "none".to_string(),
            outline_width_px: MEDIUM_OUTLINE_PX,
        }
    }
}

impl ComputedStyle {
    /// Start from the parent's inherited values and initial values for the rest
    fn inherit(parent: &ComputedStyle) -> Self {
        Self {
            color: parent.color,
            font_size_px: parent.font_size_px,
            font_weight: parent.font_weight,
            ..Self::default()
        }
    }

    /// Serialized computed value, as `getComputedStyle` would report it
    pub fn value(&self, property: StyleProperty) -> String {
        match property {
            StyleProperty::Color => self.color.to_css(),
            StyleProperty::BackgroundColor => self.background_color.to_css(),
            StyleProperty::FontSize => format!("{}px", round2(self.font_size_px)),
            StyleProperty::FontWeight => self.font_weight.to_string(),
            StyleProperty::OutlineStyle => self.outline_style.clone(),
            StyleProperty::OutlineWidth => {
                if self.outline_style == "none" {
                    "0px".to_string()
                } else {
                    format!("{}px", round2(self.outline_width_px))
                }
            }
        }
    }

    /// Run the cascade for one element.
    ///
    /// `author` must already be sorted by specificity and source order.
    pub fn compute(
        tag: &str,
        has_href: bool,
        parent: Option<&ComputedStyle>,
        author: &[&Declaration],
        inline: &[Declaration],
    ) -> Self {
        let root = ComputedStyle::default();
        let parent = parent.unwrap_or(&root);
        let mut style = ComputedStyle::inherit(parent);
        style.apply_user_agent(tag, has_href, parent);

        let normal = author
            .iter()
            .copied()
            .filter(|d| !d.important)
            .chain(inline.iter().filter(|d| !d.important));
        let important = author
            .iter()
            .copied()
            .filter(|d| d.important)
            .chain(inline.iter().filter(|d| d.important));

        let mut background = CssColor::Value(style.background_color);
        for decl in normal.chain(important) {
            style.apply(decl, parent, &mut background);
        }
        // currentcolor takes the element's final color
        style.background_color = match background {
            CssColor::Value(color) => color,
            CssColor::CurrentColor => style.color,
        };
        style
    }

    fn apply_user_agent(&mut self, tag: &str, has_href: bool, parent: &ComputedStyle) {
        let heading_scale = match tag {
            "h1" => Some(2.0),
            "h2" => Some(1.5),
            "h3" => Some(1.17),
            "h4" => Some(1.0),
            "h5" => Some(0.83),
            "h6" => Some(0.67),
            _ => None,
        };
        if let Some(scale) = heading_scale {
            self.font_size_px = parent.font_size_px * scale;
            self.font_weight = 700;
        }
        match tag {
            "b" | "strong" | "th" => self.font_weight = 700,
            "small" => self.font_size_px = parent.font_size_px / 1.2,
            "a" if has_href => self.color = Rgba::opaque(0, 0, 238),
            _ => {}
        }
    }

    fn apply(&mut self, decl: &Declaration, parent: &ComputedStyle, background: &mut CssColor) {
        let value = decl.value.as_str();
        let keyword = value.to_ascii_lowercase();
        match decl.name.as_str() {
            "color" => match keyword.as_str() {
                "inherit" => self.color = parent.color,
                "initial" => self.color = Rgba::BLACK,
                _ => match values::parse_color(value) {
                    Some(CssColor::Value(color)) => self.color = color,
                    Some(CssColor::CurrentColor) => self.color = parent.color,
                    None => {}
                },
            },
            "background-color" => match keyword.as_str() {
                "inherit" => *background = CssColor::Value(parent.background_color),
                "initial" => *background = CssColor::Value(Rgba::TRANSPARENT),
                _ => {
                    if let Some(color) = values::parse_color(value) {
                        *background = color;
                    }
                }
            },
            "background" => {
                *background = match keyword.as_str() {
                    "inherit" => CssColor::Value(parent.background_color),
                    _ => values::split_components(value)
                        .into_iter()
                        .find_map(values::parse_color)
                        .unwrap_or(CssColor::Value(Rgba::TRANSPARENT)),
                };
            }
            "font-size" => {
                if keyword == "inherit" {
                    self.font_size_px = parent.font_size_px;
                } else if let Some(px) = values::parse_font_size(value, parent.font_size_px) {
                    self.font_size_px = px;
                }
            }
            "font-weight" => {
                if keyword == "inherit" {
                    self.font_weight = parent.font_weight;
                } else if let Some(weight) = values::parse_font_weight(value, parent.font_weight) {
                    self.font_weight = weight;
                }
            }
            "font" => self.apply_font_shorthand(&keyword, parent),
            "outline-style" => {
                if OUTLINE_STYLES.contains(&keyword.as_str()) {
                    self.outline_style = keyword;
                }
            }
            "outline-width" => {
                if let Some(px) = outline_width(&keyword, self.font_size_px) {
                    self.outline_width_px = px;
                }
            }
            "outline" => self.apply_outline_shorthand(&keyword),
            _ => {}
        }
    }

    /// `font: [style] [weight] size[/line-height] family`.
    ///
    /// An omitted weight resets to `normal`; a value without a size is
    /// invalid and leaves the font untouched.
    fn apply_font_shorthand(&mut self, value: &str, parent: &ComputedStyle) {
        if value.trim() == "inherit" {
            self.font_size_px = parent.font_size_px;
            self.font_weight = parent.font_weight;
            return;
        }
        let mut weight = 400;
        for part in values::split_components(value) {
            let size = part.split('/').next().unwrap_or_default();
            if let Some(px) = values::parse_font_size(size, parent.font_size_px) {
                self.font_size_px = px;
                self.font_weight = weight;
                return;
            }
            if let Some(parsed) = values::parse_font_weight(part, parent.font_weight) {
                weight = parsed;
            }
        }
    }

    /// `outline: [width] [style] [color]`; omitted parts reset to initial
    fn apply_outline_shorthand(&mut self, value: &str) {
        self.outline_style = "none".to_string();
        self.outline_width_px = MEDIUM_OUTLINE_PX;
        for part in values::split_components(value) {
            if OUTLINE_STYLES.contains(&part) {
                self.outline_style = part.to_string();
            } else if let Some(px) = outline_width(part, self.font_size_px) {
                self.outline_width_px = px;
            }
        }
    }
}

fn outline_width(value: &str, font_px: f64) -> Option<f64> {
    match value {
        "thin" => Some(1.0),
        "medium" => Some(MEDIUM_OUTLINE_PX),
        "thick" => Some(5.0),
        other => values::parse_length_px(other, font_px),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
