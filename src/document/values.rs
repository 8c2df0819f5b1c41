// SPDX-License-Identifier: PMPL-1.0-or-later
//! CSS value parsing: colors, lengths, font sizes and weights.
//!
//! This is the static host's stand-in for a browser's style resolution.
//! Everything here is lenient: unknown syntax yields `None` and the caller
//! keeps whatever value it had.

/// An sRGB color with alpha, as carried through the cascade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0.0 };

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Serialize the way `getComputedStyle` reports colors
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = (self.a * 1000.0).round() / 1000.0;
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

/// A parsed color value before `currentcolor` is resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CssColor {
    Value(Rgba),
    CurrentColor,
}

/// Parse a CSS color value
pub fn parse_color(value: &str) -> Option<CssColor> {
    let value = value.trim().to_ascii_lowercase();
    if value == "currentcolor" {
        return Some(CssColor::CurrentColor);
    }
    if value == "transparent" {
        return Some(CssColor::Value(Rgba::TRANSPARENT));
    }
    let rgba = if let Some(hex) = value.strip_prefix('#') {
        parse_hex(hex)
    } else if let Some(args) = function_args(&value, &["rgb", "rgba"]) {
        parse_rgb_args(args)
    } else if let Some(args) = function_args(&value, &["hsl", "hsla"]) {
        parse_hsl_args(args)
    } else {
        named_color(&value).map(|(r, g, b)| Rgba::opaque(r, g, b))
    }?;
    Some(CssColor::Value(rgba))
}

/// Parse `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa`
fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16).ok();
    let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba::opaque(short(0)?, short(1)?, short(2)?)),
        4 => Some(Rgba {
            a: f64::from(short(3)?) / 255.0,
            ..Rgba::opaque(short(0)?, short(1)?, short(2)?)
        }),
        6 => Some(Rgba::opaque(long(0)?, long(2)?, long(4)?)),
        8 => Some(Rgba {
            a: f64::from(long(6)?) / 255.0,
            ..Rgba::opaque(long(0)?, long(2)?, long(4)?)
        }),
        _ => None,
    }
}

/// Body of `name(...)` when `value` is a call to one of `names`
fn function_args<'a>(value: &'a str, names: &[&str]) -> Option<&'a str> {
    let open = value.find('(')?;
    let name = value[..open].trim();
    if !names.contains(&name) {
        return None;
    }
    value[open + 1..].strip_suffix(')')
}

/// Split functional color arguments in either comma or space syntax,
/// returning the channel components and the optional alpha component
fn split_color_args(args: &str) -> Option<(Vec<&str>, Option<&str>)> {
    let (channels, slash_alpha) = match args.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (args, None),
    };
    let mut parts: Vec<&str> = if channels.contains(',') {
        channels.split(',').map(str::trim).collect()
    } else {
        channels.split_whitespace().collect()
    };
    let alpha = match (slash_alpha, parts.len()) {
        (Some(alpha), 3) => Some(alpha),
        (None, 4) => parts.pop(),
        (None, 3) => None,
        _ => return None,
    };
    Some((parts, alpha))
}

fn parse_alpha(value: &str) -> Option<f64> {
    let alpha = match value.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0,
        None => value.trim().parse::<f64>().ok()?,
    };
    Some(alpha.clamp(0.0, 1.0))
}

fn parse_channel(value: &str) -> Option<u8> {
    let channel = match value.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok()? * 2.55,
        None => value.trim().parse::<f64>().ok()?,
    };
    Some(channel.round().clamp(0.0, 255.0) as u8)
}

fn parse_rgb_args(args: &str) -> Option<Rgba> {
    let (parts, alpha) = split_color_args(args)?;
    Some(Rgba {
        r: parse_channel(parts[0])?,
        g: parse_channel(parts[1])?,
        b: parse_channel(parts[2])?,
        a: alpha.map_or(Some(1.0), parse_alpha)?,
    })
}

fn parse_hsl_args(args: &str) -> Option<Rgba> {
    let (parts, alpha) = split_color_args(args)?;
    let hue: f64 = parts[0].trim_end_matches("deg").trim().parse().ok()?;
    let saturation = parts[1].strip_suffix('%')?.trim().parse::<f64>().ok()? / 100.0;
    let lightness = parts[2].strip_suffix('%')?.trim().parse::<f64>().ok()? / 100.0;
    let (r, g, b) = hsl_to_rgb(hue, saturation.clamp(0.0, 1.0), lightness.clamp(0.0, 1.0));
    Some(Rgba {
        r,
        g,
        b,
        a: alpha.map_or(Some(1.0), parse_alpha)?,
    })
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let hue = hue.rem_euclid(360.0) / 360.0;
    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;
    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };
    (channel(hue + 1.0 / 3.0), channel(hue), channel(hue - 1.0 / 3.0))
}

/// CSS named colors
#[rustfmt::skip]
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("aliceblue", (240, 248, 255)), ("antiquewhite", (250, 235, 215)), ("aqua", (0, 255, 255)),
    ("aquamarine", (127, 255, 212)), ("azure", (240, 255, 255)), ("beige", (245, 245, 220)),
    ("bisque", (255, 228, 196)), ("black", (0, 0, 0)), ("blanchedalmond", (255, 235, 205)),
    ("blue", (0, 0, 255)), ("blueviolet", (138, 43, 226)), ("brown", (165, 42, 42)),
    ("burlywood", (222, 184, 135)), ("cadetblue", (95, 158, 160)), ("chartreuse", (127, 255, 0)),
    ("chocolate", (210, 105, 30)), ("coral", (255, 127, 80)), ("cornflowerblue", (100, 149, 237)),
    ("cornsilk", (255, 248, 220)), ("crimson", (220, 20, 60)), ("cyan", (0, 255, 255)),
    ("darkblue", (0, 0, 139)), ("darkcyan", (0, 139, 139)), ("darkgoldenrod", (184, 134, 11)),
    ("darkgray", (169, 169, 169)), ("darkgreen", (0, 100, 0)), ("darkgrey", (169, 169, 169)),
    ("darkkhaki", (189, 183, 107)), ("darkmagenta", (139, 0, 139)), ("darkolivegreen", (85, 107, 47)),
    ("darkorange", (255, 140, 0)), ("darkorchid", (153, 50, 204)), ("darkred", (139, 0, 0)),
    ("darksalmon", (233, 150, 122)), ("darkseagreen", (143, 188, 143)), ("darkslateblue", (72, 61, 139)),
    ("darkslategray", (47, 79, 79)), ("darkslategrey", (47, 79, 79)), ("darkturquoise", (0, 206, 209)),
    ("darkviolet", (148, 0, 211)), ("deeppink", (255, 20, 147)), ("deepskyblue", (0, 191, 255)),
    ("dimgray", (105, 105, 105)), ("dimgrey", (105, 105, 105)), ("dodgerblue", (30, 144, 255)),
    ("firebrick", (178, 34, 34)), ("floralwhite", (255, 250, 240)), ("forestgreen", (34, 139, 34)),
    ("fuchsia", (255, 0, 255)), ("gainsboro", (220, 220, 220)), ("ghostwhite", (248, 248, 255)),
    ("gold", (255, 215, 0)), ("goldenrod", (218, 165, 32)), ("gray", (128, 128, 128)),
    ("green", (0, 128, 0)), ("greenyellow", (173, 255, 47)), ("grey", (128, 128, 128)),
    ("honeydew", (240, 255, 240)), ("hotpink", (255, 105, 180)), ("indianred", (205, 92, 92)),
    ("indigo", (75, 0, 130)), ("ivory", (255, 255, 240)), ("khaki", (240, 230, 140)),
    ("lavender", (230, 230, 250)), ("lavenderblush", (255, 240, 245)), ("lawngreen", (124, 252, 0)),
    ("lemonchiffon", (255, 250, 205)), ("lightblue", (173, 216, 230)), ("lightcoral", (240, 128, 128)),
    ("lightcyan", (224, 255, 255)), ("lightgoldenrodyellow", (250, 250, 210)), ("lightgray", (211, 211, 211)),
    ("lightgreen", (144, 238, 144)), ("lightgrey", (211, 211, 211)), ("lightpink", (255, 182, 193)),
    ("lightsalmon", (255, 160, 122)), ("lightseagreen", (32, 178, 170)), ("lightskyblue", (135, 206, 250)),
    ("lightslategray", (119, 136, 153)), ("lightslategrey", (119, 136, 153)), ("lightsteelblue", (176, 196, 222)),
    ("lightyellow", (255, 255, 224)), ("lime", (0, 255, 0)), ("limegreen", (50, 205, 50)),
    ("linen", (250, 240, 230)), ("magenta", (255, 0, 255)), ("maroon", (128, 0, 0)),
    ("mediumaquamarine", (102, 205, 170)), ("mediumblue", (0, 0, 205)), ("mediumorchid", (186, 85, 211)),
    ("mediumpurple", (147, 112, 219)), ("mediumseagreen", (60, 179, 113)), ("mediumslateblue", (123, 104, 238)),
    ("mediumspringgreen", (0, 250, 154)), ("mediumturquoise", (72, 209, 204)), ("mediumvioletred", (199, 21, 133)),
    ("midnightblue", (25, 25, 112)), ("mintcream", (245, 255, 250)), ("mistyrose", (255, 228, 225)),
    ("moccasin", (255, 228, 181)), ("navajowhite", (255, 222, 173)), ("navy", (0, 0, 128)),
    ("oldlace", (253, 245, 230)), ("olive", (128, 128, 0)), ("olivedrab", (107, 142, 35)),
    ("orange", (255, 165, 0)), ("orangered", (255, 69, 0)), ("orchid", (218, 112, 214)),
    ("palegoldenrod", (238, 232, 170)), ("palegreen", (152, 251, 152)), ("paleturquoise", (175, 238, 238)),
    ("palevioletred", (219, 112, 147)), ("papayawhip", (255, 239, 213)), ("peachpuff", (255, 218, 185)),
    ("peru", (205, 133, 63)), ("pink", (255, 192, 203)), ("plum", (221, 160, 221)),
    ("powderblue", (176, 224, 230)), ("purple", (128, 0, 128)), ("rebeccapurple", (102, 51, 153)),
    ("red", (255, 0, 0)), ("rosybrown", (188, 143, 143)), ("royalblue", (65, 105, 225)),
    ("saddlebrown", (139, 69, 19)), ("salmon", (250, 128, 114)), ("sandybrown", (244, 164, 96)),
    ("seagreen", (46, 139, 87)), ("seashell", (255, 245, 238)), ("sienna", (160, 82, 45)),
    ("silver", (192, 192, 192)), ("skyblue", (135, 206, 235)), ("slateblue", (106, 90, 205)),
    ("slategray", (112, 128, 144)), ("slategrey", (112, 128, 144)), ("snow", (255, 250, 250)),
    ("springgreen", (0, 255, 127)), ("steelblue", (70, 130, 180)), ("tan", (210, 180, 140)),
    ("teal", (0, 128, 128)), ("thistle", (216, 191, 216)), ("tomato", (255, 99, 71)),
    ("turquoise", (64, 224, 208)), ("violet", (238, 130, 238)), ("wheat", (245, 222, 179)),
    ("white", (255, 255, 255)), ("whitesmoke", (245, 245, 245)), ("yellow", (255, 255, 0)),
    ("yellowgreen", (154, 205, 50)),
];

fn named_color(name: &str) -> Option<(u8, u8, u8)> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, rgb)| rgb)
}

/// `parseInt`-style integer prefix: leading whitespace, optional sign, digits
pub fn parse_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// `parseFloat`-style number prefix (e.g. `"18.5px"` -> 18.5)
pub fn parse_number_prefix(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().ok()
}

/// Root font size used for `rem`
const ROOT_FONT_PX: f64 = 16.0;

/// Resolve a length to pixels. `em` and `%` are relative to `font_px`.
pub fn parse_length_px(value: &str, font_px: f64) -> Option<f64> {
    let value = value.trim().to_ascii_lowercase();
    if value == "0" {
        return Some(0.0);
    }
    const UNITS: &[(&str, f64)] = &[
        ("px", 1.0),
        ("pt", 4.0 / 3.0),
        ("pc", 16.0),
        ("in", 96.0),
        ("cm", 96.0 / 2.54),
        ("mm", 96.0 / 25.4),
    ];
    if let Some(n) = value.strip_suffix("rem") {
        return n.trim().parse::<f64>().ok().map(|n| n * ROOT_FONT_PX);
    }
    if let Some(n) = value.strip_suffix("em") {
        return n.trim().parse::<f64>().ok().map(|n| n * font_px);
    }
    if let Some(n) = value.strip_suffix('%') {
        return n.trim().parse::<f64>().ok().map(|n| n / 100.0 * font_px);
    }
    UNITS.iter().find_map(|(unit, factor)| {
        value
            .strip_suffix(unit)
            .and_then(|n| n.trim().parse::<f64>().ok())
            .map(|n| n * factor)
    })
}

/// Resolve a `font-size` value against the parent's size
pub fn parse_font_size(value: &str, parent_px: f64) -> Option<f64> {
    let keyword = match value.trim().to_ascii_lowercase().as_str() {
        "xx-small" => Some(9.0),
        "x-small" => Some(10.0),
        "small" => Some(13.0),
        "medium" => Some(16.0),
        "large" => Some(18.0),
        "x-large" => Some(24.0),
        "xx-large" => Some(32.0),
        "xxx-large" => Some(48.0),
        "smaller" => Some(parent_px / 1.2),
        "larger" => Some(parent_px * 1.2),
        _ => None,
    };
    keyword
        .or_else(|| parse_length_px(value, parent_px))
        .filter(|px| *px >= 0.0)
}

/// Resolve a `font-weight` value against the parent's weight
pub fn parse_font_weight(value: &str, parent: u16) -> Option<u16> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(400),
        "bold" => Some(700),
        "bolder" => Some(match parent {
            0..=349 => 400,
            350..=549 => 700,
            _ => 900,
        }),
        "lighter" => Some(match parent {
            0..=549 => 100,
            550..=749 => 400,
            _ => 700,
        }),
        other => other
            .parse::<f64>()
            .ok()
            .filter(|w| (1.0..=1000.0).contains(w))
            .map(|w| w.round() as u16),
    }
}

/// Split a declaration value on whitespace, keeping parenthesized groups whole
pub fn split_components(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    for (i, c) in value.char_indices() {
        match c {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    parts.push(&value[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        parts.push(&value[s..]);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(value: &str) -> Option<Rgba> {
        match parse_color(value)? {
            CssColor::Value(c) => Some(c),
            CssColor::CurrentColor => None,
        }
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(rgba("#fff"), Some(Rgba::opaque(255, 255, 255)));
        assert_eq!(rgba("#1D4ED8"), Some(Rgba::opaque(29, 78, 216)));
        assert_eq!(rgba("#00000080").map(|c| c.a > 0.49 && c.a < 0.51), Some(true));
        assert_eq!(rgba("#12"), None);
        assert_eq!(rgba("#ggg"), None);
    }

    #[test]
    fn test_functional_colors() {
        assert_eq!(rgba("rgb(10, 20, 30)"), Some(Rgba::opaque(10, 20, 30)));
        assert_eq!(rgba("rgb(10 20 30 / 50%)").map(|c| c.a), Some(0.5));
        assert_eq!(rgba("rgba(255,0,0,0.25)").map(|c| (c.r, c.a)), Some((255, 0.25)));
        assert_eq!(rgba("rgb(100%, 0%, 0%)"), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(rgba("hsl(0, 100%, 50%)"), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(rgba("hsl(120deg 100% 25%)"), Some(Rgba::opaque(0, 128, 0)));
        assert_eq!(rgba("rgb(1, 2)"), None);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(rgba("Navy"), Some(Rgba::opaque(0, 0, 128)));
        assert_eq!(rgba("transparent"), Some(Rgba::TRANSPARENT));
        assert_eq!(parse_color("currentColor"), Some(CssColor::CurrentColor));
        assert_eq!(parse_color("linear-gradient(#fff, #000)"), None);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(Rgba::opaque(1, 2, 3).to_css(), "rgb(1, 2, 3)");
        assert_eq!(Rgba::TRANSPARENT.to_css(), "rgba(0, 0, 0, 0)");
        assert_eq!(Rgba { a: 0.5, ..Rgba::BLACK }.to_css(), "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("5"), Some(5));
        assert_eq!(parse_integer(" -1"), Some(-1));
        assert_eq!(parse_integer("2abc"), Some(2));
        assert_eq!(parse_integer("abc"), None);
        assert_eq!(parse_integer(""), None);
    }

    #[test]
    fn test_lengths() {
        assert_eq!(parse_length_px("12px", 16.0), Some(12.0));
        assert_eq!(parse_length_px("1.5em", 16.0), Some(24.0));
        assert_eq!(parse_length_px("2rem", 10.0), Some(32.0));
        assert_eq!(parse_length_px("150%", 16.0), Some(24.0));
        assert_eq!(parse_length_px("18pt", 16.0), Some(24.0));
        assert_eq!(parse_length_px("0", 16.0), Some(0.0));
        assert_eq!(parse_length_px("auto", 16.0), None);
        assert_eq!(parse_number_prefix("18.66px"), Some(18.66));
    }

    #[test]
    fn test_font_weight() {
        assert_eq!(parse_font_weight("bold", 400), Some(700));
        assert_eq!(parse_font_weight("600", 400), Some(600));
        assert_eq!(parse_font_weight("bolder", 400), Some(700));
        assert_eq!(parse_font_weight("heavy", 400), None);
    }

    #[test]
    fn test_split_components() {
        assert_eq!(
            split_components("2px solid rgb(0, 0, 0)"),
            vec!["2px", "solid", "rgb(0, 0, 0)"]
        );
        assert_eq!(split_components("  #fff  url(a b.png) "), vec!["#fff", "url(a b.png)"]);
    }
}
