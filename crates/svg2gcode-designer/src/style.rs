//! Stroke color and transform attribute helpers.

use svg2gcode_core::Transform;

/// Trims, lower-cases and `#`-prefixes a color value. Empty input yields `None`.
pub fn normalize_color(color: &str) -> Option<String> {
    let s = color.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }
    if s.starts_with('#') {
        Some(s)
    } else {
        Some(format!("#{s}"))
    }
}

/// Resolves an element's own stroke color.
///
/// A non-empty `stroke` attribute wins over a `stroke:` declaration in `style`.
pub fn extract_stroke_color(stroke: Option<&str>, style: Option<&str>) -> Option<String> {
    if let Some(color) = stroke.and_then(normalize_color) {
        return Some(color);
    }
    style?
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("stroke"))
        .and_then(|(_, value)| normalize_color(value))
}

/// Parses a `transform` attribute.
///
/// Only `translate(tx[,ty])` is honored; anything else maps to identity.
pub fn parse_transform_attr(attr: &str) -> Transform {
    let s = attr.trim();
    let Some(rest) = s.strip_prefix("translate") else {
        return Transform::identity();
    };
    let (Some(open), Some(close)) = (rest.find('('), rest.find(')')) else {
        return Transform::identity();
    };
    if close <= open {
        return Transform::identity();
    }

    let mut args = rest[open + 1..close]
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|a| !a.is_empty())
        .map(|a| a.parse::<f64>().unwrap_or(0.0));
    let tx = args.next().unwrap_or(0.0);
    let ty = args.next().unwrap_or(0.0);
    Transform::translate(tx, ty)
}

/// Parses a length attribute such as `100`, `210mm` or `50.5px`, ignoring the unit suffix.
pub fn parse_length(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
        .trim()
        .parse()
        .ok()
}

/// Returns the first `max_chars` characters of `s`, followed by `...` if it was cut.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
