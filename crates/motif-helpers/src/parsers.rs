//! Parsers for the compact string encodings used by customization
//! attributes. Malformed input degrades to "no value" instead of failing,
//! since customization is advisory.

use std::collections::HashMap;

use crate::colors::lookup_color;

/// Resolve a color given as `#rgb`, `#rrggbb`, or a CSS color name.
///
/// Shorthand hex expands to the full form, any other `#`-prefixed value
/// passes through unchanged, and unknown names fall back to black.
///
/// ```
/// assert_eq!(motif_helpers::parse_color("blue"), "#0000ff");
/// assert_eq!(motif_helpers::parse_color("#08c"), "#0088cc");
/// ```
pub fn parse_color(input: &str) -> String {
    if let Some(digits) = input.strip_prefix('#') {
        if digits.len() == 3 {
            let mut expanded = String::with_capacity(7);
            expanded.push('#');
            for ch in digits.chars() {
                expanded.push(ch);
                expanded.push(ch);
            }
            return expanded;
        }
        return input.to_string();
    }

    lookup_color(input).unwrap_or("#000000").to_string()
}

/// Parse a colors attribute of the form `"primary:#fdd394,secondary:03a9f4"`.
///
/// Pairs that do not split into exactly two segments are dropped silently;
/// keys are lowercased. Returns `None` for empty input.
pub fn parse_colors(input: &str) -> Option<HashMap<String, String>> {
    if input.is_empty() {
        return None;
    }

    let mut colors = HashMap::new();

    for pair in input.split(',').filter(|pair| !pair.is_empty()) {
        let mut segments = pair.split(':');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(name), Some(color), None) => {
                colors.insert(name.to_ascii_lowercase(), parse_color(color));
            }
            _ => {
                log::debug!("dropping malformed color pair: {pair:?}");
            }
        }
    }

    Some(colors)
}

/// Parse a stroke attribute to the supported range.
///
/// Accepts `1`/`2`/`3` in numeric or string form and the aliases
/// `light`/`regular`/`bold`. Anything else yields `None`.
pub fn parse_stroke(input: &str) -> Option<f64> {
    match input {
        "light" | "1" => Some(1.0),
        "regular" | "2" => Some(2.0),
        "bold" | "3" => Some(3.0),
        _ => None,
    }
}

/// Stroke parser for legacy (marker-less) icon files: canonical values map as
/// in [`parse_stroke`], and any other coercible number passes through
/// unclamped.
pub fn parse_stroke_legacy(input: &str) -> Option<f64> {
    parse_stroke(input).or_else(|| input.parse::<f64>().ok().filter(|value| value.is_finite()))
}

/// Parse a state attribute: pass-through for non-empty strings.
pub fn parse_state(input: &str) -> Option<String> {
    if input.is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_color_name_defaults_to_black() {
        assert_eq!(parse_color("no-such-color"), "#000000");
    }

    #[test]
    fn hex_passes_through() {
        assert_eq!(parse_color("#fdd394"), "#fdd394");
        // Longer or malformed hex is kept as-is, not validated here.
        assert_eq!(parse_color("#0088cc00"), "#0088cc00");
    }

    #[test]
    fn legacy_stroke_passthrough() {
        assert_eq!(parse_stroke_legacy("bold"), Some(3.0));
        assert_eq!(parse_stroke_legacy("40"), Some(40.0));
        assert_eq!(parse_stroke_legacy("wide"), None);
    }
}
