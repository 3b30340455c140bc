use motif_helpers::{parse_color, parse_colors, parse_state, parse_stroke, parse_stroke_legacy};

#[test]
fn test_parse_color_named_table() {
    assert_eq!(parse_color("red"), "#ff0000");
    assert_eq!(parse_color("Blue"), "#0000ff");
    assert_eq!(parse_color("rebeccapurple"), "#663399");
}

#[test]
fn test_parse_color_shorthand_expansion() {
    assert_eq!(parse_color("#abc"), "#aabbcc");
    assert_eq!(parse_color("#f00"), "#ff0000");
}

#[test]
fn test_parse_colors_mixed_forms() {
    let colors = parse_colors("primary:red,secondary:#00f").unwrap();
    assert_eq!(colors.len(), 2);
    assert_eq!(colors["primary"], "#ff0000");
    assert_eq!(colors["secondary"], "#0000ff");
}

#[test]
fn test_parse_colors_keys_are_lowercased() {
    let colors = parse_colors("Primary:#fdd394").unwrap();
    assert_eq!(colors["primary"], "#fdd394");
}

#[test]
fn test_parse_colors_drops_malformed_pairs() {
    let colors = parse_colors("primary:#fdd394,broken,too:many:parts,:").unwrap();
    // A bare `:` still splits into two (empty) segments and is kept.
    assert_eq!(colors.len(), 2);
    assert_eq!(colors["primary"], "#fdd394");
    assert_eq!(colors[""], "#000000");

    assert!(parse_colors("").is_none());
}

#[test]
fn test_parse_stroke_supported_range() {
    assert_eq!(parse_stroke("bold"), Some(3.0));
    assert_eq!(parse_stroke("3"), Some(3.0));
    assert_eq!(parse_stroke("light"), Some(1.0));
    assert_eq!(parse_stroke("regular"), Some(2.0));
    assert_eq!(parse_stroke("2"), Some(2.0));
}

#[test]
fn test_parse_stroke_rejects_invalid() {
    assert_eq!(parse_stroke("invalid"), None);
    assert_eq!(parse_stroke("4"), None);
    assert_eq!(parse_stroke(""), None);
}

#[test]
fn test_parse_stroke_legacy_numeric_passthrough() {
    assert_eq!(parse_stroke_legacy("50"), Some(50.0));
    assert_eq!(parse_stroke_legacy("2.5"), Some(2.5));
    assert_eq!(parse_stroke_legacy("bold"), Some(3.0));
    assert_eq!(parse_stroke_legacy("invalid"), None);
}

#[test]
fn test_parse_state_passthrough() {
    assert_eq!(parse_state("hover-pinch"), Some("hover-pinch".to_string()));
    assert_eq!(parse_state(""), None);
}
