//! Motif Helpers
//!
//! Pure helpers shared by the Motif icon toolkit: compact-string parsers for
//! customization attributes, the named color table, and the property
//! locator/rewriter that addresses color, stroke, scale, axis, and
//! state-switch values inside a nested animation document.

pub mod colors;
pub mod parsers;
pub mod properties;
pub mod state;

pub use colors::{hex_to_channels, lookup_color, rgb_to_hex, value_to_hex};
pub use parsers::{parse_color, parse_colors, parse_state, parse_stroke, parse_stroke_legacy};
pub use properties::{
    get_value, read_properties, reset_properties, set_value, update_color_properties,
    update_numeric_properties, PathSegment, PropertyKind, PropertyPath, PropertyRecord,
};
pub use state::{apply_frame_extents, read_states, select_state, State};

/// Icon data in JSON format, as produced by animation authoring tools.
/// The document is treated as opaque except for the naming conventions
/// recognized by [`read_properties`] and the marker list read by
/// [`read_states`].
pub type IconData = serde_json::Value;
