use serde_json::Value;

use crate::properties::path::PropertyPath;

/// Kind of customizable property discovered in an animation document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Color,
    Stroke,
    Scale,
    Axis,
    StateSwitch,
}

/// An addressable, typed, rewritable location within an animation document.
///
/// `value` holds the pristine capture taken at scan time; it is what
/// [`reset_properties`](crate::properties::reset_properties) restores.
/// Multiple records may share a logical `name` so writes fan out to every
/// matching node.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    pub name: String,
    pub kind: PropertyKind,
    pub path: PropertyPath,
    pub value: Value,
}

impl PropertyRecord {
    /// Classify a named-token property by its layer/group name. Colors are
    /// not named this way; they are matched through effect expressions.
    pub fn kind_for_name(name: &str) -> Option<PropertyKind> {
        match name {
            "stroke" | "stroke-layers" => Some(PropertyKind::Stroke),
            "scale" => Some(PropertyKind::Scale),
            "axis" => Some(PropertyKind::Axis),
            _ if name.starts_with("state-") => Some(PropertyKind::StateSwitch),
            _ => None,
        }
    }
}
