use serde_json::Value;

use crate::properties::path::PropertyPath;
use crate::properties::record::{PropertyKind, PropertyRecord};

/// Extract the effect name from an expression such as
/// `effect('primary')('Color')`. The capture is lowercased.
fn color_effect_name(expression: &str) -> Option<String> {
    let start = expression.find("effect('")? + "effect('".len();
    let rest = &expression[start..];
    let end = rest.find("')")?;
    if !rest[end..].starts_with("')('Color')") {
        return None;
    }
    Some(rest[..end].to_ascii_lowercase())
}

/// Scan an animation document for customizable properties.
///
/// Walks every enumerable child in first-seen order. Two conventions are
/// recognized:
///
/// - objects whose `"x"` expression references `effect('<name>')('Color')`
///   become color records addressing the sibling `"k"` value,
/// - objects whose `"nm"` is `stroke`, `stroke-layers`, `scale`, `axis`, or
///   prefixed `state-` become records addressing their `"v"."k"` value.
///
/// Duplicate names accumulate as independent records sharing the same
/// logical name.
pub fn read_properties(document: &Value) -> Vec<PropertyRecord> {
    let mut records = Vec::new();
    visit(document, &PropertyPath::new(), &mut records);
    records
}

fn visit(node: &Value, path: &PropertyPath, records: &mut Vec<PropertyRecord>) {
    if let Value::Object(fields) = node {
        if let Some(expression) = fields.get("x").and_then(Value::as_str) {
            if let Some(name) = color_effect_name(expression) {
                if let Some(value) = fields.get("k") {
                    records.push(PropertyRecord {
                        name,
                        kind: PropertyKind::Color,
                        path: path.key("k"),
                        value: value.clone(),
                    });
                }
            }
        }

        if let Some(name) = fields.get("nm").and_then(Value::as_str) {
            if let Some(kind) = PropertyRecord::kind_for_name(name) {
                if let Some(value) = fields.get("v").and_then(|v| v.get("k")) {
                    records.push(PropertyRecord {
                        name: name.to_string(),
                        kind,
                        path: path.key("v").key("k"),
                        value: value.clone(),
                    });
                }
            }
        }
    }

    match node {
        Value::Object(fields) => {
            for (key, child) in fields {
                visit(child, &path.key(key), records);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                visit(child, &path.index(index), records);
            }
        }
        _ => {}
    }
}
