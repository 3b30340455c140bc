use serde_json::Value;

use crate::colors::hex_to_channels;
use crate::properties::path::PropertyPath;
use crate::properties::record::PropertyRecord;

/// Read the current value at a path. Returns `None` when the path no longer
/// resolves against the given document.
#[inline]
pub fn get_value<'a>(document: &'a Value, path: &PropertyPath) -> Option<&'a Value> {
    path.resolve(document)
}

/// Write a value at a path, in place. A path that no longer resolves is
/// silently ignored; returns whether the write happened.
pub fn set_value(document: &mut Value, path: &PropertyPath, value: Value) -> bool {
    match path.resolve_mut(document) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => {
            log::debug!("property path {path} no longer resolves, skipping write");
            false
        }
    }
}

/// Overwrite every record's target with a numeric value.
pub fn update_numeric_properties(document: &mut Value, records: &[PropertyRecord], value: f64) {
    for record in records {
        set_value(document, &record.path, Value::from(value));
    }
}

/// Overwrite every record's target with a color, converting the hex input to
/// the engine's 0-1 float channels. An existing alpha channel at the target
/// is preserved; targets without one stay three-channel.
pub fn update_color_properties(document: &mut Value, records: &[PropertyRecord], hex: &str) {
    let Some(channels) = hex_to_channels(hex) else {
        log::debug!("ignoring malformed color value: {hex:?}");
        return;
    };

    for record in records {
        let alpha = get_value(document, &record.path)
            .and_then(Value::as_array)
            .and_then(|existing| existing.get(3))
            .cloned();

        let mut encoded: Vec<Value> = channels.iter().map(|c| Value::from(*c)).collect();
        if let Some(alpha) = alpha {
            encoded.push(alpha);
        }

        set_value(document, &record.path, Value::Array(encoded));
    }
}

/// Restore every record's target to its pristine captured value.
pub fn reset_properties(document: &mut Value, records: &[PropertyRecord]) {
    for record in records {
        set_value(document, &record.path, record.value.clone());
    }
}
