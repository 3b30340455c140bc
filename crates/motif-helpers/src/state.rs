//! Named playback states derived from the markers embedded in an animation
//! document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, time-bounded playback sub-range usable as an alternate motion
/// within one icon file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    pub time: f64,
    pub duration: f64,
    #[serde(default)]
    pub default: bool,
}

impl State {
    /// First frame of this state's playback window.
    #[inline]
    pub fn start_frame(&self) -> f64 {
        self.time
    }

    /// Exclusive end of this state's playback window.
    #[inline]
    pub fn end_frame(&self) -> f64 {
        self.time + self.duration + 1.0
    }
}

/// Derive the state catalog from a document's marker list.
///
/// Each marker's combined name splits on `:`; the second part (when present)
/// is the state name, otherwise the first part is. A marker is flagged
/// default when a name part exists and the group token contains `"default"`.
/// States with non-positive durations are discarded and the catalog is
/// ordered by start time.
pub fn read_states(document: &Value) -> Vec<State> {
    let markers = match document.get("markers").and_then(Value::as_array) {
        Some(markers) => markers,
        None => return Vec::new(),
    };

    let mut states: Vec<State> = markers
        .iter()
        .filter_map(|marker| {
            let combined = marker.get("cm").and_then(Value::as_str)?;
            let time = marker.get("tm").and_then(Value::as_f64)?;
            let duration = marker.get("dr").and_then(Value::as_f64)?;

            let mut parts = combined.splitn(2, ':');
            let group = parts.next().unwrap_or_default();
            let name = parts.next();

            Some(State {
                name: name.unwrap_or(group).to_string(),
                time,
                duration,
                default: name.is_some() && group.contains("default"),
            })
        })
        .filter(|state| state.duration > 0.0)
        .collect();

    states.sort_by(|a, b| a.time.total_cmp(&b.time));
    states
}

/// Select the current state: a name match wins, then the default-flagged
/// state, then none. An unmatched requested name also falls back to the
/// default. Returns an index into `states`.
pub fn select_state(states: &[State], requested: Option<&str>) -> Option<usize> {
    if let Some(name) = requested {
        if let Some(index) = states.iter().position(|state| state.name == name) {
            return Some(index);
        }
    }

    states.iter().position(|state| state.default)
}

/// Clamp the document's in/out frame bounds to the extents of the state
/// catalog. No-op for an empty catalog.
pub fn apply_frame_extents(document: &mut Value, states: &[State]) {
    let (Some(first), Some(last)) = (states.first(), states.last()) else {
        return;
    };

    if let Some(fields) = document.as_object_mut() {
        fields.insert("ip".to_string(), Value::from(first.start_frame()));
        fields.insert("op".to_string(), Value::from(last.end_frame()));
    }
}
