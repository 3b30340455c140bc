//! Initial customization options for a playback session.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Desired customization applied before the first rendered frame.
///
/// Color keys are case-insensitive (stored lowercased by the parsers).
/// Canonical stroke values are 1, 2, and 3; marker-less legacy documents
/// additionally accept raw numeric strokes, rewritten proportionally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_y: Option<f64>,
}
