//! Motif View
//!
//! Framework-facing view layer: maps a declarative property bundle (icon
//! data, size, state, colorize, direction, render-mode hint) onto a prepared
//! document plus engine options, ready to hand to a rendering component.
//! Playback control and interaction stay with `motif-element`; this layer
//! only bakes the declarative surface into the document up front.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use motif_element::{BackendOptions, Direction, Renderer};
use motif_helpers::{
    apply_frame_extents, hex_to_channels, parse_color, read_properties, read_states, select_state,
    set_value, IconData, PropertyKind, PropertyRecord, State,
};

/// Rendering surface requested by the hosting component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Automatic,
    Software,
    Hardware,
}

impl RenderMode {
    /// Engine renderer hint for this mode.
    pub fn renderer(&self) -> Renderer {
        match self {
            Self::Automatic | Self::Software => Renderer::Svg,
            Self::Hardware => Renderer::Canvas,
        }
    }
}

/// Declarative icon properties, the way a component framework binds them.
#[derive(Debug, Clone, Default)]
pub struct IconProps {
    /// The animation document.
    pub icon: IconData,
    /// Square container size, in pixels.
    pub size: Option<f64>,
    /// Named playback state to restrict the timeline to.
    pub state: Option<String>,
    /// Single color applied to every color property, as any supported color
    /// string (hex, `#rgb`, or a CSS color name).
    pub colorize: Option<String>,
    /// Initial playback direction.
    pub direction: Direction,
    /// Rendering surface hint.
    pub render_mode: RenderMode,
}

/// A document prepared for rendering, with the declarative surface baked in.
#[derive(Debug, Clone)]
pub struct PreparedIcon {
    /// Customized copy of the animation document.
    pub icon_data: IconData,
    /// States derived from the document markers, ordered by start time.
    pub states: Vec<State>,
    /// Index of the selected state, if any.
    pub current_state: Option<usize>,
    /// Customizable properties discovered in the document.
    pub properties: Vec<PropertyRecord>,
    /// Engine options matching the requested render mode.
    pub options: BackendOptions,
    /// Initial playback direction for the session.
    pub direction: Direction,
    /// Square container size, in pixels.
    pub size: Option<f64>,
}

impl PreparedIcon {
    /// The selected state's playback window, as `(start, end)` frames.
    pub fn segment(&self) -> Option<(f64, f64)> {
        self.current_state.map(|index| {
            let state = &self.states[index];
            (state.start_frame(), state.end_frame())
        })
    }
}

/// Bake a property bundle into a render-ready document.
///
/// The input document is never mutated; customization lands on a copy.
/// A `colorize` value overrides every color property with a fully opaque
/// channel triple; malformed values fall back the same way the attribute
/// parsers do, so the result is always renderable.
pub fn prepare_icon(props: &IconProps) -> PreparedIcon {
    let mut icon_data = props.icon.clone();

    let states = read_states(&icon_data);
    let current_state = select_state(&states, props.state.as_deref());
    apply_frame_extents(&mut icon_data, &states);

    let properties = read_properties(&icon_data);
    if let Some(colorize) = props.colorize.as_deref() {
        colorize_document(&mut icon_data, &properties, colorize);
    }

    let options = BackendOptions {
        renderer: props.render_mode.renderer(),
        ..BackendOptions::default()
    };

    PreparedIcon {
        icon_data,
        states,
        current_state,
        properties,
        options,
        direction: props.direction,
        size: props.size,
    }
}

/// Overwrite every color property with one fully opaque color.
fn colorize_document(icon_data: &mut IconData, properties: &[PropertyRecord], colorize: &str) {
    let hex = parse_color(colorize);
    let Some([r, g, b]) = hex_to_channels(&hex) else {
        log::debug!("ignoring unparseable colorize value {colorize:?}");
        return;
    };

    for record in properties {
        if record.kind != PropertyKind::Color {
            continue;
        }
        set_value(icon_data, &record.path, Value::from(vec![r, g, b, 1.0]));
    }
}
