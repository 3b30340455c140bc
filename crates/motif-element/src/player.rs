//! The playback session: owns one loaded animation instance, derives the
//! state catalog, applies customization, and republishes engine events.

use std::collections::HashMap;

use serde_json::Value;

use motif_helpers::{
    apply_frame_extents, get_value, read_properties, read_states, reset_properties, select_state,
    set_value, update_color_properties, update_numeric_properties, value_to_hex, PropertyKind,
    PropertyRecord, State,
};

use crate::backend::{
    AnimationBackend, BackendConfig, BackendEvent, BackendFactory, BackendOptions, Direction,
    Segment,
};
use crate::event::{EventDispatcher, ListenerId, PlayerEvent};
use crate::options::PlaybackOptions;
use crate::{IconData, IconError, Result};

/// Baseline divisor assumed by legacy (marker-less) icon files for the
/// proportional stroke/scale/axis rewrite. This is a data convention baked
/// into authored documents, not a computed invariant.
const LEGACY_BASELINE: f64 = 50.0;

/// A playback session around one animation document.
///
/// The session derives named [`State`]s from the document's markers, applies
/// initial customization before the first visual frame, and exposes a uniform
/// control surface. Engine events are republished as session events
/// ([`PlayerEvent`]) in emission order.
///
/// Control operations that need a live engine return
/// [`IconError::NotConnected`] before [`connect`](Self::connect) or after
/// [`disconnect`](Self::disconnect); malformed customization input degrades
/// to "no effect" instead.
pub struct Player {
    factory: BackendFactory,
    icon_data: IconData,
    initial: PlaybackOptions,
    options: BackendOptions,
    backend: Option<Box<dyn AnimationBackend>>,
    states: Vec<State>,
    current_state: Option<usize>,
    raw_properties: Option<Vec<PropertyRecord>>,
    direction: Direction,
    speed: f64,
    is_ready: bool,
    events: EventDispatcher,
}

impl Player {
    /// Create a session with default backend options.
    pub fn new(factory: BackendFactory, icon_data: IconData, initial: PlaybackOptions) -> Self {
        Self::with_options(factory, icon_data, initial, BackendOptions::default())
    }

    /// Create a session with explicit backend options.
    pub fn with_options(
        factory: BackendFactory,
        mut icon_data: IconData,
        mut initial: PlaybackOptions,
        options: BackendOptions,
    ) -> Self {
        let states = read_states(&icon_data);
        let current_state = select_state(&states, initial.state.as_deref());

        if states.is_empty() {
            // Legacy icon file support (without markers): customization is
            // baked into the document before the engine ever sees it.
            apply_legacy_customization(&mut icon_data, &initial);
        } else if let Some(stroke) = initial.stroke {
            // Marker documents only understand the canonical stroke range.
            if ![1.0, 2.0, 3.0].contains(&stroke) {
                log::debug!("dropping stroke {stroke} outside supported range");
                initial.stroke = None;
            }
        }

        Self {
            factory,
            icon_data,
            initial,
            options,
            backend: None,
            states,
            current_state,
            raw_properties: None,
            direction: Direction::Forward,
            speed: 1.0,
            is_ready: false,
            events: EventDispatcher::new(),
        }
    }

    /// Instantiate the engine and apply initial customization.
    ///
    /// Clamps the engine's in/out frame bounds to the state catalog's extents
    /// and restricts the initial segment to the current state, when one
    /// exists. Fails on a session that is already connected.
    pub fn connect(&mut self) -> Result<()> {
        if self.backend.is_some() {
            return Err(IconError::AlreadyConnected);
        }

        let mut animation_data = self.icon_data.clone();
        apply_frame_extents(&mut animation_data, &self.states);

        let mut backend = (self.factory)(BackendConfig {
            animation_data,
            initial_segment: self.current_segment(),
            options: self.options.clone(),
        })?;
        // Speed and direction survive reconnects.
        backend.set_speed(self.speed);
        backend.set_direction(self.direction);
        self.backend = Some(backend);

        // Initial colors and stroke land before the first visual frame.
        if let Some(colors) = self.initial.colors.clone() {
            self.set_colors(Some(&colors))?;
        }
        if let Some(stroke) = self.initial.stroke {
            self.set_stroke(Some(stroke))?;
        }

        if self.backend.as_deref().is_some_and(AnimationBackend::is_loaded) {
            self.is_ready = true;
            self.events.emit(PlayerEvent::Ready);
        }

        Ok(())
    }

    /// Tear down the engine instance and clear derived property caches.
    /// Fails on a session that is not connected.
    pub fn disconnect(&mut self) -> Result<()> {
        let mut backend = self.backend.take().ok_or(IconError::NotConnected)?;
        self.is_ready = false;
        backend.destroy();
        // Records address the torn-down document; recompute against the next one.
        self.raw_properties = None;
        Ok(())
    }

    /// Drain engine events and republish them as session events, preserving
    /// emission order. No-op while disconnected.
    pub fn pump(&mut self) {
        let Some(backend) = self.backend.as_deref_mut() else {
            return;
        };

        for event in backend.take_events() {
            match event {
                BackendEvent::Complete | BackendEvent::LoopComplete => {
                    self.events.emit(PlayerEvent::Complete);
                }
                BackendEvent::EnterFrame => {
                    self.events.emit(PlayerEvent::Frame);
                }
                BackendEvent::ConfigReady => {
                    if !self.is_ready {
                        self.is_ready = true;
                        self.events.emit(PlayerEvent::Ready);
                    }
                }
            }
        }
    }

    /// Register a session event listener; returns a removal handle.
    pub fn add_event_listener(
        &mut self,
        event: PlayerEvent,
        callback: impl FnMut(PlayerEvent) + 'static,
    ) -> ListenerId {
        self.events.add_listener(event, callback)
    }

    /// Remove one listener by handle.
    pub fn remove_event_listener(&mut self, event: PlayerEvent, id: ListenerId) {
        self.events.remove_listener(event, id);
    }

    /// Remove every listener for one event.
    pub fn remove_event_listeners(&mut self, event: PlayerEvent) {
        self.events.remove_listeners(event);
    }

    /// Drain session events queued for the hosting shell.
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        self.events.take_queued()
    }

    /// Resume playback in the current direction from wherever the engine
    /// sits. A run already at its terminal position cannot be restarted this
    /// way; use [`play_from_beginning`](Self::play_from_beginning).
    pub fn play(&mut self) -> Result<()> {
        let direction = self.direction;
        let backend = self.backend_mut()?;
        backend.set_direction(direction);
        backend.play();
        Ok(())
    }

    /// Force the play head to the active state's start (or frame 0) and play
    /// forward.
    pub fn play_from_beginning(&mut self) -> Result<()> {
        let segment = self.current_segment();
        let backend = self.backend_mut()?;
        backend.set_direction(Direction::Forward);
        match segment {
            Some(segment) => backend.play_segments(segment, true),
            None => backend.go_to_and_play(0.0),
        }
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        self.backend_mut()?.pause();
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        self.backend_mut()?.stop();
        Ok(())
    }

    /// Seek to a frame (relative to the active segment) without playing.
    pub fn go_to_frame(&mut self, frame: f64) -> Result<()> {
        self.backend_mut()?.go_to_and_stop(frame);
        Ok(())
    }

    pub fn go_to_first_frame(&mut self) -> Result<()> {
        self.go_to_frame(0.0)
    }

    pub fn go_to_last_frame(&mut self) -> Result<()> {
        let last = self.frames().max(0.0);
        self.go_to_frame(last)
    }

    /// Seek to a frame, clamped to the valid range.
    pub fn set_frame(&mut self, frame: f64) -> Result<()> {
        let clamped = frame.clamp(0.0, self.frames().max(0.0));
        self.go_to_frame(clamped)
    }

    /// Switch the named playback state.
    ///
    /// No-op when the value equals the current state name. An unmatched or
    /// unset name falls back to the default-flagged state; with no state at
    /// all the engine returns to the full timeline. Playback in progress is
    /// paused and restarted so the new window takes effect immediately.
    pub fn set_state(&mut self, state: Option<&str>) -> Result<()> {
        let current = self.state().map(str::to_owned);
        if state == current.as_deref() {
            return Ok(());
        }

        let was_playing = self.is_playing();
        self.current_state = select_state(&self.states, state);
        let segment = self.current_segment();

        let backend = self.backend_mut()?;
        match segment {
            Some(segment) => backend.set_segment(segment),
            None => backend.reset_segments(),
        }
        backend.go_to_and_stop(0.0);

        if was_playing {
            self.pause()?;
            self.play()?;
        }
        Ok(())
    }

    /// Name of the current state, if any.
    pub fn state(&self) -> Option<&str> {
        self.current_state
            .map(|index| self.states[index].name.as_str())
    }

    /// Replace the color palette. `None` (or a missing key) restores the
    /// pristine captured value for every matching color record; a supplied
    /// override is written through the rewriter. Forces a render refresh.
    pub fn set_colors(&mut self, colors: Option<&HashMap<String, String>>) -> Result<()> {
        let records = self.records_where(|record| record.kind == PropertyKind::Color);

        let backend = self.backend_mut()?;
        let document = backend.document_mut();
        reset_properties(document, &records);

        if let Some(colors) = colors {
            for (name, hex) in colors {
                let lowered = name.to_ascii_lowercase();
                let matching: Vec<PropertyRecord> = records
                    .iter()
                    .filter(|record| record.name == lowered)
                    .cloned()
                    .collect();
                update_color_properties(document, &matching, hex);
            }
        }

        self.refresh();
        Ok(())
    }

    /// Read one palette color from the live document.
    pub fn color(&mut self, name: &str) -> Option<String> {
        let lowered = name.to_ascii_lowercase();
        let records =
            self.records_where(|r| r.kind == PropertyKind::Color && r.name == lowered);
        let backend = self.backend.as_deref()?;
        records
            .iter()
            .find_map(|record| get_value(backend.document(), &record.path).and_then(value_to_hex))
    }

    /// Overwrite or reset one palette color.
    pub fn set_color(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        let lowered = name.to_ascii_lowercase();
        let records =
            self.records_where(|r| r.kind == PropertyKind::Color && r.name == lowered);

        let backend = self.backend_mut()?;
        let document = backend.document_mut();
        match value {
            Some(hex) => update_color_properties(document, &records, hex),
            None => reset_properties(document, &records),
        }

        self.refresh();
        Ok(())
    }

    /// Logical color names, in first-seen document order, deduplicated.
    pub fn color_names(&mut self) -> Vec<String> {
        let mut names = Vec::new();
        for record in self.record_cache() {
            if record.kind == PropertyKind::Color && !names.contains(&record.name) {
                names.push(record.name.clone());
            }
        }
        names
    }

    /// Snapshot of the current palette.
    pub fn colors(&mut self) -> HashMap<String, String> {
        let names = self.color_names();
        let mut palette = HashMap::new();
        for name in names {
            if let Some(hex) = self.color(&name) {
                palette.insert(name, hex);
            }
        }
        palette
    }

    /// Replace the stroke width. `None` restores the pristine values.
    pub fn set_stroke(&mut self, stroke: Option<f64>) -> Result<()> {
        let records = self.records_where(|r| r.kind == PropertyKind::Stroke);

        let backend = self.backend_mut()?;
        let document = backend.document_mut();
        reset_properties(document, &records);
        if let Some(stroke) = stroke {
            update_numeric_properties(document, &records, stroke);
        }

        self.refresh();
        Ok(())
    }

    /// Read the current stroke value from the live document.
    pub fn stroke(&mut self) -> Option<f64> {
        let records = self.records_where(|r| r.kind == PropertyKind::Stroke);
        let backend = self.backend.as_deref()?;
        records
            .first()
            .and_then(|record| get_value(backend.document(), &record.path))
            .and_then(Value::as_f64)
    }

    /// Apply a whole options bundle at once.
    pub fn set_properties(&mut self, properties: &PlaybackOptions) -> Result<()> {
        self.set_colors(properties.colors.as_ref())?;
        self.set_stroke(properties.stroke)?;
        self.set_state(properties.state.as_deref())
    }

    /// Snapshot of the customizable surface this document actually exposes.
    pub fn properties(&mut self) -> PlaybackOptions {
        let mut result = PlaybackOptions::default();

        if !self.color_names().is_empty() {
            result.colors = Some(self.colors());
        }
        if !self
            .records_where(|r| r.kind == PropertyKind::Stroke)
            .is_empty()
        {
            result.stroke = self.stroke();
        }
        if !self.states.is_empty() {
            result.state = self.state().map(str::to_owned);
        }

        result
    }

    /// Set playback speed. Remembered across reconnects.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
        if let Some(backend) = self.backend.as_deref_mut() {
            backend.set_speed(speed);
        }
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set playback direction. Remembered across reconnects.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        if let Some(backend) = self.backend.as_deref_mut() {
            backend.set_direction(direction);
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The derived state catalog, ordered by start time.
    #[inline]
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The currently selected state, if any.
    pub fn current_state(&self) -> Option<&State> {
        self.current_state.map(|index| &self.states[index])
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.backend.is_some()
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    /// Whether the engine is actively playing. `false` while disconnected.
    pub fn is_playing(&self) -> bool {
        self.backend
            .as_deref()
            .map(|backend| !backend.is_paused())
            .unwrap_or(false)
    }

    /// Animation length as the index of the last frame.
    pub fn frames(&self) -> f64 {
        self.backend
            .as_deref()
            .map(|backend| backend.total_frames() - 1.0)
            .unwrap_or(0.0)
    }

    /// Animation length in seconds.
    pub fn duration(&self) -> f64 {
        self.backend
            .as_deref()
            .map(AnimationBackend::duration_seconds)
            .unwrap_or(0.0)
    }

    /// Current frame position.
    pub fn frame(&self) -> f64 {
        self.backend
            .as_deref()
            .map(AnimationBackend::current_frame)
            .unwrap_or(0.0)
    }

    /// Blind-render the current frame so property rewrites become visible,
    /// and notify listeners.
    fn refresh(&mut self) {
        if let Some(backend) = self.backend.as_deref_mut() {
            backend.render_frame();
        }
        self.events.emit(PlayerEvent::Refresh);
    }

    fn backend_mut(&mut self) -> Result<&mut (dyn AnimationBackend + 'static)> {
        self.backend.as_deref_mut().ok_or(IconError::NotConnected)
    }

    fn current_segment(&self) -> Option<Segment> {
        self.current_state.map(|index| {
            let state = &self.states[index];
            Segment::new(state.start_frame(), state.end_frame())
        })
    }

    /// Customizable properties of the loaded document, computed lazily and
    /// kept until the document identity changes.
    fn record_cache(&mut self) -> &[PropertyRecord] {
        if self.raw_properties.is_none() {
            let mut records = read_properties(&self.icon_data);
            if self.states.is_empty() {
                // Legacy documents bake those in before connect; only the
                // palette (and grouped stroke layers) stay live-editable.
                records.retain(|record| {
                    record.name != "scale"
                        && record.name != "axis"
                        && record.name != "stroke"
                        && !record.name.starts_with("state-")
                });
            }
            self.raw_properties = Some(records);
        }
        self.raw_properties.as_deref().unwrap_or_default()
    }

    fn records_where(&mut self, predicate: impl Fn(&PropertyRecord) -> bool) -> Vec<PropertyRecord> {
        self.record_cache()
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }
}

/// Legacy icon file support: with no markers present, customization directly
/// edits discovered property paths, proportionally to the authored baseline.
fn apply_legacy_customization(icon_data: &mut IconData, initial: &PlaybackOptions) {
    let properties = read_properties(icon_data);
    if properties.is_empty() {
        return;
    }

    if let Some(state) = initial.state.as_deref() {
        let name = format!("state-{}", state.to_ascii_lowercase());
        let switches: Vec<PropertyRecord> = properties
            .iter()
            .filter(|record| record.kind == PropertyKind::StateSwitch)
            .cloned()
            .collect();
        let active: Vec<PropertyRecord> = switches
            .iter()
            .filter(|record| record.name == name)
            .cloned()
            .collect();

        update_numeric_properties(icon_data, &switches, 0.0);
        update_numeric_properties(icon_data, &active, 1.0);
    }

    if let Some(stroke) = initial.stroke {
        rewrite_proportional(icon_data, &properties, "stroke", stroke);
    }

    if let Some(scale) = initial.scale {
        rewrite_proportional(icon_data, &properties, "scale", scale);
    }

    if let (Some(axis_x), Some(axis_y)) = (initial.axis_x, initial.axis_y) {
        if let Some(record) = properties.iter().find(|record| record.name == "axis") {
            let observed = record
                .value
                .as_array()
                .filter(|values| values.len() >= 2)
                .and_then(|values| {
                    Some((values[0].as_f64()? + values[1].as_f64()?) / 2.0)
                });
            if let Some(observed) = observed {
                let ratio = observed / LEGACY_BASELINE;
                set_value(icon_data, &record.path.index(0), Value::from(axis_x * ratio));
                set_value(icon_data, &record.path.index(1), Value::from(axis_y * ratio));
            }
        }
    }
}

fn rewrite_proportional(
    icon_data: &mut IconData,
    properties: &[PropertyRecord],
    name: &str,
    desired: f64,
) {
    if let Some(record) = properties.iter().find(|record| record.name == name) {
        if let Some(observed) = record.value.as_f64() {
            let ratio = observed / LEGACY_BASELINE;
            set_value(icon_data, &record.path, Value::from(desired * ratio));
        }
    }
}
