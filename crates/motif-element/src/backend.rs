//! The narrow playback contract an animation engine must satisfy.
//!
//! Frame rendering stays on the engine side; the element core only computes
//! playback parameters and pushes them through this trait.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{IconData, Result};

/// Playback direction. `Forward` plays the animation forward and `Backward`
/// plays it in reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Numeric factor the engine multiplies frame advancement by.
    #[inline]
    pub fn factor(&self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// A sub-range of the timeline, in frames. The end bound is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    #[inline]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Rendering surface hint passed through to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    #[default]
    Svg,
    Canvas,
    Html,
}

/// Engine options used when instantiating a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendOptions {
    pub renderer: Renderer,
    pub loop_enabled: bool,
    pub autoplay: bool,
    pub preserve_aspect_ratio: String,
    pub progressive_load: bool,
    pub hide_on_transparent: bool,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            renderer: Renderer::Svg,
            loop_enabled: false,
            autoplay: false,
            preserve_aspect_ratio: "xMidYMid meet".to_string(),
            progressive_load: true,
            hide_on_transparent: true,
        }
    }
}

/// Everything a backend factory needs to instantiate an engine around one
/// animation document.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub animation_data: IconData,
    pub initial_segment: Option<Segment>,
    pub options: BackendOptions,
}

/// Events emitted by the engine, drained by the playback session and
/// republished in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendEvent {
    Complete,
    LoopComplete,
    EnterFrame,
    ConfigReady,
}

/// Control surface of a live engine instance.
pub trait AnimationBackend {
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn go_to_and_play(&mut self, frame: f64);
    fn go_to_and_stop(&mut self, frame: f64);
    fn set_direction(&mut self, direction: Direction);
    fn set_speed(&mut self, speed: f64);
    /// Restrict playback to a segment without seeking.
    fn set_segment(&mut self, segment: Segment);
    /// Remove any segment restriction, returning to the full timeline.
    fn reset_segments(&mut self);
    /// Restrict playback to a segment and start playing it; `force` seeks to
    /// the segment start immediately.
    fn play_segments(&mut self, segment: Segment, force: bool);
    fn total_frames(&self) -> f64;
    fn duration_seconds(&self) -> f64;
    fn current_frame(&self) -> f64;
    fn is_paused(&self) -> bool;
    fn is_loaded(&self) -> bool;
    /// Re-render the current frame without advancing time, so property
    /// rewrites become visible.
    fn render_frame(&mut self);
    /// The engine's live property tree. Rewrites land here.
    fn document(&self) -> &IconData;
    fn document_mut(&mut self) -> &mut IconData;
    /// Drain events emitted since the last call, in emission order.
    fn take_events(&mut self) -> Vec<BackendEvent>;
    /// Tear the instance down. Called exactly once, on disconnect.
    fn destroy(&mut self) {}
}

/// Factory producing engine instances. Shared by the hosting shell and every
/// playback session it creates over its lifetime.
pub type BackendFactory = Rc<dyn Fn(BackendConfig) -> Result<Box<dyn AnimationBackend>>>;
