//! Interaction triggers: interchangeable policies that observe a playback
//! session and external events, and decide when to drive its control surface.
//!
//! Every policy is a small state machine behind the [`Trigger`] trait; all
//! hooks are optional (no-op defaults). Policies never hold the session —
//! each hook receives a [`TriggerRuntime`] borrowing the player, the current
//! trigger settings, and the scheduler.

pub mod boomerang;
pub mod click;
pub mod hover;
pub mod loop_on_hover;
pub mod looping;
pub mod morph;
pub mod sequence;
pub mod viewport;

pub use boomerang::Boomerang;
pub use click::Click;
pub use hover::Hover;
pub use loop_on_hover::LoopOnHover;
pub use looping::Loop;
pub use morph::Morph;
pub use sequence::Sequence;
pub use viewport::In;

use std::collections::HashMap;

use crate::player::Player;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::{IconError, Result};

/// External stimuli routed into the active trigger by the hosting shell.
///
/// When a `target` selector is configured, pointer events originate from the
/// matched ancestor element instead of the host itself; the routing is the
/// embedder's job either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    PointerDown,
    PointerEnter,
    PointerLeave,
    VisibilityChanged(bool),
    TimerFired(TimerHandle),
}

/// Trigger-relevant attribute values, rebuilt by the shell for every
/// dispatch so attribute changes are always visible.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSettings {
    /// Fixed play delay in milliseconds, clamped to >= 0.
    pub delay_ms: u64,
    /// Sequence definition (comma-separated instruction list).
    pub sequence: String,
    /// Playback speed for the sequence trigger.
    pub speed: f64,
    /// Whether a deferred-loading strategy is configured on the host.
    pub loading: bool,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            sequence: String::new(),
            speed: 1.0,
            loading: false,
        }
    }
}

/// Everything a trigger hook may act upon, immutable in shape for the
/// trigger's lifetime.
pub struct TriggerRuntime<'a> {
    pub player: &'a mut Player,
    pub settings: &'a TriggerSettings,
    pub scheduler: &'a mut dyn Scheduler,
}

/// A pluggable interaction policy. All hooks default to no-ops.
pub trait Trigger {
    /// The trigger was attached to a connected session.
    fn on_connected(&mut self, _rt: &mut TriggerRuntime<'_>) -> Result<()> {
        Ok(())
    }

    /// The trigger is being detached. Pending timers must be cancelled here.
    fn on_disconnected(&mut self, _rt: &mut TriggerRuntime<'_>) -> Result<()> {
        Ok(())
    }

    /// The session became ready.
    fn on_ready(&mut self, _rt: &mut TriggerRuntime<'_>) -> Result<()> {
        Ok(())
    }

    /// A property rewrite refreshed the rendered frame.
    fn on_refresh(&mut self, _rt: &mut TriggerRuntime<'_>) -> Result<()> {
        Ok(())
    }

    /// A run (or loop iteration) completed.
    fn on_complete(&mut self, _rt: &mut TriggerRuntime<'_>) -> Result<()> {
        Ok(())
    }

    /// The engine entered a new frame.
    fn on_frame(&mut self, _rt: &mut TriggerRuntime<'_>) -> Result<()> {
        Ok(())
    }

    /// An external stimulus arrived.
    fn on_event(&mut self, _rt: &mut TriggerRuntime<'_>, _event: &InteractionEvent) -> Result<()> {
        Ok(())
    }

    /// A trigger-relevant attribute (sequence definition, speed) changed.
    fn on_settings_changed(&mut self, _rt: &mut TriggerRuntime<'_>) -> Result<()> {
        Ok(())
    }
}

/// Factory producing a fresh trigger instance.
pub type TriggerFactory = fn() -> Box<dyn Trigger>;

/// Name-keyed trigger catalog.
///
/// Process-wide configuration state in spirit: build it once (usually via
/// [`with_defaults`](Self::with_defaults)) before any element attaches, and
/// only read it afterwards.
#[derive(Default)]
pub struct TriggerRegistry {
    triggers: HashMap<String, TriggerFactory>,
}

impl TriggerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the eight built-in policies registered under their
    /// attribute names.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("in", || Box::new(In::default()));
        registry.register("click", || Box::new(Click::default()));
        registry.register("hover", || Box::new(Hover::default()));
        registry.register("loop", || Box::new(Loop::default()));
        registry.register("loop-on-hover", || Box::new(LoopOnHover::default()));
        registry.register("morph", || Box::new(Morph::default()));
        registry.register("boomerang", || Box::new(Boomerang::default()));
        registry.register("sequence", || Box::new(Sequence::default()));
        registry
    }

    /// Define a supported trigger under a name.
    pub fn register(&mut self, name: impl Into<String>, factory: TriggerFactory) {
        self.triggers.insert(name.into(), factory);
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.triggers.contains_key(name)
    }

    /// Instantiate a trigger by name.
    pub fn create(&self, name: &str) -> Result<Box<dyn Trigger>> {
        let factory = self
            .triggers
            .get(name)
            .ok_or_else(|| IconError::UnregisteredTrigger {
                name: name.to_string(),
            })?;
        Ok(factory())
    }
}

/// Parse a delay attribute: non-negative milliseconds, default 0.
pub(crate) fn parse_delay(value: Option<&str>) -> u64 {
    value
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|delay| delay.is_finite())
        .map(|delay| delay.max(0.0) as u64)
        .unwrap_or(0)
}

/// Parse a speed attribute, default 1.
pub(crate) fn parse_speed(value: Option<&str>) -> f64 {
    value
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|speed| speed.is_finite())
        .unwrap_or(1.0)
}
