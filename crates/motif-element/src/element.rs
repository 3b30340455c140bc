//! The hosting shell: owns one playback session, reflects a fixed attribute
//! set into structured options, manages deferred instantiation strategies,
//! and wires the active trigger into the session's event stream.
//!
//! This is a headless counterpart of a custom element. The embedder forwards
//! lifecycle callbacks (`connected`/`disconnected`), attribute mutations
//! (`set_attribute`), and external stimuli (`dispatch`), and calls
//! [`pump`](Element::pump) after every batch so engine events reach the
//! trigger in emission order.

use std::collections::HashMap;
use std::rc::Rc;

use motif_helpers::{parse_colors, parse_state, parse_stroke};

use crate::backend::BackendFactory;
use crate::event::PlayerEvent;
use crate::loader::IconLoader;
use crate::options::PlaybackOptions;
use crate::player::Player;
use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle};
use crate::triggers::{
    parse_delay, parse_speed, InteractionEvent, Trigger, TriggerRegistry, TriggerRuntime,
    TriggerSettings,
};
use crate::{IconData, IconError, Result};

/// Attribute names the embedder must forward to [`Element::set_attribute`].
/// Trigger-specific attributes (`delay`, `sequence`, `speed`) are reflected
/// too and must be forwarded alongside these.
pub const OBSERVED_ATTRIBUTES: [&str; 8] = [
    "colors", "src", "icon", "state", "trigger", "loading", "target", "stroke",
];

/// Deferred session-instantiation strategies (`loading` attribute).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStrategy {
    /// Instantiate on first viewport intersection.
    Lazy,
    /// Instantiate on first pointer interaction, replaying that interaction
    /// once loading completes.
    Interaction,
    /// Instantiate after a fixed delay (`delay` attribute).
    Delay,
}

impl LoadingStrategy {
    /// Parse the `loading` attribute value; unknown values mean immediate
    /// instantiation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lazy" => Some(Self::Lazy),
            "interaction" => Some(Self::Interaction),
            "delay" => Some(Self::Delay),
            _ => None,
        }
    }
}

/// What the shell is still waiting for before creating its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredLoad {
    Visible,
    Interaction,
    Timer(TimerHandle),
}

/// Host-visible shell notifications, drained via [`Element::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementEvent {
    /// The underlying engine signalled ready for the current document.
    Ready,
}

/// A headless icon-animation element.
///
/// Exactly one [`Player`] and one [`Trigger`] are live at a time; switching
/// either goes through an explicit destroy-then-create sequence. The source
/// document is re-fetched whenever its identity changes (`icon`/`src`
/// attribute, or newly assigned structured data); customization attributes
/// (`colors`/`stroke`/`state`) are re-applied to the live session without a
/// reload.
pub struct Element {
    factory: BackendFactory,
    registry: TriggerRegistry,
    scheduler: Box<dyn Scheduler>,
    loader: Option<Rc<dyn IconLoader>>,
    attributes: HashMap<String, String>,
    assigned_icon_data: Option<IconData>,
    loaded_icon_data: Option<IconData>,
    player: Option<Player>,
    trigger: Option<Box<dyn Trigger>>,
    deferred: Option<DeferredLoad>,
    is_connected: bool,
    is_ready: bool,
    events: Vec<ElementEvent>,
}

impl Element {
    /// A disconnected shell with the built-in trigger catalog and a manual
    /// scheduler.
    pub fn new(factory: BackendFactory) -> Self {
        Self {
            factory,
            registry: TriggerRegistry::with_defaults(),
            scheduler: Box::new(ManualScheduler::new()),
            loader: None,
            attributes: HashMap::new(),
            assigned_icon_data: None,
            loaded_icon_data: None,
            player: None,
            trigger: None,
            deferred: None,
            is_connected: false,
            is_ready: false,
            events: Vec::new(),
        }
    }

    /// Install the application-wide icon loader. Takes effect on the next
    /// document load.
    pub fn set_loader(&mut self, loader: Rc<dyn IconLoader>) {
        self.loader = Some(loader);
    }

    /// Replace the trigger catalog. Must happen before a trigger attaches.
    pub fn set_registry(&mut self, registry: TriggerRegistry) {
        self.registry = registry;
    }

    /// Replace the timer source. Must happen before [`connected`](Self::connected).
    pub fn set_scheduler(&mut self, scheduler: Box<dyn Scheduler>) {
        self.scheduler = scheduler;
    }

    /// Lifecycle: the element entered the document.
    pub fn connected(&mut self) -> Result<()> {
        if self.is_connected {
            return Ok(());
        }
        self.is_connected = true;

        self.deferred = match self.loading_strategy() {
            Some(LoadingStrategy::Lazy) => Some(DeferredLoad::Visible),
            Some(LoadingStrategy::Interaction) => Some(DeferredLoad::Interaction),
            Some(LoadingStrategy::Delay) => {
                let delay = parse_delay(self.attribute("delay"));
                Some(DeferredLoad::Timer(self.scheduler.schedule(delay)))
            }
            None => None,
        };

        self.create_player()
    }

    /// Lifecycle: the element left the document. Cancels any pending
    /// deferred-load timer before tearing the session down.
    pub fn disconnected(&mut self) -> Result<()> {
        if !self.is_connected {
            return Ok(());
        }
        self.is_connected = false;

        if let Some(DeferredLoad::Timer(timer)) = self.deferred.take() {
            self.scheduler.cancel(timer);
        }

        self.destroy_player()
    }

    /// Reflect one attribute mutation. `None` removes the attribute.
    ///
    /// Customization attributes act on the live session immediately; source
    /// identity attributes (`icon`/`src`) reload the document; trigger
    /// attributes rebuild or notify the active trigger.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => {
                self.attributes.insert(name.to_string(), value.to_string());
            }
            None => {
                self.attributes.remove(name);
            }
        }

        if !self.is_connected {
            return Ok(());
        }

        match name {
            "colors" => {
                let palette = value.and_then(parse_colors);
                if let Some(player) = self.player.as_mut() {
                    player.set_colors(palette.as_ref())?;
                }
                Ok(())
            }
            "stroke" => {
                let stroke = value.and_then(parse_stroke);
                if let Some(player) = self.player.as_mut() {
                    player.set_stroke(stroke)?;
                }
                Ok(())
            }
            "state" => {
                let state = value.and_then(parse_state);
                if let Some(player) = self.player.as_mut() {
                    player.set_state(state.as_deref())?;
                }
                Ok(())
            }
            "icon" | "src" => {
                self.destroy_player()?;
                self.create_player()
            }
            "trigger" | "target" => self.trigger_changed(),
            "sequence" | "speed" => {
                self.with_trigger(|trigger, rt| trigger.on_settings_changed(rt))
            }
            _ => Ok(()),
        }
    }

    /// Assign structured document data directly, bypassing the loader. This
    /// is a source-identity change: the session is rebuilt.
    pub fn set_icon_data(&mut self, data: Option<IconData>) -> Result<()> {
        self.assigned_icon_data = data;
        if !self.is_connected {
            return Ok(());
        }
        self.destroy_player()?;
        self.create_player()
    }

    /// Route an external stimulus. While a deferred-loading strategy is still
    /// waiting, the matching stimulus creates the session instead (an
    /// originating pointer interaction is replayed to the fresh trigger);
    /// everything else reaches the active trigger.
    pub fn dispatch(&mut self, event: InteractionEvent) -> Result<()> {
        if let Some(deferred) = self.deferred {
            match (deferred, event) {
                (DeferredLoad::Visible, InteractionEvent::VisibilityChanged(true)) => {
                    self.deferred = None;
                    return self.create_player();
                }
                (
                    DeferredLoad::Interaction,
                    InteractionEvent::PointerDown | InteractionEvent::PointerEnter,
                ) => {
                    self.deferred = None;
                    self.create_player()?;
                    return self.with_trigger(|trigger, rt| trigger.on_event(rt, &event));
                }
                (DeferredLoad::Timer(pending), InteractionEvent::TimerFired(fired))
                    if pending == fired =>
                {
                    self.deferred = None;
                    return self.create_player();
                }
                _ => return Ok(()),
            }
        }

        self.with_trigger(|trigger, rt| trigger.on_event(rt, &event))
    }

    /// Drain engine events into the trigger and the host-visible queue.
    /// Call after every dispatch/attribute batch.
    pub fn pump(&mut self) -> Result<()> {
        if let Some(player) = self.player.as_mut() {
            player.pump();
        }
        self.flush_player_events()
    }

    /// Drain host-visible shell events.
    pub fn take_events(&mut self) -> Vec<ElementEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.is_connected
    }

    /// True only after the engine signalled ready for the current document.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    /// The current attribute value, as last reflected.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The ancestor selector interactions should be delegated to, if any.
    pub fn target_selector(&self) -> Option<&str> {
        self.attribute("target")
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    fn loading_strategy(&self) -> Option<LoadingStrategy> {
        self.attribute("loading").and_then(LoadingStrategy::parse)
    }

    fn trigger_settings(&self) -> TriggerSettings {
        TriggerSettings {
            delay_ms: parse_delay(self.attribute("delay")),
            sequence: self.attribute("sequence").unwrap_or_default().to_string(),
            speed: parse_speed(self.attribute("speed")),
            loading: self.loading_strategy().is_some(),
        }
    }

    fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            colors: self.attribute("colors").and_then(parse_colors),
            stroke: self.attribute("stroke").and_then(parse_stroke),
            state: self.attribute("state").and_then(parse_state),
            scale: self.attribute("scale").and_then(|raw| raw.parse().ok()),
            axis_x: self.attribute("axis-x").and_then(|raw| raw.parse().ok()),
            axis_y: self.attribute("axis-y").and_then(|raw| raw.parse().ok()),
        }
    }

    /// Resolve the document (assigned data, cached load, or the loader) and
    /// stand up player plus trigger. No-op while a deferred-loading strategy
    /// is still waiting, or when no source is configured.
    fn create_player(&mut self) -> Result<()> {
        if self.deferred.is_some() || self.player.is_some() {
            return Ok(());
        }

        let data = match self.resolve_icon_data()? {
            Some(data) => data,
            None => return Ok(()),
        };

        let mut player = Player::new(self.factory.clone(), data, self.playback_options());
        player.connect()?;
        self.player = Some(player);

        self.trigger_changed()?;
        self.flush_player_events()
    }

    /// Tear down trigger then session, in that order, so no trigger hook can
    /// observe a destroyed engine.
    fn destroy_player(&mut self) -> Result<()> {
        self.is_ready = false;
        self.loaded_icon_data = None;

        self.with_trigger(|trigger, rt| trigger.on_disconnected(rt))?;
        self.trigger = None;

        if let Some(mut player) = self.player.take() {
            if player.is_connected() {
                player.disconnect()?;
            }
        }
        Ok(())
    }

    fn resolve_icon_data(&mut self) -> Result<Option<IconData>> {
        if let Some(data) = self.assigned_icon_data.clone() {
            return Ok(Some(data));
        }
        if let Some(data) = self.loaded_icon_data.clone() {
            return Ok(Some(data));
        }

        let loaded = if let Some(icon) = self.attribute("icon") {
            Some(self.require_loader()?.load_icon(icon)?)
        } else if let Some(src) = self.attribute("src") {
            Some(self.require_loader()?.load_src(src)?)
        } else {
            None
        };

        self.loaded_icon_data = loaded.clone();
        Ok(loaded)
    }

    fn require_loader(&self) -> Result<Rc<dyn IconLoader>> {
        self.loader
            .clone()
            .ok_or_else(|| IconError::IconLoadFailed {
                reason: "no icon loader installed".to_string(),
            })
    }

    /// Detach the old trigger and attach the one the `trigger` attribute
    /// names, if any.
    fn trigger_changed(&mut self) -> Result<()> {
        self.with_trigger(|trigger, rt| trigger.on_disconnected(rt))?;
        self.trigger = None;

        if self.player.is_none() {
            return Ok(());
        }
        let name = match self.attribute("trigger") {
            Some(name) => name.to_string(),
            None => return Ok(()),
        };

        if let Some(player) = self.player.as_mut() {
            if player.is_playing() {
                player.pause()?;
            }
        }

        self.trigger = Some(self.registry.create(&name)?);
        self.with_trigger(|trigger, rt| trigger.on_connected(rt))?;
        if self.is_ready {
            self.with_trigger(|trigger, rt| trigger.on_ready(rt))?;
        }
        Ok(())
    }

    /// Republish queued session events to the trigger, flipping the readiness
    /// flag on the first `Ready`.
    fn flush_player_events(&mut self) -> Result<()> {
        let queued = match self.player.as_mut() {
            Some(player) => player.take_events(),
            None => return Ok(()),
        };

        for event in queued {
            match event {
                PlayerEvent::Ready => {
                    if !self.is_ready {
                        self.is_ready = true;
                        self.events.push(ElementEvent::Ready);
                        self.with_trigger(|trigger, rt| trigger.on_ready(rt))?;
                    }
                }
                PlayerEvent::Refresh => {
                    self.with_trigger(|trigger, rt| trigger.on_refresh(rt))?;
                }
                PlayerEvent::Complete => {
                    self.with_trigger(|trigger, rt| trigger.on_complete(rt))?;
                }
                PlayerEvent::Frame => {
                    self.with_trigger(|trigger, rt| trigger.on_frame(rt))?;
                }
            }
        }
        Ok(())
    }

    /// Run one trigger hook with a runtime borrowing the live session. The
    /// trigger is taken out for the call so hooks can re-enter the shell's
    /// fields without aliasing.
    fn with_trigger<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Trigger, &mut TriggerRuntime<'_>) -> Result<()>,
    {
        let Some(mut trigger) = self.trigger.take() else {
            return Ok(());
        };

        let settings = self.trigger_settings();
        let result = match self.player.as_mut() {
            Some(player) => {
                let mut rt = TriggerRuntime {
                    player,
                    settings: &settings,
                    scheduler: &mut *self.scheduler,
                };
                op(trigger.as_mut(), &mut rt)
            }
            None => Ok(()),
        };

        self.trigger = Some(trigger);
        result
    }
}
