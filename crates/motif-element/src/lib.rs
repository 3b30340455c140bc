//! Motif Element Core
//!
//! A customizable icon-animation widget core. It loads vector animation
//! documents, customizes them (color palettes, stroke width, named playback
//! states, timeline position), and drives playback through a narrow backend
//! contract, leaving frame rendering and DOM plumbing to the embedder.
//!
//! The two central pieces are the [`Player`] playback session, which owns one
//! loaded animation and exposes a uniform control surface, and the
//! [`triggers`] catalog of interaction policies that decide when playback
//! starts, loops, reverses, or sequences.

pub mod backend;
pub mod element;
pub mod error;
pub mod event;
pub mod loader;
pub mod options;
pub mod player;
pub mod scheduler;
pub mod triggers;

pub use backend::{
    AnimationBackend, BackendConfig, BackendEvent, BackendFactory, BackendOptions, Direction,
    Renderer, Segment,
};
pub use element::{Element, ElementEvent, LoadingStrategy, OBSERVED_ATTRIBUTES};
pub use error::IconError;
pub use event::{EventDispatcher, ListenerId, PlayerEvent};
pub use loader::IconLoader;
pub use options::PlaybackOptions;
pub use player::Player;
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle};
pub use triggers::{
    InteractionEvent, Trigger, TriggerRegistry, TriggerRuntime, TriggerSettings,
};

/// Icon data in JSON format.
pub use motif_helpers::IconData;

/// Element core result type.
pub type Result<T> = core::result::Result<T, IconError>;
