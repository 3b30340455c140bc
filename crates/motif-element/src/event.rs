//! Session-level event dispatch.

use std::collections::HashMap;

/// Events republished by a playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    /// The backend finished loading and the session is usable.
    Ready,
    /// A property rewrite forced a re-render.
    Refresh,
    /// A run (or loop iteration) reached its end.
    Complete,
    /// The engine entered a new frame.
    Frame,
}

/// Handle for removing a single registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(PlayerEvent)>;

/// Per-event listener lists plus a drainable queue for the hosting shell.
///
/// Listeners fire synchronously, in registration order, at most once per
/// underlying engine event. The queue preserves emission order so the shell
/// can forward events to the active trigger afterwards.
#[derive(Default)]
pub struct EventDispatcher {
    next_id: u64,
    listeners: HashMap<PlayerEvent, Vec<(ListenerId, Callback)>>,
    queue: Vec<PlayerEvent>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event. Returns a handle usable with
    /// [`remove_listener`](Self::remove_listener).
    pub fn add_listener(
        &mut self,
        event: PlayerEvent,
        callback: impl FnMut(PlayerEvent) + 'static,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners
            .entry(event)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove one listener by handle.
    pub fn remove_listener(&mut self, event: PlayerEvent, id: ListenerId) {
        if let Some(list) = self.listeners.get_mut(&event) {
            list.retain(|(listener_id, _)| *listener_id != id);
        }
    }

    /// Remove every listener registered for one event.
    pub fn remove_listeners(&mut self, event: PlayerEvent) {
        self.listeners.remove(&event);
    }

    /// Invoke listeners and queue the event for the shell.
    pub fn emit(&mut self, event: PlayerEvent) {
        if let Some(list) = self.listeners.get_mut(&event) {
            for (_, callback) in list.iter_mut() {
                callback(event);
            }
        }
        self.queue.push(event);
    }

    /// Drain queued events in emission order.
    pub fn take_queued(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.queue)
    }
}
