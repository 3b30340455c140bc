//! Timer abstraction for delayed trigger actions and deferred loading.
//!
//! The core never blocks; anything delayed is handed to a [`Scheduler`] and
//! comes back as an [`InteractionEvent::TimerFired`] from the embedder.
//! Pending timers must be cancelled on teardown before a new one may be
//! armed, otherwise a stale callback could act on a destroyed session.
//!
//! [`InteractionEvent::TimerFired`]: crate::triggers::InteractionEvent::TimerFired

use std::cell::RefCell;
use std::rc::Rc;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// One-shot timer source implemented by the embedder.
pub trait Scheduler {
    /// Arm a one-shot timer. The embedder reports expiry by dispatching a
    /// `TimerFired` interaction event carrying the returned handle.
    fn schedule(&mut self, delay_ms: u64) -> TimerHandle;

    /// Cancel a pending timer. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Default)]
struct ManualSchedulerInner {
    next_id: u64,
    pending: Vec<(TimerHandle, u64)>,
}

/// A scheduler the embedder drives by hand: it records armed timers and the
/// embedder decides when each one fires. Clones share the same timer table,
/// so a host can keep one handle while the element owns the other.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualSchedulerInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of pending timers with their requested delays.
    pub fn pending(&self) -> Vec<(TimerHandle, u64)> {
        self.inner.borrow().pending.clone()
    }

    /// Whether a handle is still armed.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.inner
            .borrow()
            .pending
            .iter()
            .any(|(pending, _)| *pending == handle)
    }

    /// Remove a timer from the table, returning whether it was still armed.
    /// The embedder calls this right before dispatching `TimerFired`.
    pub fn consume(&self, handle: TimerHandle) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.pending.len();
        inner.pending.retain(|(pending, _)| *pending != handle);
        inner.pending.len() != before
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u64) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let handle = TimerHandle(inner.next_id);
        inner.pending.push((handle, delay_ms));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.inner
            .borrow_mut()
            .pending
            .retain(|(pending, _)| *pending != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_cancel() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.schedule(500);
        let second = scheduler.schedule(0);
        assert!(scheduler.is_pending(first));

        scheduler.cancel(first);
        assert!(!scheduler.is_pending(first));
        assert!(scheduler.is_pending(second));

        assert!(scheduler.consume(second));
        assert!(!scheduler.consume(second));
    }

    #[test]
    fn test_clones_share_the_timer_table() {
        let mut scheduler = ManualScheduler::new();
        let view = scheduler.clone();
        let handle = scheduler.schedule(100);
        assert!(view.is_pending(handle));
    }
}
