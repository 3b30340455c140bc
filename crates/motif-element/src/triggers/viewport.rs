use crate::scheduler::TimerHandle;
use crate::triggers::{InteractionEvent, Trigger, TriggerRuntime};
use crate::Result;

/// The __In__ trigger plays the animation once, either immediately after the
/// icon loads (when a deferred-loading strategy is active) or the first time
/// the host scrolls into view. An optional delay postpones the run.
#[derive(Debug, Default)]
pub struct In {
    played: bool,
    observing: bool,
    timer: Option<TimerHandle>,
}

impl In {
    fn play(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        if self.played {
            return Ok(());
        }
        self.played = true;

        if let Some(timer) = self.timer.take() {
            rt.scheduler.cancel(timer);
        }

        if rt.settings.delay_ms > 0 {
            self.timer = Some(rt.scheduler.schedule(rt.settings.delay_ms));
            return Ok(());
        }

        rt.player.play_from_beginning()
    }
}

impl Trigger for In {
    fn on_connected(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        // A deferred-loading host only instantiates once visible (or touched),
        // so the viewport check already happened.
        if rt.settings.loading {
            self.play(rt)
        } else {
            self.observing = true;
            Ok(())
        }
    }

    fn on_disconnected(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        self.played = false;
        self.observing = false;
        if let Some(timer) = self.timer.take() {
            rt.scheduler.cancel(timer);
        }
        Ok(())
    }

    fn on_event(&mut self, rt: &mut TriggerRuntime<'_>, event: &InteractionEvent) -> Result<()> {
        match event {
            InteractionEvent::VisibilityChanged(true) if self.observing => {
                self.observing = false;
                self.play(rt)
            }
            InteractionEvent::TimerFired(handle) if self.timer == Some(*handle) => {
                self.timer = None;
                rt.player.play_from_beginning()
            }
            _ => Ok(()),
        }
    }
}
