use crate::scheduler::TimerHandle;
use crate::triggers::{InteractionEvent, Trigger, TriggerRuntime};
use crate::Result;

/// The __Loop__ trigger restarts the animation every time it completes, with
/// an optional pause between iterations.
#[derive(Debug, Default)]
pub struct Loop {
    timer: Option<TimerHandle>,
}

impl Loop {
    fn play(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
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

impl Trigger for Loop {
    fn on_disconnected(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        if let Some(timer) = self.timer.take() {
            rt.scheduler.cancel(timer);
        }
        Ok(())
    }

    fn on_ready(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        self.play(rt)
    }

    fn on_complete(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        self.play(rt)
    }

    fn on_event(&mut self, rt: &mut TriggerRuntime<'_>, event: &InteractionEvent) -> Result<()> {
        match event {
            InteractionEvent::TimerFired(handle) if self.timer == Some(*handle) => {
                self.timer = None;
                rt.player.play_from_beginning()
            }
            _ => Ok(()),
        }
    }
}
