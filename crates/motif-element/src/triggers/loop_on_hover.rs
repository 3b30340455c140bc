use crate::scheduler::TimerHandle;
use crate::triggers::{InteractionEvent, Trigger, TriggerRuntime};
use crate::Result;

/// The __LoopOnHover__ trigger loops the animation for as long as the cursor
/// stays over the target. Leaving mid-run lets the current iteration finish;
/// only the restart is suppressed.
#[derive(Debug, Default)]
pub struct LoopOnHover {
    hovered: bool,
    timer: Option<TimerHandle>,
}

impl LoopOnHover {
    fn play(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        if let Some(timer) = self.timer.take() {
            rt.scheduler.cancel(timer);
        }

        if !self.hovered {
            return Ok(());
        }

        if rt.settings.delay_ms > 0 {
            self.timer = Some(rt.scheduler.schedule(rt.settings.delay_ms));
            return Ok(());
        }

        rt.player.play_from_beginning()
    }
}

impl Trigger for LoopOnHover {
    fn on_disconnected(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        self.hovered = false;
        if let Some(timer) = self.timer.take() {
            rt.scheduler.cancel(timer);
        }
        Ok(())
    }

    fn on_complete(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        self.play(rt)
    }

    fn on_event(&mut self, rt: &mut TriggerRuntime<'_>, event: &InteractionEvent) -> Result<()> {
        match event {
            InteractionEvent::PointerEnter => {
                self.hovered = true;
                if rt.player.is_playing() {
                    return Ok(());
                }
                self.play(rt)
            }
            InteractionEvent::PointerLeave => {
                self.hovered = false;
                if let Some(timer) = self.timer.take() {
                    rt.scheduler.cancel(timer);
                }
                Ok(())
            }
            InteractionEvent::TimerFired(handle) if self.timer == Some(*handle) => {
                self.timer = None;
                rt.player.play_from_beginning()
            }
            _ => Ok(()),
        }
    }
}
