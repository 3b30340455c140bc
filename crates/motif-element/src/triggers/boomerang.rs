use crate::backend::Direction;
use crate::triggers::{InteractionEvent, Trigger, TriggerRuntime};
use crate::Result;

/// The __Boomerang__ trigger plays forward on pointer enter, then plays in
/// reverse automatically once the forward run completes.
#[derive(Debug, Default)]
pub struct Boomerang;

impl Trigger for Boomerang {
    fn on_disconnected(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        rt.player.set_direction(Direction::Forward);
        Ok(())
    }

    fn on_complete(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        rt.player.set_direction(Direction::Backward);
        rt.player.play()
    }

    fn on_event(&mut self, rt: &mut TriggerRuntime<'_>, event: &InteractionEvent) -> Result<()> {
        if *event != InteractionEvent::PointerEnter {
            return Ok(());
        }

        rt.player.set_direction(Direction::Forward);
        rt.player.play()
    }
}
