use crate::backend::Direction;
use crate::triggers::{InteractionEvent, Trigger, TriggerRuntime};
use crate::Result;

/// The __Morph__ trigger plays the animation forward while the cursor is
/// over the target and in reverse once it moves away.
#[derive(Debug, Default)]
pub struct Morph;

impl Trigger for Morph {
    fn on_disconnected(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        rt.player.set_direction(Direction::Forward);
        Ok(())
    }

    fn on_event(&mut self, rt: &mut TriggerRuntime<'_>, event: &InteractionEvent) -> Result<()> {
        match event {
            InteractionEvent::PointerEnter => {
                rt.player.set_direction(Direction::Forward);
                rt.player.play()
            }
            InteractionEvent::PointerLeave => {
                rt.player.set_direction(Direction::Backward);
                rt.player.play()
            }
            _ => Ok(()),
        }
    }
}
