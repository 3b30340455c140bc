use crate::triggers::{InteractionEvent, Trigger, TriggerRuntime};
use crate::Result;

/// The __Click__ trigger plays the animation after a pointer-down or
/// touch-start on the target.
#[derive(Debug, Default)]
pub struct Click;

impl Trigger for Click {
    fn on_event(&mut self, rt: &mut TriggerRuntime<'_>, event: &InteractionEvent) -> Result<()> {
        if *event != InteractionEvent::PointerDown {
            return Ok(());
        }

        if rt.player.is_playing() {
            return Ok(());
        }

        rt.player.play_from_beginning()
    }
}
