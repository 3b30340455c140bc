use crate::triggers::{InteractionEvent, Trigger, TriggerRuntime};
use crate::Result;

/// The __Hover__ trigger plays the animation from the first to the last
/// frame when the cursor enters the target.
#[derive(Debug, Default)]
pub struct Hover;

impl Trigger for Hover {
    fn on_event(&mut self, rt: &mut TriggerRuntime<'_>, event: &InteractionEvent) -> Result<()> {
        if *event != InteractionEvent::PointerEnter {
            return Ok(());
        }

        if rt.player.is_playing() {
            return Ok(());
        }

        rt.player.play_from_beginning()
    }
}
