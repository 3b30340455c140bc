use crate::backend::Direction;
use crate::scheduler::TimerHandle;
use crate::triggers::{InteractionEvent, Trigger, TriggerRuntime};
use crate::{IconError, Result};

/// What to do when a pending timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    /// Start playback of the armed run.
    Play,
    /// Advance to the next instruction after a frame jump.
    StepAfterFrame,
    /// Advance to the next instruction after a completed run.
    StepAfterComplete,
}

/// The __Sequence__ trigger interprets a scripted, comma-separated list of
/// instructions from the `sequence` attribute and loops over it forever:
///
/// - `play` / `play:reverse` — run the current segment (optionally backward)
/// - `frame:<n>` — jump to a frame and hold
/// - `state:<name>` — switch the segment used by the next `play`
/// - `delay:<ms>` / `delay:first:<ms>` / `delay:last:<ms>` /
///   `delay:first:last:<ms>` — pause before and/or after the next run
/// - `idle` — stop interpreting until settings change
///
/// Unknown instructions are a hard error so typos surface instead of being
/// silently skipped.
#[derive(Debug, Default)]
pub struct Sequence {
    index: usize,
    pending_state: Option<String>,
    delay_first: Option<u64>,
    delay_last: Option<u64>,
    timer: Option<(TimerHandle, TimerAction)>,
}

impl Sequence {
    fn cancel_timer(&mut self, rt: &mut TriggerRuntime<'_>) {
        if let Some((timer, _)) = self.timer.take() {
            rt.scheduler.cancel(timer);
        }
    }

    fn arm(&mut self, rt: &mut TriggerRuntime<'_>, delay_ms: u64, action: TimerAction) {
        self.cancel_timer(rt);
        self.timer = Some((rt.scheduler.schedule(delay_ms), action));
    }

    /// Take the next instruction, advance (wrapping), and execute it.
    fn step(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        let steps: Vec<String> = rt
            .settings
            .sequence
            .split(',')
            .map(|step| step.trim().to_string())
            .collect();
        if steps.is_empty() {
            return Ok(());
        }

        let step = match steps.get(self.index) {
            Some(step) => step.clone(),
            None => return Ok(()),
        };

        self.index += 1;
        if self.index >= steps.len() {
            self.index = 0;
        }

        let mut parts = step.split(':');
        let action = match parts.next() {
            Some(action) if !action.is_empty() => action,
            _ => return Ok(()),
        };
        let params: Vec<&str> = parts.collect();

        self.handle(rt, action, &params)
    }

    fn handle(&mut self, rt: &mut TriggerRuntime<'_>, action: &str, params: &[&str]) -> Result<()> {
        match action {
            "play" => {
                if let Some(state) = self.pending_state.take() {
                    rt.player.set_state(Some(&state))?;
                }

                if params.contains(&"reverse") {
                    rt.player.go_to_last_frame()?;
                    rt.player.set_direction(Direction::Backward);
                } else {
                    rt.player.go_to_first_frame()?;
                    rt.player.set_direction(Direction::Forward);
                }

                let delay = self.delay_first.take().unwrap_or(0);
                self.arm(rt, delay, TimerAction::Play);
                Ok(())
            }
            "frame" => {
                let frame = params
                    .iter()
                    .find(|param| is_plain_number(param))
                    .and_then(|param| param.parse::<f64>().ok())
                    .unwrap_or(0.0);
                rt.player.set_frame(frame)?;

                let delay = self.delay_first.take().unwrap_or(0);
                self.arm(rt, delay, TimerAction::StepAfterFrame);
                Ok(())
            }
            "state" => {
                self.pending_state = params.first().map(|param| param.to_string());
                self.step(rt)
            }
            "delay" => {
                let value = params
                    .iter()
                    .rev()
                    .find(|param| is_plain_number(param))
                    .and_then(|param| param.parse::<f64>().ok())
                    .filter(|ms| *ms > 0.0)
                    .map(|ms| ms as u64);

                // Without a parsed positive value, previously armed delays
                // stay untouched.
                if value.is_some() {
                    let first = params.contains(&"first");
                    let last = params.contains(&"last");
                    match (first, last) {
                        (true, true) => {
                            self.delay_first = value;
                            self.delay_last = value;
                        }
                        (false, true) => self.delay_last = value,
                        // A bare `delay:<ms>` means delay before the next run.
                        _ => self.delay_first = value,
                    }
                }

                self.step(rt)
            }
            "idle" => Ok(()),
            _ => Err(IconError::InvalidSequenceAction {
                action: action.to_string(),
            }),
        }
    }

    fn reset(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        self.cancel_timer(rt);
        self.index = 0;
        self.pending_state = None;
        self.delay_first = None;
        self.delay_last = None;
        if rt.player.is_playing() {
            rt.player.pause()?;
        }
        rt.player.set_speed(rt.settings.speed);
        Ok(())
    }
}

impl Trigger for Sequence {
    fn on_connected(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        rt.player.set_speed(rt.settings.speed);
        Ok(())
    }

    fn on_disconnected(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        self.cancel_timer(rt);
        self.index = 0;
        self.pending_state = None;
        self.delay_first = None;
        self.delay_last = None;
        rt.player.set_speed(1.0);
        Ok(())
    }

    fn on_ready(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        self.step(rt)
    }

    fn on_complete(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        let delay = self.delay_last.take().unwrap_or(0);
        self.arm(rt, delay, TimerAction::StepAfterComplete);
        Ok(())
    }

    fn on_settings_changed(&mut self, rt: &mut TriggerRuntime<'_>) -> Result<()> {
        self.reset(rt)?;
        self.step(rt)
    }

    fn on_event(&mut self, rt: &mut TriggerRuntime<'_>, event: &InteractionEvent) -> Result<()> {
        let handle = match event {
            InteractionEvent::TimerFired(handle) => *handle,
            _ => return Ok(()),
        };

        let action = match self.timer {
            Some((pending, action)) if pending == handle => action,
            _ => return Ok(()),
        };
        self.timer = None;

        match action {
            TimerAction::Play => rt.player.play(),
            TimerAction::StepAfterFrame | TimerAction::StepAfterComplete => self.step(rt),
        }
    }
}

/// Digits with an optional fractional part; rejects signs, exponents and
/// empty strings so delay flags never parse as values.
fn is_plain_number(raw: &str) -> bool {
    let mut parts = raw.splitn(2, '.');
    let integral = parts.next().unwrap_or("");
    let fractional = parts.next();

    if integral.is_empty() || !integral.bytes().all(|byte| byte.is_ascii_digit()) {
        return false;
    }
    match fractional {
        None => true,
        Some(digits) => !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit()),
    }
}

#[cfg(test)]
mod tests {
    use super::is_plain_number;

    #[test]
    fn test_plain_number_accepts_digits() {
        assert!(is_plain_number("0"));
        assert!(is_plain_number("42"));
        assert!(is_plain_number("12.5"));
    }

    #[test]
    fn test_plain_number_rejects_flags_and_signs() {
        assert!(!is_plain_number(""));
        assert!(!is_plain_number("first"));
        assert!(!is_plain_number("last"));
        assert!(!is_plain_number("-3"));
        assert!(!is_plain_number("1e3"));
        assert!(!is_plain_number("4."));
    }
}
