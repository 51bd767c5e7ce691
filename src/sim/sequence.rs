/// Modal, time-paced animation scripts (death, respawn blink).
///
/// These run between ticks and block the whole loop on purpose: the
/// screen freezes for a dramatic beat and nothing else updates. Each
/// script is an explicit finite frame list executed against a `Pacer`,
/// so tests drive them without real time.

use std::time::Duration;

/// Supplies the waits between script frames.
pub trait Pacer {
    fn pause(&mut self, d: Duration);
}

/// Pacer backed by the OS clock.
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Death animation frames, one per step, ending on a blank cell.
pub const DEATH_FRAMES: &[char] = &['O', 'o', '.', '\'', '*', ' '];
pub const DEATH_STEP: Duration = Duration::from_millis(200);

/// Respawn blink: visibility toggles, starting hidden.
pub const BLINK_TOGGLES: u32 = 4;
pub const BLINK_STEP: Duration = Duration::from_millis(500);

/// Quiet beat between reset and blink, and before the win banner.
pub const STANDBY_PAUSE: Duration = Duration::from_secs(1);

/// Run the death script: draw each frame, then wait.
pub fn run_death<E, F>(mut draw: F, pacer: &mut dyn Pacer) -> Result<(), E>
where
    F: FnMut(char) -> Result<(), E>,
{
    for &glyph in DEATH_FRAMES {
        draw(glyph)?;
        pacer.pause(DEATH_STEP);
    }
    Ok(())
}

/// Run the respawn blink: wait, toggle, repeat. Starts by hiding and
/// ends with the final toggle shown.
pub fn run_blink<E, F>(mut set_visible: F, pacer: &mut dyn Pacer) -> Result<(), E>
where
    F: FnMut(bool) -> Result<(), E>,
{
    let mut show = false;
    for _ in 0..BLINK_TOGGLES {
        pacer.pause(BLINK_STEP);
        set_visible(show)?;
        show = !show;
    }
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    /// Records every pause instead of sleeping.
    struct RecordingPacer {
        pauses: Vec<Duration>,
    }

    impl Pacer for RecordingPacer {
        fn pause(&mut self, d: Duration) {
            self.pauses.push(d);
        }
    }

    #[test]
    fn death_script_plays_all_frames_in_order() {
        let mut pacer = RecordingPacer { pauses: vec![] };
        let mut drawn = vec![];

        run_death::<Infallible, _>(
            |g| {
                drawn.push(g);
                Ok(())
            },
            &mut pacer,
        )
        .unwrap();

        assert_eq!(drawn, vec!['O', 'o', '.', '\'', '*', ' ']);
        assert_eq!(pacer.pauses, vec![DEATH_STEP; DEATH_FRAMES.len()]);
    }

    #[test]
    fn blink_toggles_four_times_ending_shown() {
        let mut pacer = RecordingPacer { pauses: vec![] };
        let mut states = vec![];

        run_blink::<Infallible, _>(
            |show| {
                states.push(show);
                Ok(())
            },
            &mut pacer,
        )
        .unwrap();

        assert_eq!(states, vec![false, true, false, true]);
        assert_eq!(pacer.pauses, vec![BLINK_STEP; BLINK_TOGGLES as usize]);
    }

    #[test]
    fn death_script_propagates_draw_errors() {
        let mut pacer = RecordingPacer { pauses: vec![] };
        let result = run_death::<&str, _>(|_| Err("boom"), &mut pacer);
        assert_eq!(result, Err("boom"));
        assert!(pacer.pauses.is_empty());
    }
}
