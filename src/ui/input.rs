/// Keyboard state tracker over crossterm's event queue.
///
/// `drain_events` is called once per frame and never blocks
/// (`poll` with a zero timeout), so the tick cadence stays loop-driven
/// even when the keyboard is silent. Tracks which keys are currently
/// held and which went down this frame; terminals without Release
/// events fall back to a hold timeout.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, poll};

/// After this long without a Press/Repeat event, a key counts as
/// released. Fallback for terminals that never report Release.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

pub struct InputState {
    /// Timestamp of the last Press/Repeat event for each key.
    last_active: HashMap<KeyCode, Instant>,
    /// Keys that went from "up" to "down" during the latest drain.
    fresh: Vec<KeyCode>,
    /// Ctrl+C seen during the latest drain.
    ctrl_c: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            last_active: HashMap::with_capacity(16),
            fresh: Vec::with_capacity(8),
            ctrl_c: false,
        }
    }

    /// Drain all pending terminal events and update key states.
    /// Call once per frame, before the simulation tick.
    pub fn drain_events(&mut self) {
        self.fresh.clear();
        self.ctrl_c = false;

        while poll(Duration::ZERO).unwrap_or(false) {
            let Ok(Event::Key(key)) = event::read() else { continue };

            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            {
                self.ctrl_c = true;
            }

            match key.kind {
                KeyEventKind::Release => {
                    self.last_active.remove(&key.code);
                }
                _ => {
                    let was_held = self.held_inner(key.code);
                    self.last_active.insert(key.code, Instant::now());
                    if !was_held {
                        self.fresh.push(key.code);
                    }
                }
            }
        }

        // Expire keys that timed out (no Release support).
        let now = Instant::now();
        self.last_active.retain(|_, t| now.duration_since(*t) < HOLD_TIMEOUT);
    }

    /// Is any of these keys currently held? (continuous actions)
    pub fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.held_inner(*c))
    }

    /// Did any of these keys go down this frame? (edge trigger)
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.fresh.contains(c))
    }

    /// Did any key at all go down this frame? Start and end screens
    /// advance on this.
    pub fn any_key_pressed(&self) -> bool {
        !self.fresh.is_empty()
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.ctrl_c
    }

    /// Is this key currently held down (last Press/Repeat within the
    /// hold timeout)? Internal helper for `any_held` and drain logic.
    fn held_inner(&self, code: KeyCode) -> bool {
        self.last_active
            .get(&code)
            .map(|t| t.elapsed() < HOLD_TIMEOUT)
            .unwrap_or(false)
    }
}
