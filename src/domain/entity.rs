/// Actors: the player and the pursuers share one type, differentiated
/// by a small capability record chosen at construction (pass-through
/// plus frame set) instead of the usual base-class split.

use crossterm::style::Color;

use super::board::{Board, Pos};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The direct reverse of this direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The three directions excluding the direct reverse, in a fixed
    /// order so callers can index deterministically in tests.
    pub fn forward(self) -> [Direction; 3] {
        match self {
            Direction::Up => [Direction::Up, Direction::Left, Direction::Right],
            Direction::Down => [Direction::Down, Direction::Left, Direction::Right],
            Direction::Left => [Direction::Left, Direction::Up, Direction::Down],
            Direction::Right => [Direction::Right, Direction::Up, Direction::Down],
        }
    }
}

// ── Animation frames ──

/// Player mouth cycle per facing direction.
pub const PLAYER_FRAMES_UP: &[char] = &['v', 'V', '|', '|', 'V', 'v'];
pub const PLAYER_FRAMES_DOWN: &[char] = &['^'];
pub const PLAYER_FRAMES_LEFT: &[char] = &['}', ')', '>', '-', '-', '>', ')', '}'];
pub const PLAYER_FRAMES_RIGHT: &[char] = &['{', '(', '<', '-', '-', '<', '(', '{'];

/// Pursuers look the same from every side.
pub const PURSUER_FRAMES: &[char] = &['M'];

/// Per-direction animation frame cycle. The cursor advances once per
/// successful move in that direction, not per tick, so a blocked actor
/// holds its current glyph.
#[derive(Clone, Debug)]
pub struct Progression {
    frames: &'static [char],
    cursor: usize,
}

impl Progression {
    pub fn new(frames: &'static [char]) -> Self {
        assert!(!frames.is_empty(), "progression needs at least one frame");
        Progression { frames, cursor: 0 }
    }

    /// Current frame's glyph, no side effect.
    pub fn glyph(&self) -> char {
        self.frames[self.cursor]
    }

    /// Step the cursor forward one frame, wrapping at the end.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.frames.len();
    }
}

/// One progression per facing direction. Built once per actor at
/// construction and never rebuilt.
#[derive(Clone, Debug)]
pub struct ProgressionSet {
    up: Progression,
    down: Progression,
    left: Progression,
    right: Progression,
}

impl ProgressionSet {
    fn player() -> Self {
        ProgressionSet {
            up: Progression::new(PLAYER_FRAMES_UP),
            down: Progression::new(PLAYER_FRAMES_DOWN),
            left: Progression::new(PLAYER_FRAMES_LEFT),
            right: Progression::new(PLAYER_FRAMES_RIGHT),
        }
    }

    fn pursuer() -> Self {
        ProgressionSet {
            up: Progression::new(PURSUER_FRAMES),
            down: Progression::new(PURSUER_FRAMES),
            left: Progression::new(PURSUER_FRAMES),
            right: Progression::new(PURSUER_FRAMES),
        }
    }

    fn get(&self, dir: Direction) -> &Progression {
        match dir {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    fn get_mut(&mut self, dir: Direction) -> &mut Progression {
        match dir {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

/// Result of a move attempt. Explicit so call sites can't misread a
/// stale flag between moving and checking.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    Moved(Pos),
    Blocked,
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub pos: Pos,
    pub spawn: Pos,
    pub facing: Direction,
    progressions: ProgressionSet,
    /// Pursuers pass over pellets without eating them; the player's
    /// cell is subject to food consumption each tick.
    pub pass_through: bool,
    /// True for the ticks following a blocked move attempt.
    pub stopped: bool,
    /// Cleared during vanish/blink sequencing; the renderer skips
    /// invisible actors.
    pub visible: bool,
    pub color: Color,
}

impl Actor {
    pub fn player(spawn: Pos, color: Color) -> Self {
        Actor {
            pos: spawn,
            spawn,
            facing: Direction::Right,
            progressions: ProgressionSet::player(),
            pass_through: false,
            stopped: false,
            visible: true,
            color,
        }
    }

    pub fn pursuer(spawn: Pos, color: Color) -> Self {
        Actor {
            pos: spawn,
            spawn,
            facing: Direction::Right,
            progressions: ProgressionSet::pursuer(),
            pass_through: true,
            stopped: false,
            visible: true,
            color,
        }
    }

    /// Glyph for the current facing and animation frame.
    pub fn glyph(&self) -> char {
        self.progressions.get(self.facing).glyph()
    }

    /// Try to move one cell. Blocked: the actor stays put, keeps its
    /// facing, and the animation does not advance. Moved: facing turns
    /// to `dir` and that direction's progression steps one frame.
    pub fn attempt_move(&mut self, board: &Board, dir: Direction) -> MoveOutcome {
        let next = board.step_from(self.pos, dir);
        if next == self.pos {
            self.stopped = true;
            return MoveOutcome::Blocked;
        }
        self.stopped = false;
        self.facing = dir;
        self.progressions.get_mut(dir).advance();
        self.pos = next;
        MoveOutcome::Moved(next)
    }

    /// Teleport back to spawn without animating. Progressions and
    /// facing carry over; callers sequence visibility around this.
    pub fn reset_position(&mut self) {
        self.pos = self.spawn;
        self.stopped = false;
    }

    /// Show or blank this actor in place (blink/vanish sequencing).
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::CellKind;

    fn open_board(height: usize, width: usize) -> Board {
        let cells = vec![vec![CellKind::Space; width]; height];
        let colors = vec![vec![Color::Black; width]; height];
        Board::new(cells, colors)
    }

    fn walled_board() -> Board {
        // 3x3, open center only.
        let mut cells = vec![vec![CellKind::Wall; 3]; 3];
        cells[1][1] = CellKind::Space;
        let colors = vec![vec![Color::Blue; 3]; 3];
        Board::new(cells, colors)
    }

    #[test]
    fn progression_cycles_back_to_start() {
        for frames in [
            PLAYER_FRAMES_UP,
            PLAYER_FRAMES_DOWN,
            PLAYER_FRAMES_LEFT,
            PLAYER_FRAMES_RIGHT,
            PURSUER_FRAMES,
        ] {
            let mut p = Progression::new(frames);
            let first = p.glyph();
            for _ in 0..frames.len() {
                p.advance();
            }
            assert_eq!(p.glyph(), first);
        }
    }

    #[test]
    fn opposite_is_involutive() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            assert!(!dir.forward().contains(&dir.opposite()));
        }
    }

    #[test]
    fn move_advances_frame_and_position() {
        let b = open_board(1, 3);
        let mut a = Actor::player(Pos::new(0, 0), Color::Yellow);
        let before = a.glyph();

        let outcome = a.attempt_move(&b, Direction::Right);
        assert_eq!(outcome, MoveOutcome::Moved(Pos::new(0, 1)));
        assert!(!a.stopped);
        assert_eq!(a.facing, Direction::Right);
        assert_ne!(a.glyph(), before); // '{' -> '('
    }

    #[test]
    fn blocked_move_stops_without_advancing() {
        let b = walled_board();
        let mut a = Actor::player(Pos::new(1, 1), Color::Yellow);
        a.facing = Direction::Left;
        let before = a.glyph();

        let outcome = a.attempt_move(&b, Direction::Up);
        assert_eq!(outcome, MoveOutcome::Blocked);
        assert!(a.stopped);
        assert_eq!(a.pos, Pos::new(1, 1));
        assert_eq!(a.facing, Direction::Left);
        assert_eq!(a.glyph(), before);
    }

    #[test]
    fn stopped_clears_on_next_successful_move() {
        let b = open_board(1, 3);
        let mut a = Actor::player(Pos::new(0, 2), Color::Yellow);

        assert_eq!(a.attempt_move(&b, Direction::Right), MoveOutcome::Blocked);
        assert!(a.stopped);

        assert!(matches!(a.attempt_move(&b, Direction::Left), MoveOutcome::Moved(_)));
        assert!(!a.stopped);
    }

    #[test]
    fn reset_returns_to_spawn() {
        let b = open_board(1, 4);
        let mut a = Actor::pursuer(Pos::new(0, 0), Color::Red);
        a.attempt_move(&b, Direction::Right);
        a.attempt_move(&b, Direction::Right);
        assert_eq!(a.pos, Pos::new(0, 2));

        a.reset_position();
        assert_eq!(a.pos, a.spawn);
        assert!(!a.stopped);
    }
}
