/// Pursuer steering: a biased random walk.
///
/// Pursuers keep going forward or turn; they reverse only when every
/// other exit is blocked. A wait counter throttles them below the
/// player's one-move-per-tick cadence. No pathfinding toward the
/// player: difficulty comes from numbers, not cunning.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::board::{Board, Pos};
use super::entity::Direction;

#[derive(Clone, Debug)]
pub struct PursuerAi {
    wait_counter: u32,
    damp_threshold: u32,
}

impl PursuerAi {
    pub fn new(damp_threshold: u32) -> Self {
        PursuerAi { wait_counter: 0, damp_threshold }
    }

    /// Decide this tick's move, or None while throttled.
    ///
    /// Below the damp threshold the counter ticks up and the pursuer
    /// holds still. At the threshold it resets and a direction is
    /// chosen uniformly among the open forward directions; with all
    /// three blocked the pursuer turns straight back (dead end).
    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        pos: Pos,
        facing: Direction,
        rng: &mut R,
    ) -> Option<Direction> {
        if self.wait_counter < self.damp_threshold {
            self.wait_counter += 1;
            return None;
        }
        self.wait_counter = 0;

        let open: Vec<Direction> = facing
            .forward()
            .iter()
            .copied()
            .filter(|&dir| board.step_from(pos, dir) != pos)
            .collect();

        match open.choose(rng) {
            Some(&dir) => Some(dir),
            None => Some(facing.opposite()),
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::CellKind;
    use crossterm::style::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board_from(rows: &[&str]) -> Board {
        let cells: Vec<Vec<CellKind>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '#' => CellKind::Wall,
                        '.' => CellKind::Food,
                        _ => CellKind::Space,
                    })
                    .collect()
            })
            .collect();
        let colors = vec![vec![Color::Blue; cells[0].len()]; cells.len()];
        Board::new(cells, colors)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn damper_throttles_to_every_nth_call() {
        let b = board_from(&["    "]);
        let mut ai = PursuerAi::new(2);
        let mut rng = rng();
        let pos = Pos::new(0, 1);

        // threshold 2: two idle calls, then a decision, repeating.
        for _ in 0..3 {
            assert!(ai.decide(&b, pos, Direction::Right, &mut rng).is_none());
            assert!(ai.decide(&b, pos, Direction::Right, &mut rng).is_none());
            assert!(ai.decide(&b, pos, Direction::Right, &mut rng).is_some());
        }
    }

    #[test]
    fn never_reverses_while_forward_is_open() {
        let b = board_from(&[
            "#####",
            "     ",
            "#####",
        ]);
        let mut ai = PursuerAi::new(0);
        let mut rng = rng();

        // Straight corridor, heading right: up/down are walls, so the
        // only open forward direction is Right. Left must never come up.
        for _ in 0..50 {
            let dir = ai.decide(&b, Pos::new(1, 2), Direction::Right, &mut rng);
            assert_eq!(dir, Some(Direction::Right));
        }
    }

    #[test]
    fn dead_end_forces_reverse() {
        let b = board_from(&[
            "####",
            "  ##",
            "####",
        ]);
        let mut ai = PursuerAi::new(0);
        let mut rng = rng();

        let dir = ai.decide(&b, Pos::new(1, 1), Direction::Right, &mut rng);
        assert_eq!(dir, Some(Direction::Left));
    }

    #[test]
    fn junction_choice_stays_in_open_forward_set() {
        let b = board_from(&[
            "# #",
            "   ",
            "# #",
        ]);
        let mut ai = PursuerAi::new(0);
        let mut rng = rng();

        // Heading right from the center: Right, Up, Down all open;
        // Left (the reverse) never picked.
        let mut seen_up = false;
        let mut seen_down = false;
        for _ in 0..200 {
            let dir = ai.decide(&b, Pos::new(1, 1), Direction::Right, &mut rng).unwrap();
            assert_ne!(dir, Direction::Left);
            seen_up |= dir == Direction::Up;
            seen_down |= dir == Direction::Down;
        }
        // Uniform choice over three options reaches the turns too.
        assert!(seen_up && seen_down);
    }
}
