/// The maze: cell grid + static color layer + remaining-food count.
///
/// The grid is truth. Rendering composes actors on top of it every
/// frame, so a pursuer crossing a pellet never disturbs it, and
/// collision/food checks always see real cell state, never paint.
/// The only mutation after load is food consumption (Food -> Space);
/// the color layer is immutable for the lifetime of the board.

use crossterm::style::Color;

use super::cell::CellKind;
use super::entity::Direction;

/// A board coordinate. Row 0 is the top of the maze.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<Vec<CellKind>>,
    colors: Vec<Vec<Color>>,
    width: usize,
    height: usize,
    food_remaining: usize,
}

impl Board {
    /// Build from parallel grids. The loader guarantees rectangular
    /// input; identical dimensions are an invariant here.
    pub fn new(cells: Vec<Vec<CellKind>>, colors: Vec<Vec<Color>>) -> Self {
        let height = cells.len();
        let width = cells.first().map_or(0, |r| r.len());
        assert_eq!(height, colors.len(), "cell and color grids differ in height");
        for (row, colors_row) in cells.iter().zip(&colors) {
            assert_eq!(row.len(), width, "cell grid is not rectangular");
            assert_eq!(colors_row.len(), width, "color grid is not rectangular");
        }
        let food_remaining = cells
            .iter()
            .flatten()
            .filter(|c| c.is_food())
            .count();
        Board { cells, colors, width, height, food_remaining }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Cell kind at `pos`. An out-of-bounds query is an invariant
    /// violation (movement never produces one), so it aborts.
    pub fn kind(&self, pos: Pos) -> CellKind {
        assert!(
            self.in_bounds(pos),
            "board query at {:?} outside {}x{} grid",
            pos, self.height, self.width,
        );
        self.cells[pos.row][pos.col]
    }

    /// Display color at `pos`. Same bounds contract as `kind`.
    pub fn color(&self, pos: Pos) -> Color {
        assert!(
            self.in_bounds(pos),
            "color query at {:?} outside {}x{} grid",
            pos, self.height, self.width,
        );
        self.colors[pos.row][pos.col]
    }

    pub fn is_passable(&self, pos: Pos) -> bool {
        self.kind(pos).is_passable()
    }

    pub fn food_remaining(&self) -> usize {
        self.food_remaining
    }

    /// Eat the pellet at `pos` if one is there: the cell becomes Space
    /// and the counter drops by one. No-op on any other cell kind.
    pub fn consume_food_if_present(&mut self, pos: Pos) -> bool {
        if self.kind(pos).is_food() {
            self.cells[pos.row][pos.col] = CellKind::Space;
            self.food_remaining -= 1;
            true
        } else {
            false
        }
    }

    /// The adjacent cell in `dir` if it is in bounds and passable,
    /// otherwise `pos` unchanged. Blocked is signalled by equality;
    /// callers compare rather than match an error.
    pub fn step_from(&self, pos: Pos, dir: Direction) -> Pos {
        let next = match dir {
            Direction::Up if pos.row > 0 => Pos::new(pos.row - 1, pos.col),
            Direction::Down if pos.row + 1 < self.height => Pos::new(pos.row + 1, pos.col),
            Direction::Left if pos.col > 0 => Pos::new(pos.row, pos.col - 1),
            Direction::Right if pos.col + 1 < self.width => Pos::new(pos.row, pos.col + 1),
            _ => return pos,
        };
        if self.is_passable(next) { next } else { pos }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
