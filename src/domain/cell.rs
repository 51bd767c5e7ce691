/// Cell kinds and their properties.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellKind {
    Wall,
    Door,  // pen gate: passable, drawn like a wall
    Space,
    Food,  // pickup target, becomes Space once eaten
}

impl CellKind {
    /// Can an actor occupy this cell? Only walls block.
    pub fn is_passable(self) -> bool {
        !matches!(self, CellKind::Wall)
    }

    /// Is this an uneaten food pellet?
    pub fn is_food(self) -> bool {
        matches!(self, CellKind::Food)
    }
}

impl Default for CellKind {
    fn default() -> Self {
        CellKind::Space
    }
}
