/// Maze loader.
///
/// Parses a fixed-width text resource into a Board using the
/// configured glyph mapping. Unlike most of the game, this path is
/// strict: a ragged row or an unknown glyph makes the whole load fail,
/// because a session cannot start on a half-understood maze.
///
/// When the map file is missing on disk, the built-in maze below is
/// used instead (parsed with the same glyph mapping).

use std::fmt;
use std::io;
use std::path::Path;

use crossterm::style::Color;

use crate::config::{GameConfig, GlyphConfig, PaletteConfig};
use crate::domain::board::Board;
use crate::domain::cell::CellKind;

#[derive(Debug)]
pub enum MapError {
    Io(io::Error),
    /// The maze resource contains no rows at all.
    Empty,
    /// Row `row` is `found` cells wide where `expected` were required.
    RaggedRow { row: usize, expected: usize, found: usize },
    /// A character with no entry in the glyph mapping.
    UnknownGlyph { row: usize, col: usize, glyph: char },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "could not read maze resource: {e}"),
            MapError::Empty => write!(f, "maze resource is empty"),
            MapError::RaggedRow { row, expected, found } => write!(
                f,
                "maze row {row} is {found} cells wide, expected {expected}",
            ),
            MapError::UnknownGlyph { row, col, glyph } => write!(
                f,
                "unknown maze glyph {glyph:?} at row {row}, column {col}",
            ),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Load the configured maze, falling back to the built-in one when the
/// file does not exist. Parse failures are fatal either way.
pub fn load_board(config: &GameConfig) -> Result<Board, MapError> {
    match load_map(&config.map_path, &config.glyphs, &config.palette) {
        Err(MapError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            parse_map(EMBEDDED_MAZE, &config.glyphs, &config.palette)
        }
        other => other,
    }
}

/// Parse a maze file into a Board.
pub fn load_map(
    path: &Path,
    glyphs: &GlyphConfig,
    palette: &PaletteConfig,
) -> Result<Board, MapError> {
    let text = std::fs::read_to_string(path).map_err(MapError::Io)?;
    parse_map(&text, glyphs, palette)
}

/// Parse maze text into a Board. Every row must be exactly as wide as
/// the first, and every character must appear in the glyph mapping.
pub fn parse_map(
    text: &str,
    glyphs: &GlyphConfig,
    palette: &PaletteConfig,
) -> Result<Board, MapError> {
    // Only fully empty lines are skipped; a row of space glyphs is a
    // legitimate maze row.
    let rows: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
    if rows.is_empty() {
        return Err(MapError::Empty);
    }

    let expected = rows[0].chars().count();
    let mut cells: Vec<Vec<CellKind>> = Vec::with_capacity(rows.len());
    let mut colors: Vec<Vec<Color>> = Vec::with_capacity(rows.len());

    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != expected {
            return Err(MapError::RaggedRow { row, expected, found });
        }

        let mut cell_row = Vec::with_capacity(expected);
        let mut color_row = Vec::with_capacity(expected);
        for (col, glyph) in line.chars().enumerate() {
            let kind = if glyph == glyphs.wall {
                CellKind::Wall
            } else if glyph == glyphs.door {
                CellKind::Door
            } else if glyph == glyphs.food {
                CellKind::Food
            } else if glyph == glyphs.space {
                CellKind::Space
            } else {
                return Err(MapError::UnknownGlyph { row, col, glyph });
            };
            cell_row.push(kind);
            color_row.push(match kind {
                CellKind::Wall => palette.wall,
                CellKind::Door => palette.door,
                CellKind::Space => palette.space,
                CellKind::Food => palette.food,
            });
        }
        cells.push(cell_row);
        colors.push(color_row);
    }

    Ok(Board::new(cells, colors))
}

// ══════════════════════════════════════════════════════════════
// Built-in fallback maze
// ══════════════════════════════════════════════════════════════

/// The shipped maze, compiled in so the binary runs from anywhere.
/// 21 rows by 37 columns; the pen sits mid-board, door on top.
pub const EMBEDDED_MAZE: &str = include_str!("../../maps/maze.txt");

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GlyphConfig;
    use crate::domain::board::Pos;

    fn glyphs() -> GlyphConfig {
        GlyphConfig { wall: '#', door: '-', space: ' ', food: '.' }
    }

    fn palette() -> PaletteConfig {
        PaletteConfig {
            wall: Color::Blue,
            door: Color::Blue,
            space: Color::Black,
            food: Color::Yellow,
            player: Color::Yellow,
            pursuers: vec![Color::Red],
        }
    }

    #[test]
    fn parses_glyphs_into_cell_kinds() {
        let board = parse_map("####\n#.-#\n####\n", &glyphs(), &palette()).unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.kind(Pos::new(1, 1)), CellKind::Food);
        assert_eq!(board.kind(Pos::new(1, 2)), CellKind::Door);
        assert_eq!(board.kind(Pos::new(0, 0)), CellKind::Wall);
        assert_eq!(board.food_remaining(), 1);
    }

    #[test]
    fn colors_follow_cell_kind() {
        let board = parse_map("#.\n  \n", &glyphs(), &palette()).unwrap();
        assert_eq!(board.color(Pos::new(0, 0)), Color::Blue);
        assert_eq!(board.color(Pos::new(0, 1)), Color::Yellow);
        assert_eq!(board.color(Pos::new(1, 0)), Color::Black);
    }

    #[test]
    fn ragged_row_is_fatal() {
        let err = parse_map("####\n###\n", &glyphs(), &palette()).unwrap_err();
        match err {
            MapError::RaggedRow { row, expected, found } => {
                assert_eq!((row, expected, found), (1, 4, 3));
            }
            other => panic!("expected RaggedRow, got {other:?}"),
        }
    }

    #[test]
    fn unknown_glyph_is_fatal() {
        let err = parse_map("##\n#X\n", &glyphs(), &palette()).unwrap_err();
        match err {
            MapError::UnknownGlyph { row, col, glyph } => {
                assert_eq!((row, col, glyph), (1, 1, 'X'));
            }
            other => panic!("expected UnknownGlyph, got {other:?}"),
        }
    }

    #[test]
    fn empty_resource_is_fatal() {
        assert!(matches!(parse_map("", &glyphs(), &palette()), Err(MapError::Empty)));
        assert!(matches!(parse_map("\n\n", &glyphs(), &palette()), Err(MapError::Empty)));
    }

    #[test]
    fn embedded_maze_parses_with_default_glyphs() {
        let glyphs = GlyphConfig { wall: '█', door: '-', space: ' ', food: '·' };
        let board = parse_map(EMBEDDED_MAZE, &glyphs, &palette()).unwrap();
        assert_eq!(board.width(), 37);
        assert_eq!(board.height(), 21);
        assert!(board.food_remaining() > 0);
    }
}
