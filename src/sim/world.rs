/// WorldState: the complete snapshot of a running game.
///
/// Two board layers:
///   - `base_board`: the maze as loaded. Never mutated.
///   - `board`: the live copy; pellets disappear from it as the
///     player eats. A fresh game clones `base_board` again.
///
/// Actors are rebuilt on a fresh game and merely repositioned on a
/// respawn, so progressions and score survive a lost life.

use crate::config::{GameConfig, GlyphConfig, RulesConfig};
use crate::domain::ai::PursuerAi;
use crate::domain::board::{Board, Pos};
use crate::domain::entity::{Actor, Direction};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    StartScreen,
    Playing,
    Dying,
    Won,
    GameOver,
}

/// A pursuer: shared actor mechanics plus its own steering state.
pub struct Pursuer {
    pub actor: Actor,
    pub ai: PursuerAi,
}

pub struct WorldState {
    /// Original maze data. Never mutated after load.
    base_board: Board,
    /// Live maze; food consumption lands here.
    pub board: Board,

    pub player: Actor,
    pub pursuers: Vec<Pursuer>,

    pub score: u32,
    pub lives: i32,
    pub phase: Phase,

    /// Last commanded direction; reused on input-less ticks so the
    /// player keeps rolling (continuous motion).
    pub last_dir: Direction,
    /// Glyph of the death animation frame currently on screen.
    pub death_frame: Option<char>,

    pub anim_tick: u32,
    pub tick: u64,

    pub rules: RulesConfig,
    pub glyphs: GlyphConfig,
}

impl WorldState {
    pub fn new(board: Board, config: &GameConfig) -> Self {
        let player = build_player(&board, config);
        let pursuers = build_pursuers(&board, config);
        WorldState {
            base_board: board.clone(),
            board,
            player,
            pursuers,
            score: 0,
            lives: config.rules.lives,
            phase: Phase::StartScreen,
            last_dir: Direction::Right,
            death_frame: None,
            anim_tick: 0,
            tick: 0,
            rules: config.rules,
            glyphs: config.glyphs,
        }
    }

    /// Begin a fresh game: pristine maze, zero score, full lives,
    /// everyone at spawn. Also used to restart from the end screens.
    pub fn start_new_game(&mut self, config: &GameConfig) {
        self.board = self.base_board.clone();
        self.score = 0;
        self.lives = config.rules.lives;
        self.player = build_player(&self.board, config);
        self.pursuers = build_pursuers(&self.board, config);

        // The pellet under the player spawn is covered from the first
        // frame and never scores; eat it up front so the count and the
        // screen agree.
        self.board.consume_food_if_present(self.player.pos);

        self.last_dir = Direction::Right;
        self.death_frame = None;
        self.tick = 0;
        self.anim_tick = 0;
        self.phase = Phase::Playing;
    }

    /// Collision aftermath, part 1: spend a life and vanish the
    /// pursuers. The death animation runs between the two parts.
    pub fn begin_death(&mut self) {
        self.lives -= 1;
        for p in &mut self.pursuers {
            p.actor.set_visible(false);
        }
    }

    /// Collision aftermath, part 2: reset everyone to spawn for a
    /// respawn, or end the game. Returns true when a respawn follows.
    pub fn finish_death(&mut self) -> bool {
        if self.lives >= 0 {
            self.reset_positions();
            self.last_dir = Direction::Right;
            self.phase = Phase::Playing;
            true
        } else {
            self.phase = Phase::GameOver;
            false
        }
    }

    /// Force every actor back to its spawn cell without animating.
    pub fn reset_positions(&mut self) {
        self.player.reset_position();
        for p in &mut self.pursuers {
            p.actor.reset_position();
        }
    }

    /// Show or hide every actor at once (respawn blink).
    pub fn set_actors_visible(&mut self, visible: bool) {
        self.player.set_visible(visible);
        for p in &mut self.pursuers {
            p.actor.set_visible(visible);
        }
    }
}

// ── Actor construction from trusted configuration ──

fn spawn_pos(board: &Board, (row, col): (usize, usize), who: &str) -> Pos {
    let pos = Pos::new(row, col);
    assert!(
        board.in_bounds(pos) && board.is_passable(pos),
        "{who} spawn {pos:?} is not a passable maze cell",
    );
    pos
}

fn build_player(board: &Board, config: &GameConfig) -> Actor {
    let pos = spawn_pos(board, config.spawns.player, "player");
    Actor::player(pos, config.palette.player)
}

fn build_pursuers(board: &Board, config: &GameConfig) -> Vec<Pursuer> {
    config
        .spawns
        .pursuers
        .iter()
        .zip(&config.palette.pursuers)
        .map(|(&spawn, &color)| Pursuer {
            actor: Actor::pursuer(spawn_pos(board, spawn, "pursuer"), color),
            ai: PursuerAi::new(config.rules.pursuer_damper),
        })
        .collect()
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PaletteConfig, SpawnConfig};
    use crate::domain::cell::CellKind;
    use crossterm::style::Color;
    use std::path::PathBuf;

    /// Helper: build a Board from a string diagram.
    /// Legend:  '#'=Wall  '.'=Food  ' '=Space
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

    fn config(player: (usize, usize), pursuers: Vec<(usize, usize)>) -> GameConfig {
        GameConfig {
            map_path: PathBuf::new(),
            screens_dir: PathBuf::new(),
            tick_rate_ms: 150,
            glyphs: crate::config::GlyphConfig {
                wall: '#',
                door: '-',
                space: ' ',
                food: '.',
            },
            palette: PaletteConfig {
                wall: Color::Blue,
                door: Color::Blue,
                space: Color::Black,
                food: Color::Yellow,
                player: Color::Yellow,
                pursuers: vec![Color::Red; pursuers.len()],
            },
            spawns: SpawnConfig { player, pursuers },
            rules: RulesConfig {
                lives: 3,
                food_reward: 10,
                pursuer_damper: 1,
            },
        }
    }

    #[test]
    fn new_game_eats_spawn_pellet_without_scoring() {
        let board = board_from(&["...."]);
        let cfg = config((0, 1), vec![(0, 3)]);
        let mut world = WorldState::new(board, &cfg);

        world.start_new_game(&cfg);
        assert_eq!(world.board.food_remaining(), 3);
        assert_eq!(world.score, 0);
        assert_eq!(world.board.kind(Pos::new(0, 1)), CellKind::Space);
    }

    #[test]
    fn respawns_until_lives_run_out() {
        let board = board_from(&["    "]);
        let cfg = config((0, 0), vec![(0, 3)]);
        let mut world = WorldState::new(board, &cfg);
        world.start_new_game(&cfg);
        world.score = 40;

        // Lives 3 -> 2 -> 1 -> 0: each collision still respawns.
        for expected in [2, 1, 0] {
            world.begin_death();
            assert_eq!(world.lives, expected);
            assert!(world.finish_death());
            assert_eq!(world.phase, Phase::Playing);
            assert_eq!(world.player.pos, world.player.spawn);
        }

        // The next one goes negative: game over, score untouched.
        world.begin_death();
        assert_eq!(world.lives, -1);
        assert!(!world.finish_death());
        assert_eq!(world.phase, Phase::GameOver);
        assert_eq!(world.score, 40);
    }

    #[test]
    fn begin_death_hides_pursuers_only() {
        let board = board_from(&["    "]);
        let cfg = config((0, 0), vec![(0, 2), (0, 3)]);
        let mut world = WorldState::new(board, &cfg);
        world.start_new_game(&cfg);

        world.begin_death();
        assert!(world.player.visible);
        assert!(world.pursuers.iter().all(|p| !p.actor.visible));
    }

    #[test]
    fn restart_restores_eaten_pellets() {
        let board = board_from(&[" .."]);
        let cfg = config((0, 0), vec![(0, 2)]);
        let mut world = WorldState::new(board, &cfg);
        world.start_new_game(&cfg);

        world.board.consume_food_if_present(Pos::new(0, 1));
        assert_eq!(world.board.food_remaining(), 1);

        world.start_new_game(&cfg);
        assert_eq!(world.board.food_remaining(), 2);
    }

    #[test]
    #[should_panic(expected = "not a passable")]
    fn wall_spawn_is_rejected() {
        let board = board_from(&["# "]);
        let cfg = config((0, 0), vec![]);
        WorldState::new(board, &cfg);
    }
}
