/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` (an array of Cell)
///   2. Compare each cell with `back` (the previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// This eliminates flicker from full-screen redraws. Every frame is
/// composed from true game state (the board first, visible actors on
/// top), so nothing ever needs to be "undrawn".

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::config::GameConfig;
use crate::domain::board::Pos;
use crate::domain::cell::CellKind;
use crate::sim::world::{Phase, WorldState};
use super::banner::{
    Banner, EMBEDDED_GAME_OVER, EMBEDDED_START, EMBEDDED_WIN,
};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Color::Black };

    /// Sentinel used to invalidate the back buffer: differs from any
    /// real cell, so every position gets diffed on the next flush.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color) -> Self {
        Cell { ch, fg, bg: Color::Black }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y); each char occupies one column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell::new(ch, fg));
            cx += 1;
        }
    }
}

// ── Renderer ──

/// Vertical offsets
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

/// Ticks per half-period of the start-screen prompt blink.
const PROMPT_BLINK_TICKS: u32 = 3;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
    start_banner: Banner,
    win_banner: Banner,
    game_over_banner: Banner,
    wall_glyph: char,
    art_color: Color,
    text_color: Color,
}

impl Renderer {
    pub fn new(config: &GameConfig) -> Self {
        let dir = &config.screens_dir;
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
            start_banner: Banner::load_or_embedded(dir, "start.txt", EMBEDDED_START),
            win_banner: Banner::load_or_embedded(dir, "win.txt", EMBEDDED_WIN),
            game_over_banner: Banner::load_or_embedded(dir, "game_over.txt", EMBEDDED_GAME_OVER),
            wall_glyph: config.glyphs.wall,
            art_color: config.palette.wall,
            text_color: config.palette.food,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Color::Black),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on the first frame.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        // Detect terminal resize.
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Color::Black), Clear(ClearType::All))?;
        }

        // Phase change → clear for a clean transition.
        let phase_changed = self.last_phase != Some(world.phase);
        if phase_changed {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Color::Black), Clear(ClearType::All))?;
            self.last_phase = Some(world.phase);
        }

        self.front.clear();

        match world.phase {
            Phase::StartScreen => self.compose_start(world),
            Phase::Playing | Phase::Dying => self.compose_game(world),
            Phase::Won => {
                let lines = self.win_banner.lines_with_score(world.score);
                self.compose_end(&lines);
            }
            Phase::GameOver => {
                let lines = self.game_over_banner.lines_with_score(world.score);
                self.compose_end(&lines);
            }
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Color::Black;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Color::Black)
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, w: &WorldState) {
        // ── HUD row ──
        let hud = format!(
            " SCORE {:<6}  LIVES {}",
            w.score,
            w.lives.max(0),
        );
        self.front.put_str(0, HUD_ROW, &hud, Color::White);

        // ── Maze ──
        for row in 0..w.board.height() {
            let y = MAP_ROW + row;
            if y >= self.front.height {
                break;
            }
            for col in 0..w.board.width() {
                if col >= self.front.width {
                    break;
                }
                let cell = self.game_cell(w, Pos::new(row, col));
                self.front.set(col, y, cell);
            }
        }
    }

    /// The visual for one maze cell: player on top, then pursuers,
    /// then the board's own content.
    fn game_cell(&self, w: &WorldState, pos: Pos) -> Cell {
        if w.player.pos == pos {
            if let Some(glyph) = w.death_frame {
                return Cell::new(glyph, w.player.color);
            }
            if w.player.visible {
                return Cell::new(w.player.glyph(), w.player.color);
            }
        }

        for p in &w.pursuers {
            if p.actor.visible && p.actor.pos == pos {
                return Cell::new(p.actor.glyph(), p.actor.color);
            }
        }

        let glyph = match w.board.kind(pos) {
            CellKind::Wall => w.glyphs.wall,
            CellKind::Door => w.glyphs.door,
            CellKind::Space => ' ',
            CellKind::Food => w.glyphs.food,
        };
        Cell::new(glyph, w.board.color(pos))
    }

    // ── Static screens ──

    /// Start banner with the prompt line blinking on the anim tick.
    fn compose_start(&mut self, w: &WorldState) {
        let prompt = self.start_banner.prompt_line();
        let show_prompt = (w.anim_tick / PROMPT_BLINK_TICKS) % 2 == 0;
        let lines: Vec<String> = self.start_banner.lines().to_vec();

        for (i, line) in lines.iter().enumerate() {
            if i >= self.front.height {
                break;
            }
            if prompt == Some(i) && !show_prompt {
                continue; // blank this frame
            }
            let color = self.banner_line_color(line);
            self.front.put_str(0, i, line, color);
        }
    }

    /// End banners sit a few rows down the screen.
    fn compose_end(&mut self, lines: &[String]) {
        for (i, line) in lines.iter().enumerate() {
            let y = MAP_ROW + i;
            if y >= self.front.height {
                break;
            }
            let color = self.banner_line_color(line);
            self.front.put_str(0, y, line, color);
        }
    }

    /// Art lines (containing the wall glyph) take the wall color,
    /// everything else reads as text.
    fn banner_line_color(&self, line: &str) -> Color {
        if line.contains(self.wall_glyph) {
            self.art_color
        } else {
            self.text_color
        }
    }
}
