/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or
/// incomplete. Everything tunable lives here: the map resource, the
/// glyph mapping, colors, spawn coordinates, lives, food reward, the
/// pursuer speed damper, and the tick rate.

use std::path::PathBuf;

use crossterm::style::Color;
use serde::Deserialize;

// ── Public Config Structs ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub map_path: PathBuf,
    pub screens_dir: PathBuf,
    pub tick_rate_ms: u64,
    pub glyphs: GlyphConfig,
    pub palette: PaletteConfig,
    pub spawns: SpawnConfig,
    pub rules: RulesConfig,
}

/// Map-file glyph per cell kind.
#[derive(Clone, Copy, Debug)]
pub struct GlyphConfig {
    pub wall: char,
    pub door: char,
    pub space: char,
    pub food: char,
}

/// Display color per cell kind and per actor.
#[derive(Clone, Debug)]
pub struct PaletteConfig {
    pub wall: Color,
    pub door: Color,
    pub space: Color,
    pub food: Color,
    pub player: Color,
    pub pursuers: Vec<Color>,
}

/// Spawn coordinates as (row, col). Four pursuers in this design.
#[derive(Clone, Debug)]
pub struct SpawnConfig {
    pub player: (usize, usize),
    pub pursuers: Vec<(usize, usize)>,
}

#[derive(Clone, Copy, Debug)]
pub struct RulesConfig {
    pub lives: i32,
    pub food_reward: u32,
    /// Ticks a pursuer waits between move attempts.
    pub pursuer_damper: u32,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    glyphs: TomlGlyphs,
    #[serde(default)]
    colors: TomlColors,
    #[serde(default)]
    spawns: TomlSpawns,
    #[serde(default)]
    rules: TomlRules,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_map")]
    map: String,
    #[serde(default = "default_screens_dir")]
    screens_dir: String,
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGlyphs {
    #[serde(default = "default_wall_glyph")]
    wall: String,
    #[serde(default = "default_door_glyph")]
    door: String,
    #[serde(default = "default_space_glyph")]
    space: String,
    #[serde(default = "default_food_glyph")]
    food: String,
}

#[derive(Deserialize, Debug)]
struct TomlColors {
    #[serde(default = "default_wall_color")]
    wall: String,
    #[serde(default = "default_wall_color")]
    door: String,
    #[serde(default = "default_space_color")]
    space: String,
    #[serde(default = "default_food_color")]
    food: String,
    #[serde(default = "default_food_color")]
    player: String,
    #[serde(default = "default_pursuer_colors")]
    pursuers: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlSpawns {
    #[serde(default = "default_player_spawn")]
    player: [usize; 2],
    #[serde(default = "default_pursuer_spawns")]
    pursuers: Vec<[usize; 2]>,
}

#[derive(Deserialize, Debug)]
struct TomlRules {
    #[serde(default = "default_lives")]
    lives: i32,
    #[serde(default = "default_food_reward")]
    food_reward: u32,
    #[serde(default = "default_pursuer_damper")]
    pursuer_damper: u32,
}

// ── Defaults ──

fn default_map() -> String { "maps/maze.txt".into() }
fn default_screens_dir() -> String { "screens".into() }
fn default_tick_rate() -> u64 { 150 }

fn default_wall_glyph() -> String { "█".into() }
fn default_door_glyph() -> String { "-".into() }
fn default_space_glyph() -> String { " ".into() }
fn default_food_glyph() -> String { "·".into() }

fn default_wall_color() -> String { "blue".into() }
fn default_space_color() -> String { "black".into() }
fn default_food_color() -> String { "yellow".into() }
fn default_pursuer_colors() -> Vec<String> {
    vec!["red".into(), "pink".into(), "cyan".into(), "orange".into()]
}

fn default_player_spawn() -> [usize; 2] { [15, 18] }
fn default_pursuer_spawns() -> Vec<[usize; 2]> {
    // One on the pen door, three inside the pen.
    vec![[8, 18], [9, 16], [9, 18], [9, 20]]
}

fn default_lives() -> i32 { 3 }
fn default_food_reward() -> u32 { 10 }
fn default_pursuer_damper() -> u32 { 1 }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            map: default_map(),
            screens_dir: default_screens_dir(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl Default for TomlGlyphs {
    fn default() -> Self {
        TomlGlyphs {
            wall: default_wall_glyph(),
            door: default_door_glyph(),
            space: default_space_glyph(),
            food: default_food_glyph(),
        }
    }
}

impl Default for TomlColors {
    fn default() -> Self {
        TomlColors {
            wall: default_wall_color(),
            door: default_wall_color(),
            space: default_space_color(),
            food: default_food_color(),
            player: default_food_color(),
            pursuers: default_pursuer_colors(),
        }
    }
}

impl Default for TomlSpawns {
    fn default() -> Self {
        TomlSpawns {
            player: default_player_spawn(),
            pursuers: default_pursuer_spawns(),
        }
    }
}

impl Default for TomlRules {
    fn default() -> Self {
        TomlRules {
            lives: default_lives(),
            food_reward: default_food_reward(),
            pursuer_damper: default_pursuer_damper(),
        }
    }
}

// ── Color names ──

/// Parse a color name from config. Unknown names fall back to white
/// with a warning so a typo never aborts the game.
fn color_from_name(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        "pink" => Color::Rgb { r: 255, g: 105, b: 180 },
        "orange" => Color::Rgb { r: 255, g: 165, b: 0 },
        other => {
            eprintln!("Warning: unknown color \"{other}\", using white");
            Color::White
        }
    }
}

/// First char of a configured glyph string, or the default when the
/// entry is empty.
fn glyph_from(value: &str, fallback: char) -> char {
    value.chars().next().unwrap_or(fallback)
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        Self::from_toml(toml_cfg, &search_dirs)
    }

    fn from_toml(cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        let mut pursuer_colors: Vec<Color> =
            cfg.colors.pursuers.iter().map(|n| color_from_name(n)).collect();
        // One color per spawn; short lists repeat the defaults.
        let fallbacks = default_pursuer_colors();
        while pursuer_colors.len() < cfg.spawns.pursuers.len() {
            let name = &fallbacks[pursuer_colors.len() % fallbacks.len()];
            pursuer_colors.push(color_from_name(name));
        }

        GameConfig {
            map_path: resolve_resource(&cfg.general.map, search_dirs),
            screens_dir: resolve_resource(&cfg.general.screens_dir, search_dirs),
            tick_rate_ms: cfg.general.tick_rate_ms,
            glyphs: GlyphConfig {
                wall: glyph_from(&cfg.glyphs.wall, '█'),
                door: glyph_from(&cfg.glyphs.door, '-'),
                space: glyph_from(&cfg.glyphs.space, ' '),
                food: glyph_from(&cfg.glyphs.food, '·'),
            },
            palette: PaletteConfig {
                wall: color_from_name(&cfg.colors.wall),
                door: color_from_name(&cfg.colors.door),
                space: color_from_name(&cfg.colors.space),
                food: color_from_name(&cfg.colors.food),
                player: color_from_name(&cfg.colors.player),
                pursuers: pursuer_colors,
            },
            spawns: SpawnConfig {
                player: (cfg.spawns.player[0], cfg.spawns.player[1]),
                pursuers: cfg.spawns.pursuers.iter().map(|p| (p[0], p[1])).collect(),
            },
            rules: RulesConfig {
                lives: cfg.rules.lives,
                food_reward: cfg.rules.food_reward,
                pursuer_damper: cfg.rules.pursuer_damper,
            },
        }
    }
}

/// Resolve a resource path: absolute paths pass through, relative paths
/// search the candidate dirs and fall back to CWD-relative.
fn resolve_resource(value: &str, search_dirs: &[PathBuf]) -> PathBuf {
    let raw = PathBuf::from(value);
    if raw.is_absolute() {
        return raw;
    }
    search_dirs
        .iter()
        .map(|d| d.join(value))
        .find(|p| p.exists())
        .unwrap_or(raw)
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so a linked binary still finds its data.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let cfg: TomlConfig = toml::from_str("").unwrap();
        let cfg = GameConfig::from_toml(cfg, &[]);
        assert_eq!(cfg.rules.lives, 3);
        assert_eq!(cfg.rules.food_reward, 10);
        assert_eq!(cfg.rules.pursuer_damper, 1);
        assert_eq!(cfg.glyphs.wall, '█');
        assert_eq!(cfg.spawns.pursuers.len(), 4);
        assert_eq!(cfg.palette.pursuers.len(), 4);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let text = r#"
            [rules]
            lives = 5

            [glyphs]
            food = "*"
        "#;
        let cfg: TomlConfig = toml::from_str(text).unwrap();
        let cfg = GameConfig::from_toml(cfg, &[]);
        assert_eq!(cfg.rules.lives, 5);
        assert_eq!(cfg.glyphs.food, '*');
        // Untouched keys keep their defaults.
        assert_eq!(cfg.rules.food_reward, 10);
        assert_eq!(cfg.glyphs.wall, '█');
    }

    #[test]
    fn short_pursuer_color_list_is_padded() {
        let text = r#"
            [colors]
            pursuers = ["red"]
        "#;
        let cfg: TomlConfig = toml::from_str(text).unwrap();
        let cfg = GameConfig::from_toml(cfg, &[]);
        assert_eq!(cfg.palette.pursuers.len(), cfg.spawns.pursuers.len());
    }

    #[test]
    fn color_names_resolve() {
        assert_eq!(color_from_name("Blue"), Color::Blue);
        assert_eq!(color_from_name("orange"), Color::Rgb { r: 255, g: 165, b: 0 });
    }
}
