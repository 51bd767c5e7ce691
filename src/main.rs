/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::entity::Direction;
use sim::event::GameEvent;
use sim::level;
use sim::sequence::{self, Pacer, ThreadPacer};
use sim::step;
use sim::world::{Phase, WorldState};
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();

    let board = match level::load_board(&config) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Could not load maze: {e}");
            std::process::exit(1);
        }
    };

    let mut world = WorldState::new(board, &config);
    let mut renderer = Renderer::new(&config);

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Muncher!");
    println!("Final Score: {}", world.score);
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc];

fn detect_movement(kb: &InputState) -> Option<Direction> {
    if kb.any_pressed(KEYS_UP) || kb.any_held(KEYS_UP) {
        Some(Direction::Up)
    } else if kb.any_pressed(KEYS_DOWN) || kb.any_held(KEYS_DOWN) {
        Some(Direction::Down)
    } else if kb.any_pressed(KEYS_LEFT) || kb.any_held(KEYS_LEFT) {
        Some(Direction::Left)
    } else if kb.any_pressed(KEYS_RIGHT) || kb.any_held(KEYS_RIGHT) {
        Some(Direction::Right)
    } else {
        None
    }
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut rng = rand::rng();
    let mut pacer = ThreadPacer;
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut last_tick = Instant::now();

    loop {
        kb.drain_events();
        if kb.ctrl_c_pressed() {
            break;
        }

        match world.phase {
            Phase::StartScreen => {
                if kb.any_key_pressed() {
                    world.start_new_game(config);
                    last_tick = Instant::now();
                } else if last_tick.elapsed() >= tick_rate {
                    // Drives the prompt blink.
                    world.anim_tick = world.anim_tick.wrapping_add(1);
                    last_tick = Instant::now();
                }
            }

            Phase::Playing => {
                if last_tick.elapsed() >= tick_rate {
                    let input = detect_movement(&kb);
                    let events = step::step(world, input, &mut rng);
                    react_to_events(world, renderer, &events, &mut pacer)?;
                    last_tick = Instant::now();
                }
            }

            Phase::Dying => {
                // Modal: the whole loop stops for the choreography.
                run_death_and_respawn(world, renderer, &mut pacer)?;
                last_tick = Instant::now();
            }

            Phase::Won | Phase::GameOver => {
                if kb.any_pressed(KEYS_QUIT) {
                    break;
                }
                if kb.any_key_pressed() {
                    world.start_new_game(config);
                    last_tick = Instant::now();
                }
            }
        }

        renderer.render(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn react_to_events(
    world: &mut WorldState,
    renderer: &mut Renderer,
    events: &[GameEvent],
    pacer: &mut dyn Pacer,
) -> io::Result<()> {
    for event in events {
        if matches!(event, GameEvent::AllFoodEaten) {
            // Show the emptied maze for a beat before the banner.
            world.phase = Phase::Playing;
            renderer.render(world)?;
            world.phase = Phase::Won;
            pacer.pause(sequence::STANDBY_PAUSE);
        }
    }
    Ok(())
}

/// The full death beat: spend a life, vanish the pursuers, play the
/// death frames, then either blink everyone back at spawn or end the
/// game. Blocks until done; nothing else moves during this.
fn run_death_and_respawn(
    world: &mut WorldState,
    renderer: &mut Renderer,
    pacer: &mut dyn Pacer,
) -> io::Result<()> {
    world.begin_death();
    renderer.render(world)?;

    sequence::run_death(
        |glyph| {
            world.death_frame = Some(glyph);
            renderer.render(world)
        },
        pacer,
    )?;
    world.death_frame = None;
    world.player.visible = false;
    renderer.render(world)?;

    if world.lives >= 0 {
        world.reset_positions();
        pacer.pause(sequence::STANDBY_PAUSE);
        world.set_actors_visible(true);
        renderer.render(world)?;

        sequence::run_blink(
            |show| {
                world.set_actors_visible(show);
                renderer.render(world)
            },
            pacer,
        )?;
        world.set_actors_visible(true);
    }

    world.finish_death();
    Ok(())
}
