/// The step function: advances the world by one tick.
///
/// Processing order (fixed):
///   1. Input fallback (no key → keep the last direction)
///   2. Record the player's pre-tick cell
///   3. Pursuer moves (always, even when the player is blocked)
///   4. Food at the player's cell (skipped while stopped)
///   5. Win check
///   6. Collision check
///   7. Player move
///
/// The collision check compares each pursuer's post-move cell against
/// the player's current cell and the cell recorded in step 2; pursuer
/// pre-move cells are intentionally not examined. Keep this exact
/// shape; call sites and tests rely on it.

use rand::Rng;

use crate::domain::entity::Direction;
use super::event::GameEvent;
use super::world::{Phase, WorldState};

pub fn step<R: Rng + ?Sized>(
    world: &mut WorldState,
    input: Option<Direction>,
    rng: &mut R,
) -> Vec<GameEvent> {
    if world.phase != Phase::Playing {
        return vec![];
    }

    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    let dir = input.unwrap_or(world.last_dir);
    world.last_dir = dir;

    let prev = world.player.pos;

    // Pursuers first. Each runs its own throttle, so some of them sit
    // this tick out.
    for p in world.pursuers.iter_mut() {
        if let Some(d) = p.ai.decide(&world.board, p.actor.pos, p.actor.facing, rng) {
            p.actor.attempt_move(&world.board, d);
        }
    }

    // Only a non-pass-through actor eats; pursuers cross pellets
    // without disturbing them. A stopped player grinds against a wall
    // and its cell was already handled the tick it arrived.
    if !world.player.pass_through && !world.player.stopped {
        let pos = world.player.pos;
        if world.board.consume_food_if_present(pos) {
            world.score += world.rules.food_reward;
            events.push(GameEvent::FoodEaten { pos });

            if world.board.food_remaining() == 0 {
                world.phase = Phase::Won;
                events.push(GameEvent::AllFoodEaten);
                return events;
            }
        }
    }

    // A pursuer on the player's cell, or on the cell recorded before
    // this tick's moves, is a hit.
    let caught = world
        .pursuers
        .iter()
        .any(|p| p.actor.pos == world.player.pos || p.actor.pos == prev);
    if caught {
        world.phase = Phase::Dying;
        events.push(GameEvent::PlayerCaught);
        return events;
    }

    world.player.attempt_move(&world.board, dir);

    events
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
