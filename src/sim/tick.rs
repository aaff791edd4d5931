//! Per-frame state machine
//!
//! One `tick` per display frame. Input is latched into a `TickInput` and
//! consumed here, so taps and frame updates never interleave mid-update.
//! Side effects are reported as `GameEvent`s for the session to route.

use rand::Rng;

use super::geometry::{attachment_angle, has_reached_circle, pin_collides};
use super::particles;
use super::state::{FlyingPin, GameData, GameEvent, GamePhase};
use crate::consts::*;

/// Input latched for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Tap/click since the previous frame
    pub tap: bool,
}

/// Advance the game by `delta_ms` of wall time
pub fn tick(
    game: &mut GameData,
    input: &TickInput,
    delta_ms: f32,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.tap {
        handle_tap(game, rng, &mut events);
    }

    let dt = delta_ms / REFERENCE_FRAME_MS;

    match game.phase {
        GamePhase::Playing => {
            advance_rotation(game, delta_ms, dt, rng);
            advance_flying_pin(game, dt, rng, &mut events);
        }
        GamePhase::LevelComplete => {
            // Celebratory spin: current speed, no direction/speed mechanics
            game.rotation += game.rotation_speed * dt;
            game.level_complete_timer += delta_ms;
            if game.level_complete_timer > LEVEL_COMPLETE_DELAY_MS {
                start_next_level(game, rng);
            }
        }
        GamePhase::Idle | GamePhase::GameOver => {}
    }

    // Particles keep animating through game-over and post-transition frames
    particles::update(&mut game.particles, delta_ms);

    events
}

/// Tap semantics by phase: start-and-shoot, shoot, or restart
fn handle_tap(game: &mut GameData, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    match game.phase {
        GamePhase::Idle => {
            game.phase = GamePhase::Playing;
            shoot(game, events);
        }
        GamePhase::Playing => shoot(game, events),
        GamePhase::GameOver => {
            // Discard the session wholesale and start over at level 1
            let config = game.config;
            *game = GameData::new(config.width, config.height, 1, rng);
            events.push(GameEvent::Restarted);
        }
        GamePhase::LevelComplete => {}
    }
}

/// Spawn a flying pin if none is in flight and pins remain
fn shoot(game: &mut GameData, events: &mut Vec<GameEvent>) {
    if game.flying_pin.is_some() || game.pins_remaining == 0 {
        return;
    }
    game.flying_pin = Some(FlyingPin {
        pos: game.config.pin_spawn(),
    });
    events.push(GameEvent::PinShot);
}

/// Rotation advance plus the timed direction-flip and speed-re-roll mechanics
fn advance_rotation(game: &mut GameData, delta_ms: f32, dt: f32, rng: &mut impl Rng) {
    game.rotation += game.rotation_speed * game.rotation_direction * dt;

    if game.level.direction_changes > 0 {
        game.direction_change_timer += delta_ms;
        if game.direction_change_timer > DIRECTION_CHANGE_BUDGET_MS / game.level.direction_changes as f32
        {
            game.rotation_direction = -game.rotation_direction;
            game.direction_change_timer = 0.0;
        }
    }

    if game.level.speed_changes > 0 {
        game.speed_change_timer += delta_ms;
        if game.speed_change_timer > SPEED_CHANGE_BUDGET_MS / game.level.speed_changes as f32 {
            game.rotation_speed = game.level.rotation_speed * (0.5 + rng.random::<f32>());
            game.speed_change_timer = 0.0;
        }
    }
}

/// Move the in-flight pin and resolve attach-or-collide when it arrives
fn advance_flying_pin(
    game: &mut GameData,
    dt: f32,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let Some(mut pin) = game.flying_pin else {
        return;
    };
    pin.pos.y -= game.config.pin_speed * dt;
    game.flying_pin = Some(pin);

    if !has_reached_circle(&pin, &game.config) {
        return;
    }

    let angle = attachment_angle(&pin, &game.config, game.rotation);
    if pin_collides(angle, &game.attached_pins, &game.config) {
        // The colliding angle is never appended
        game.phase = GamePhase::GameOver;
        game.particles = particles::collision_burst(pin.pos, rng);
        events.push(GameEvent::GameOver {
            level: game.level.number,
        });
    } else {
        game.attached_pins.push(angle);
        game.pins_remaining -= 1;
        events.push(GameEvent::PinAttached);

        if game.pins_remaining == 0 {
            game.phase = GamePhase::LevelComplete;
            game.particles =
                particles::success_burst(game.config.center, game.config.circle_radius, rng);
            game.level_complete_timer = 0.0;
            events.push(GameEvent::LevelCleared {
                next_level: game.level.number + 1,
            });
        }
    }

    game.flying_pin = None;
}

/// Swap in a fresh aggregate for the next level, already playing
fn start_next_level(game: &mut GameData, rng: &mut impl Rng) {
    let config = game.config;
    let next = game.level.number + 1;
    *game = GameData::new(config.width, config.height, next, rng);
    game.phase = GamePhase::Playing;
}
