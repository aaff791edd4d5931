//! Game state and core simulation types
//!
//! One `GameData` aggregate per session. Level transitions and restarts
//! replace the whole aggregate instead of patching fields in place.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::particles::Particle;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first tap
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a restart tap
    GameOver,
    /// Celebration spin before the next level starts
    LevelComplete,
}

/// Derived per-screen geometry. Immutable for the lifetime of one session;
/// rebuilt on resize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    /// Center of the rotating circle
    pub center: Vec2,
    pub circle_radius: f32,
    pub pin_length: f32,
    pub pin_radius: f32,
    /// Flying pin travel speed (pixels per reference frame)
    pub pin_speed: f32,
    pub base_rotation_speed: f32,
    pub max_rotation_speed: f32,
}

impl GameConfig {
    /// Derive geometry from the canvas dimensions
    pub fn new(width: f32, height: f32) -> Self {
        let scale = (width / DESIGN_WIDTH).min(height / DESIGN_HEIGHT);
        Self {
            width,
            height,
            center: Vec2::new(width / 2.0, height * 0.4),
            circle_radius: CIRCLE_RADIUS * scale,
            pin_length: PIN_LENGTH * scale,
            pin_radius: PIN_RADIUS * scale,
            pin_speed: PIN_SPEED * scale,
            base_rotation_speed: BASE_ROTATION_SPEED,
            max_rotation_speed: MAX_ROTATION_SPEED,
        }
    }

    /// Where a freshly shot pin appears
    pub fn pin_spawn(&self) -> Vec2 {
        Vec2::new(self.center.x, self.height - PIN_SPAWN_OFFSET)
    }
}

/// A pin in flight, absent when none has been shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyingPin {
    pub pos: Vec2,
}

/// Side effects the session routes to audio/persistence/bridge collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A pin left the launcher
    PinShot,
    /// A pin attached cleanly
    PinAttached,
    /// All pins placed; the next level is now the resume point
    LevelCleared { next_level: u32 },
    /// A pin hit an attached pin; `level` is the final level reached
    GameOver { level: u32 },
    /// A tap on the game-over screen started a fresh run at level 1
    Restarted,
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameData {
    pub phase: GamePhase,
    pub config: GameConfig,
    pub level: Level,
    /// Cumulative rotation in radians. Unbounded during play; angular
    /// comparisons always re-normalize, and the aggregate is rebuilt every
    /// level, so drift stays far below the minimum pin separation.
    pub rotation: f32,
    /// +1.0 or -1.0
    pub rotation_direction: f32,
    /// Current speed in radians per reference frame
    pub rotation_speed: f32,
    /// Attached-pin angles in the rotating frame. Pairwise separation is at
    /// least the minimum angular distance; `tick` only appends after the
    /// collision check passes.
    pub attached_pins: Vec<f32>,
    pub flying_pin: Option<FlyingPin>,
    pub pins_remaining: u32,
    pub particles: Vec<Particle>,
    /// Elapsed-time accumulators, in ms
    pub direction_change_timer: f32,
    pub speed_change_timer: f32,
    pub level_complete_timer: f32,
}

impl GameData {
    /// Build a fresh session aggregate for the given level number
    pub fn new(width: f32, height: f32, level_num: u32, rng: &mut impl Rng) -> Self {
        let config = GameConfig::new(width, height);
        let level = Level::generate(level_num, rng);
        Self {
            phase: GamePhase::Idle,
            config,
            rotation: 0.0,
            rotation_direction: 1.0,
            rotation_speed: level.rotation_speed,
            attached_pins: level.starting_angles.clone(),
            flying_pin: None,
            pins_remaining: level.pins_to_place,
            particles: Vec::new(),
            direction_change_timer: 0.0,
            speed_change_timer: 0.0,
            level_complete_timer: 0.0,
            level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn config_scales_from_smaller_axis() {
        // 800x700: height is the limiting axis (700/700 = 1 vs 800/400 = 2)
        let config = GameConfig::new(800.0, 700.0);
        assert_eq!(config.circle_radius, CIRCLE_RADIUS);
        assert_eq!(config.pin_length, PIN_LENGTH);

        // 360x640: width limits (0.9 vs ~0.914)
        let config = GameConfig::new(360.0, 640.0);
        assert!((config.circle_radius - CIRCLE_RADIUS * 0.9).abs() < 1e-4);
        assert_eq!(config.center, Vec2::new(180.0, 640.0 * 0.4));
    }

    #[test]
    fn fresh_game_starts_idle_with_level_layout() {
        let mut rng = Pcg32::seed_from_u64(7);
        let game = GameData::new(360.0, 640.0, 4, &mut rng);

        assert_eq!(game.phase, GamePhase::Idle);
        assert_eq!(game.level.number, 4);
        assert_eq!(game.attached_pins.len(), game.level.starting_angles.len());
        assert_eq!(game.pins_remaining, game.level.pins_to_place);
        assert!(game.flying_pin.is_none());
        assert!(game.particles.is_empty());
        assert_eq!(game.rotation, 0.0);
        assert_eq!(game.rotation_direction, 1.0);
        assert_eq!(game.rotation_speed, game.level.rotation_speed);
    }
}
