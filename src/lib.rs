//! Pin Spin - fire pins onto a rotating circle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, levels, particles, game state)
//! - `session`: One game session wiring the sim to its collaborators
//! - `renderer`: Canvas2D rendering
//! - `audio`: Fire-and-forget sound effects
//! - `persistence`: Resume-level and high-score storage
//! - `bridge`: Host-application game-end notification

pub mod audio;
pub mod bridge;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;

pub use session::Session;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal duration of one display frame at 60 Hz, in milliseconds.
    /// Motion and decay rates are expressed per reference frame so the
    /// simulation is independent of the actual callback cadence.
    pub const REFERENCE_FRAME_MS: f32 = 16.67;

    /// Design dimensions the geometry scale is derived from
    pub const DESIGN_WIDTH: f32 = 400.0;
    pub const DESIGN_HEIGHT: f32 = 700.0;

    /// Base geometry, multiplied by the screen-size scale
    pub const CIRCLE_RADIUS: f32 = 70.0;
    pub const PIN_LENGTH: f32 = 35.0;
    pub const PIN_RADIUS: f32 = 8.0;
    pub const PIN_SPEED: f32 = 12.0;

    /// Rotation speed bounds (radians per reference frame)
    pub const BASE_ROTATION_SPEED: f32 = 0.025;
    pub const MAX_ROTATION_SPEED: f32 = 0.12;

    /// Vertical offset of the pin launch point above the bottom edge
    pub const PIN_SPAWN_OFFSET: f32 = 100.0;

    /// Interval budgets for the higher-level rotation mechanics (ms)
    pub const DIRECTION_CHANGE_BUDGET_MS: f32 = 3000.0;
    pub const SPEED_CHANGE_BUDGET_MS: f32 = 2000.0;

    /// Celebration delay before the next level starts (ms)
    pub const LEVEL_COMPLETE_DELAY_MS: f32 = 1500.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
