//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Wall-time deltas in, state mutation + events out
//! - Randomness only through the injected `Rng`
//! - No rendering, audio, storage, or platform dependencies

pub mod geometry;
pub mod level;
pub mod particles;
pub mod state;
pub mod tick;

pub use geometry::{
    angular_distance, attached_pin_segment, attachment_angle, has_reached_circle,
    min_angular_separation, normalize_angle, pin_collides, PinSegment,
};
pub use level::Level;
pub use particles::{Particle, ParticleColor};
pub use state::{FlyingPin, GameConfig, GameData, GameEvent, GamePhase};
pub use tick::{tick, TickInput};
