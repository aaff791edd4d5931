//! Angle geometry and pin collision tests
//!
//! Attached pins are stored as angles in the rotating circle's own frame.
//! Absolute screen angle = stored angle + current rotation, so every
//! comparison here re-normalizes before measuring arcs.

use std::f32::consts::TAU;

use glam::Vec2;

use super::state::{FlyingPin, GameConfig};
use crate::polar_to_cartesian;

/// Normalize an angle into `[0, 2π)`. Terminates for any finite input,
/// unlike repeated add/subtract.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let r = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if r >= TAU { r - TAU } else { r }
}

/// Shorter arc between two angles, in `[0, π]`
#[inline]
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let diff = (normalize_angle(a) - normalize_angle(b)).abs();
    diff.min(TAU - diff)
}

/// True once the flying pin's leading edge reaches the circle surface.
/// The boundary includes half the pin's own length so the pin visibly
/// overlaps the circle before it registers.
pub fn has_reached_circle(pin: &FlyingPin, config: &GameConfig) -> bool {
    pin.pos.distance(config.center) <= config.circle_radius + config.pin_length * 0.5
}

/// Angle to store for a pin that just reached the circle: the absolute
/// center-to-pin angle converted into the rotating frame.
pub fn attachment_angle(pin: &FlyingPin, config: &GameConfig, rotation: f32) -> f32 {
    let offset = pin.pos - config.center;
    normalize_angle(offset.y.atan2(offset.x) - rotation)
}

/// Minimum angular separation between attached pins: a chord-angle
/// approximation of two pin heads touching at the radius where they sit.
#[inline]
pub fn min_angular_separation(config: &GameConfig) -> f32 {
    (config.pin_radius * 2.5) / (config.circle_radius + config.pin_length)
}

/// True iff attaching at `new_angle` would touch any existing pin
pub fn pin_collides(new_angle: f32, attached: &[f32], config: &GameConfig) -> bool {
    let min_dist = min_angular_separation(config);
    attached
        .iter()
        .any(|&angle| angular_distance(new_angle, angle) < min_dist)
}

/// Screen-space endpoints of an attached pin, for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinSegment {
    /// On the circle surface
    pub start: Vec2,
    /// Head end, one pin length further out
    pub end: Vec2,
}

/// Map a stored relative angle plus the current rotation to screen coordinates
pub fn attached_pin_segment(angle: f32, rotation: f32, config: &GameConfig) -> PinSegment {
    let total = angle + rotation;
    PinSegment {
        start: config.center + polar_to_cartesian(config.circle_radius, total),
        end: config.center + polar_to_cartesian(config.circle_radius + config.pin_length, total),
    }
}
