//! Decaying radial particle bursts
//!
//! Two burst shapes: a collision burst radiating from the impact point and a
//! success burst ringing the circle's circumference. Particles fall under a
//! small gravity and fade out; motion is normalized to the reference frame
//! duration so decay is frame-rate independent.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_FRAME_MS;
use crate::polar_to_cartesian;

/// Color tag resolved to a concrete color by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    PinRed,
    White,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per reference frame
    pub vel: Vec2,
    pub radius: f32,
    /// Opacity in `[0, 1]`; the particle is dropped once it reaches 0
    pub alpha: f32,
    pub color: ParticleColor,
}

pub const COLLISION_BURST_COUNT: usize = 20;
pub const SUCCESS_BURST_COUNT: usize = 30;

/// Downward acceleration per reference frame
const GRAVITY: f32 = 0.1;
/// Opacity lost per reference frame
const ALPHA_DECAY: f32 = 0.02;

/// Burst for a pin striking an attached pin: 20 particles radiating from the
/// impact point with jittered spread and mixed colors.
pub fn collision_burst(origin: Vec2, rng: &mut impl Rng) -> Vec<Particle> {
    (0..COLLISION_BURST_COUNT)
        .map(|i| {
            let angle =
                TAU * i as f32 / COLLISION_BURST_COUNT as f32 + rng.random_range(0.0..0.3);
            let speed = rng.random_range(2.0..6.0);
            let color = if rng.random_bool(0.5) {
                ParticleColor::PinRed
            } else {
                ParticleColor::White
            };
            Particle {
                pos: origin,
                vel: polar_to_cartesian(speed, angle),
                radius: rng.random_range(2.0..5.0),
                alpha: 1.0,
                color,
            }
        })
        .collect()
}

/// Burst for a cleared level: 30 particles leaving the circle's circumference
/// outward, all in the success color.
pub fn success_burst(center: Vec2, circle_radius: f32, rng: &mut impl Rng) -> Vec<Particle> {
    (0..SUCCESS_BURST_COUNT)
        .map(|i| {
            let angle = TAU * i as f32 / SUCCESS_BURST_COUNT as f32;
            let speed = rng.random_range(3.0..6.0);
            Particle {
                pos: center + polar_to_cartesian(circle_radius, angle),
                vel: polar_to_cartesian(speed, angle),
                radius: rng.random_range(3.0..7.0),
                alpha: 1.0,
                color: ParticleColor::Success,
            }
        })
        .collect()
}

/// Advance every particle by `delta_ms` of wall time and drop the faded ones
pub fn update(particles: &mut Vec<Particle>, delta_ms: f32) {
    let dt = delta_ms / REFERENCE_FRAME_MS;
    for p in particles.iter_mut() {
        p.pos += p.vel * dt;
        p.vel.y += GRAVITY * dt;
        p.alpha -= ALPHA_DECAY * dt;
    }
    particles.retain(|p| p.alpha > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn collision_burst_shape() {
        let origin = Vec2::new(100.0, 200.0);
        let burst = collision_burst(origin, &mut rng());
        assert_eq!(burst.len(), COLLISION_BURST_COUNT);
        for p in &burst {
            assert_eq!(p.pos, origin);
            assert_eq!(p.alpha, 1.0);
            let speed = p.vel.length();
            assert!((2.0..6.0).contains(&speed), "speed {speed} out of range");
            assert!((2.0..5.0).contains(&p.radius));
            assert!(matches!(p.color, ParticleColor::PinRed | ParticleColor::White));
        }
        // Both collision colors should show up across 20 draws
        assert!(burst.iter().any(|p| p.color == ParticleColor::PinRed));
        assert!(burst.iter().any(|p| p.color == ParticleColor::White));
    }

    #[test]
    fn success_burst_originates_on_circumference() {
        let center = Vec2::new(180.0, 256.0);
        let radius = 63.0;
        let burst = success_burst(center, radius, &mut rng());
        assert_eq!(burst.len(), SUCCESS_BURST_COUNT);
        for p in &burst {
            assert!((p.pos.distance(center) - radius).abs() < 1e-3);
            assert_eq!(p.color, ParticleColor::Success);
            let speed = p.vel.length();
            assert!((3.0..6.0).contains(&speed));
            assert!((3.0..7.0).contains(&p.radius));
            // Velocity points outward along the spawn direction
            assert!(p.vel.dot(p.pos - center) > 0.0);
        }
    }

    #[test]
    fn particles_fade_out_after_fifty_reference_frames() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 3.0,
            alpha: 1.0,
            color: ParticleColor::White,
        }];

        // 1 / 0.02 = 50 reference frames to fade; after 49 it's still alive
        for _ in 0..49 {
            update(&mut particles, REFERENCE_FRAME_MS);
        }
        assert_eq!(particles.len(), 1);
        assert!(particles[0].alpha > 0.0);

        update(&mut particles, REFERENCE_FRAME_MS);
        update(&mut particles, REFERENCE_FRAME_MS);
        assert!(particles.is_empty());
    }

    #[test]
    fn update_applies_gravity_and_motion() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(2.0, -1.0),
            radius: 3.0,
            alpha: 1.0,
            color: ParticleColor::Success,
        }];
        update(&mut particles, REFERENCE_FRAME_MS);

        let p = &particles[0];
        assert!((p.pos.x - 2.0).abs() < 1e-3);
        assert!((p.pos.y + 1.0).abs() < 1e-3);
        assert!((p.vel.y - (-1.0 + GRAVITY)).abs() < 1e-4);
        assert!((p.alpha - (1.0 - ALPHA_DECAY)).abs() < 1e-4);
    }
}
