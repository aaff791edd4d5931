//! Level parameter generation
//!
//! A `Level` is a pure function of its number (plus jitter for the starting
//! layout). These formulas are the entire difficulty curve.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::normalize_angle;
use crate::consts::{BASE_ROTATION_SPEED, MAX_ROTATION_SPEED};

/// Jitter applied to each evenly spaced starting angle, in radians. Small
/// relative to the minimum pin separation so the starting layout stays fair.
const STARTING_ANGLE_JITTER: f32 = 0.15;

/// Per-level parameters, immutable once generated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    /// Pins already attached when the level starts
    pub starting_pins: u32,
    /// Pins the player must place to clear the level
    pub pins_to_place: u32,
    /// Base rotation speed (radians per reference frame)
    pub rotation_speed: f32,
    /// Direction-reversal events per level, 0 below level 6
    pub direction_changes: u32,
    /// Speed-re-roll events per level, 0 below level 11
    pub speed_changes: u32,
    /// Pre-attached pin angles in `[0, 2π)`
    pub starting_angles: Vec<f32>,
}

impl Level {
    /// Generate the level for `number >= 1`
    pub fn generate(number: u32, rng: &mut impl Rng) -> Self {
        let starting_pins = (number / 3 + 1).min(8);
        let pins_to_place = (5 + number * 4 / 5).min(20);
        let rotation_speed =
            (BASE_ROTATION_SPEED + number as f32 * 0.005).min(MAX_ROTATION_SPEED);
        let direction_changes = if number > 5 { (number - 5) / 4 } else { 0 };
        let speed_changes = if number > 10 { (number - 10) / 5 } else { 0 };

        let spacing = TAU / starting_pins as f32;
        let starting_angles = (0..starting_pins)
            .map(|i| {
                let jitter = rng.random_range(-STARTING_ANGLE_JITTER..STARTING_ANGLE_JITTER);
                normalize_angle(i as f32 * spacing + jitter)
            })
            .collect();

        Self {
            number,
            starting_pins,
            pins_to_place,
            rotation_speed,
            direction_changes,
            speed_changes,
            starting_angles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(0x5EED)
    }

    #[test]
    fn level_one_baseline() {
        let level = Level::generate(1, &mut rng());
        assert_eq!(level.starting_pins, 1);
        assert_eq!(level.pins_to_place, 5);
        assert!((level.rotation_speed - 0.030).abs() < 1e-6);
        assert_eq!(level.direction_changes, 0);
        assert_eq!(level.speed_changes, 0);
        assert_eq!(level.starting_angles.len(), 1);
    }

    #[test]
    fn mechanics_unlock_at_level_thresholds() {
        let mut r = rng();
        assert_eq!(Level::generate(5, &mut r).direction_changes, 0);
        assert_eq!(Level::generate(9, &mut r).direction_changes, 1);
        assert_eq!(Level::generate(10, &mut r).speed_changes, 0);
        assert_eq!(Level::generate(15, &mut r).speed_changes, 1);
    }

    #[test]
    fn scalars_monotonic_until_their_caps() {
        let mut r = rng();
        let mut prev = Level::generate(1, &mut r);
        for n in 2..=60 {
            let level = Level::generate(n, &mut r);
            assert!(level.starting_pins >= prev.starting_pins);
            assert!(level.pins_to_place >= prev.pins_to_place);
            assert!(level.rotation_speed >= prev.rotation_speed);
            assert!(level.direction_changes >= prev.direction_changes);
            assert!(level.speed_changes >= prev.speed_changes);
            assert_eq!(level.starting_angles.len(), level.starting_pins as usize);
            prev = level;
        }
        assert_eq!(prev.starting_pins, 8);
        assert_eq!(prev.pins_to_place, 20);
        assert!((prev.rotation_speed - MAX_ROTATION_SPEED).abs() < 1e-6);
    }

    #[test]
    fn starting_angles_evenly_spaced_within_jitter() {
        let level = Level::generate(12, &mut rng());
        let spacing = TAU / level.starting_pins as f32;
        for (i, &angle) in level.starting_angles.iter().enumerate() {
            assert!((0.0..TAU).contains(&angle));
            let ideal = i as f32 * spacing;
            let offset = crate::sim::geometry::angular_distance(angle, ideal);
            assert!(
                offset <= STARTING_ANGLE_JITTER + 1e-5,
                "pin {i} drifted {offset} from its slot"
            );
        }
    }
}
