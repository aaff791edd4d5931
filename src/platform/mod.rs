//! Platform support
//!
//! `FrameClock` turns the host's animation-callback timestamps into
//! per-frame deltas. The first callback (and the first after a reset) has
//! no predecessor, so it reports one reference frame.

use crate::consts::REFERENCE_FRAME_MS;

/// Delta-time source for the frame loop, with an explicit reset for teardown
/// and restart
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous callback, given this callback's
    /// timestamp
    pub fn delta_ms(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => (now_ms - last) as f32,
            None => REFERENCE_FRAME_MS,
        };
        self.last_ms = Some(now_ms);
        delta
    }

    /// Forget the previous timestamp (call when the loop stops or pauses)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_callback_defaults_to_reference_frame() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta_ms(1000.0), REFERENCE_FRAME_MS);
    }

    #[test]
    fn subsequent_callbacks_report_the_gap() {
        let mut clock = FrameClock::new();
        clock.delta_ms(1000.0);
        assert!((clock.delta_ms(1016.0) - 16.0).abs() < 1e-4);
        assert!((clock.delta_ms(1050.0) - 34.0).abs() < 1e-4);
    }

    #[test]
    fn reset_forgets_the_previous_timestamp() {
        let mut clock = FrameClock::new();
        clock.delta_ms(1000.0);
        clock.reset();
        // No huge delta after a long pause
        assert_eq!(clock.delta_ms(99_000.0), REFERENCE_FRAME_MS);
    }
}
