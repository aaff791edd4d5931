//! One game session
//!
//! Owns the `GameData` aggregate, the RNG, and the collaborators (store,
//! audio, host bridge). Taps are latched here and consumed by the next
//! frame's tick, so input handling and frame updates never interleave.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, SoundEffect};
use crate::bridge::HostBridge;
use crate::persistence::ScoreStore;
use crate::sim::{tick, GameData, GameEvent, TickInput};

pub struct Session<S: ScoreStore> {
    game: GameData,
    rng: Pcg32,
    store: S,
    audio: AudioManager,
    bridge: HostBridge,
    input: TickInput,
}

impl<S: ScoreStore> Session<S> {
    /// Start a session at the store's resume level
    pub fn new(width: f32, height: f32, seed: u64, store: S) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = store.load_level();
        let game = GameData::new(width, height, level, &mut rng);
        log::info!("session started at level {level} ({width}x{height})");
        Self {
            game,
            rng,
            store,
            audio: AudioManager::new(),
            bridge: HostBridge::new(),
            input: TickInput::default(),
        }
    }

    pub fn game(&self) -> &GameData {
        &self.game
    }

    /// Latch a tap for the next frame. Also unlocks audio, which browsers
    /// gate behind a user gesture.
    pub fn tap(&mut self) {
        self.audio.resume();
        self.input.tap = true;
    }

    /// Advance one frame and route the resulting events
    pub fn frame(&mut self, delta_ms: f32) {
        let input = self.input;
        self.input = TickInput::default();

        let events = tick(&mut self.game, &input, delta_ms, &mut self.rng);
        for event in events {
            self.handle_event(event);
        }
    }

    /// Rebuild the session for new canvas dimensions. This restarts the
    /// current level with fresh geometry; losing in-level progress on
    /// resize is the documented behavior.
    pub fn resize(&mut self, width: f32, height: f32) {
        let level = self.game.level.number;
        self.game = GameData::new(width, height, level, &mut self.rng);
        self.input = TickInput::default();
        log::info!("resized to {width}x{height}, level {level} restarted");
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::PinShot => self.audio.play(SoundEffect::Shoot),
            GameEvent::PinAttached => self.audio.play(SoundEffect::Attach),
            GameEvent::LevelCleared { next_level } => {
                self.audio.play(SoundEffect::Win);
                self.store.save_level(next_level);
                log::info!("level cleared, resume point is now {next_level}");
            }
            GameEvent::GameOver { level } => {
                self.audio.play(SoundEffect::Fail);
                let high_score = self.store.load_high_score();
                if level > high_score {
                    self.store.save_high_score(level);
                }
                self.bridge.notify_game_end(level, level.max(high_score));
                log::info!("game over at level {level} (best {})", level.max(high_score));
            }
            GameEvent::Restarted => {
                self.store.save_level(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LEVEL_COMPLETE_DELAY_MS, REFERENCE_FRAME_MS};
    use crate::persistence::MemoryStore;
    use crate::sim::{min_angular_separation, GamePhase};

    const W: f32 = 400.0;
    const H: f32 = 700.0;

    fn session_with(store: MemoryStore) -> Session<MemoryStore> {
        Session::new(W, H, 0xFEED, store)
    }

    /// Tap, then run frames until the shot resolves
    fn shoot_and_resolve(session: &mut Session<MemoryStore>) {
        session.tap();
        session.frame(REFERENCE_FRAME_MS);
        for _ in 0..1000 {
            if session.game().flying_pin.is_none() {
                return;
            }
            session.frame(REFERENCE_FRAME_MS);
        }
        panic!("shot never resolved");
    }

    fn force_game_over(session: &mut Session<MemoryStore>) {
        // Blanket the circle so the next shot collides
        let config = session.game.config;
        let min_dist = min_angular_separation(&config);
        let n = (std::f32::consts::TAU / min_dist).ceil() as usize;
        session.game.phase = GamePhase::Playing;
        session.game.attached_pins = (0..n).map(|i| i as f32 * min_dist).collect();
        shoot_and_resolve(session);
        assert_eq!(session.game().phase, GamePhase::GameOver);
    }

    #[test]
    fn session_resumes_at_stored_level() {
        let session = session_with(MemoryStore::with_values(6, 9));
        assert_eq!(session.game().level.number, 6);

        let fresh = session_with(MemoryStore::new());
        assert_eq!(fresh.game().level.number, 1);
    }

    #[test]
    fn clearing_a_level_persists_the_next_as_resume_point() {
        let mut session = session_with(MemoryStore::new());
        session.game.attached_pins.clear();
        session.game.phase = GamePhase::Playing;

        for _ in 0..session.game().level.pins_to_place {
            shoot_and_resolve(&mut session);
        }
        assert_eq!(session.game().phase, GamePhase::LevelComplete);
        assert_eq!(session.store.load_level(), 2);

        // And after the celebration the next level is live
        let frames = (LEVEL_COMPLETE_DELAY_MS / REFERENCE_FRAME_MS).ceil() as usize + 1;
        for _ in 0..frames {
            session.frame(REFERENCE_FRAME_MS);
        }
        assert_eq!(session.game().phase, GamePhase::Playing);
        assert_eq!(session.game().level.number, 2);
    }

    #[test]
    fn game_over_updates_high_score_only_upward() {
        // Losing at level 7 with a stored best of 5 raises it to 7
        let mut session = Session::new(W, H, 1, MemoryStore::with_values(7, 5));
        force_game_over(&mut session);
        assert_eq!(session.store.load_high_score(), 7);

        // Losing at level 3 with a stored best of 5 leaves it alone
        let mut session = Session::new(W, H, 2, MemoryStore::with_values(3, 5));
        force_game_over(&mut session);
        assert_eq!(session.store.load_high_score(), 5);
    }

    #[test]
    fn restart_after_game_over_persists_level_one() {
        let mut session = session_with(MemoryStore::with_values(5, 5));
        force_game_over(&mut session);

        session.tap();
        session.frame(REFERENCE_FRAME_MS);
        assert_eq!(session.game().level.number, 1);
        assert_eq!(session.store.load_level(), 1);
    }

    #[test]
    fn resize_rebuilds_geometry_at_current_level() {
        let mut session = session_with(MemoryStore::with_values(4, 4));
        let old_center = session.game().config.center;

        session.resize(800.0, 1400.0);
        let game = session.game();
        assert_eq!(game.level.number, 4);
        assert_eq!(game.config.width, 800.0);
        assert_ne!(game.config.center, old_center);
        assert_eq!(game.phase, GamePhase::Idle);
    }

    #[test]
    fn tap_is_consumed_by_exactly_one_frame() {
        let mut session = session_with(MemoryStore::new());
        session.tap();
        session.frame(REFERENCE_FRAME_MS);
        assert_eq!(session.game().phase, GamePhase::Playing);
        let pin = session.game().flying_pin;
        assert!(pin.is_some());

        // Without another tap, no second shot after this one resolves
        for _ in 0..1000 {
            if session.game().flying_pin.is_none() {
                break;
            }
            session.frame(REFERENCE_FRAME_MS);
        }
        session.frame(REFERENCE_FRAME_MS);
        assert!(session.game().flying_pin.is_none());
    }
}
