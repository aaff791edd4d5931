//! Resume-level and high-score persistence
//!
//! Two independent integer slots behind the `ScoreStore` trait so the
//! session can take a fake in tests. The browser store lives in
//! LocalStorage; any load failure falls back to level 1 instead of
//! surfacing an error.

/// Fallback value when a slot is missing or unreadable
pub const DEFAULT_LEVEL: u32 = 1;

/// Two integer slots: the level to resume at, and the best level reached
pub trait ScoreStore {
    fn load_level(&self) -> u32;
    fn save_level(&mut self, level: u32);
    fn load_high_score(&self) -> u32;
    fn save_high_score(&mut self, level: u32);
}

/// In-memory store for tests and the native demo binary
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    level: Option<u32>,
    high_score: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, mainly for tests
    pub fn with_values(level: u32, high_score: u32) -> Self {
        Self {
            level: Some(level),
            high_score: Some(high_score),
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load_level(&self) -> u32 {
        self.level.unwrap_or(DEFAULT_LEVEL)
    }

    fn save_level(&mut self, level: u32) {
        self.level = Some(level);
    }

    fn load_high_score(&self) -> u32 {
        self.high_score.unwrap_or(DEFAULT_LEVEL)
    }

    fn save_high_score(&mut self, level: u32) {
        self.high_score = Some(level);
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    const LEVEL_KEY: &'static str = "pin_spin_level";
    const HIGH_SCORE_KEY: &'static str = "pin_spin_highscore";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }

    fn load_slot(key: &str) -> u32 {
        let Some(storage) = Self::storage() else {
            return DEFAULT_LEVEL;
        };
        storage
            .get_item(key)
            .ok()
            .flatten()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_LEVEL)
    }

    fn save_slot(key: &str, value: u32) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, {key} not saved");
            return;
        };
        let _ = storage.set_item(key, &value.to_string());
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStore {
    fn load_level(&self) -> u32 {
        Self::load_slot(Self::LEVEL_KEY)
    }

    fn save_level(&mut self, level: u32) {
        Self::save_slot(Self::LEVEL_KEY, level);
    }

    fn load_high_score(&self) -> u32 {
        Self::load_slot(Self::HIGH_SCORE_KEY)
    }

    fn save_high_score(&mut self, level: u32) {
        Self::save_slot(Self::HIGH_SCORE_KEY, level);
    }
}
