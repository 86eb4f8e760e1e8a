//! High score record
//!
//! A single best score persisted as a decimal string.

use crate::persistence::{KeyValueStore, StorageError};

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "neon_blaster_highscore";

    /// Parse a stored value. Absent or corrupt values count as zero.
    pub fn parse(raw: Option<&str>) -> Self {
        let best = match raw.map(str::trim) {
            None | Some("") => 0,
            Some(text) => text.parse::<u64>().unwrap_or_else(|_| {
                log::warn!("Ignoring corrupt high score {:?}", text);
                0
            }),
        };
        Self { best }
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        let high = Self::parse(store.get(Self::STORAGE_KEY).as_deref());
        log::info!("Loaded high score {}", high.best);
        high
    }

    /// Record a final score; returns true (and persists) when it is a new best
    pub fn record(
        &mut self,
        score: u64,
        store: &mut dyn KeyValueStore,
    ) -> Result<bool, StorageError> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;
        store.set(Self::STORAGE_KEY, &score.to_string())?;
        log::info!("New high score saved: {}", score);
        Ok(true)
    }
}
