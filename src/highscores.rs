//! High score persistence
//!
//! A single integer under one storage key. Anything unreadable counts as "no
//! high score yet".

use crate::persistence::KeyValueStore;

/// Best score across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub score: u64,
}

impl HighScore {
    /// Storage key holding the decimal score
    pub const STORAGE_KEY: &'static str = "orbRushHighScore";

    pub fn new(score: u64) -> Self {
        Self { score }
    }

    /// Decode a stored value, degrading to 0 when malformed
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u64>() {
            Ok(score) => Self { score },
            Err(_) => {
                log::warn!("Ignoring malformed high score {:?}", raw);
                Self::default()
            }
        }
    }

    /// Load from storage (missing key means 0)
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(raw) => {
                let high = Self::parse(&raw);
                log::info!("Loaded high score {}", high.score);
                high
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Write to storage
    pub fn save(&self, store: &mut impl KeyValueStore) {
        if store.set(Self::STORAGE_KEY, &self.score.to_string()) {
            log::info!("High score saved ({})", self.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_key_is_zero() {
        assert_eq!(HighScore::load(&MemoryStore::new()).score, 0);
    }

    #[test]
    fn test_malformed_values_degrade_to_zero() {
        for raw in ["", "abc", "-12", "1.5", "99999999999999999999999"] {
            assert_eq!(HighScore::parse(raw).score, 0, "{:?}", raw);
        }
        assert_eq!(HighScore::parse(" 420\n").score, 420);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        HighScore::new(1234).save(&mut store);
        assert_eq!(store.get(HighScore::STORAGE_KEY).as_deref(), Some("1234"));
        assert_eq!(HighScore::load(&store), HighScore::new(1234));
    }
}
