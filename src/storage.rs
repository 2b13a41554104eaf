//! Best-score persistence. A single integer under the `highScore` key.

use web_sys::Storage;

use crate::error::{GameError, describe_js};

pub const HIGH_SCORE_KEY: &str = "highScore";

/// Where the best score lives between sessions.
pub trait ScoreStore {
    /// Stored best, or 0 when absent/unreadable.
    fn load_best(&self) -> u64;
    fn save_best(&mut self, best: u64) -> Result<(), GameError>;
}

/// Parse a stored value. Accepts a leading integer like `parseInt` would
/// ("42", " 42 ", "42.9"); anything else is 0.
pub fn parse_best(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else { return 0 };
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// In-memory store, used by tests and as the fallback when localStorage is blocked.
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    best: u64,
    pub writes: usize,
}

impl MemoryScoreStore {
    pub fn with_best(best: u64) -> Self {
        Self { best, writes: 0 }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best(&self) -> u64 {
        self.best
    }

    fn save_best(&mut self, best: u64) -> Result<(), GameError> {
        self.best = best;
        self.writes += 1;
        Ok(())
    }
}

/// `window.localStorage` backed store.
pub struct LocalScoreStore {
    storage: Storage,
}

impl LocalScoreStore {
    /// None when storage is disabled (private mode, sandboxed iframe, ...).
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl ScoreStore for LocalScoreStore {
    fn load_best(&self) -> u64 {
        match self.storage.get_item(HIGH_SCORE_KEY) {
            Ok(v) => parse_best(v.as_deref()),
            Err(e) => {
                log::warn!("could not read {}: {}", HIGH_SCORE_KEY, describe_js(&e));
                0
            }
        }
    }

    fn save_best(&mut self, best: u64) -> Result<(), GameError> {
        self.storage
            .set_item(HIGH_SCORE_KEY, &best.to_string())
            .map_err(|e| GameError::Storage(describe_js(&e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_is_zero() {
        assert_eq!(parse_best(None), 0);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_best(Some("abc")), 0);
        assert_eq!(parse_best(Some("")), 0);
        assert_eq!(parse_best(Some("-5")), 0);
    }

    #[test]
    fn leading_integer_is_kept() {
        assert_eq!(parse_best(Some("42")), 42);
        assert_eq!(parse_best(Some(" 17 ")), 17);
        assert_eq!(parse_best(Some("42.9")), 42);
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryScoreStore::with_best(3);
        assert_eq!(store.load_best(), 3);
        store.save_best(9).unwrap();
        assert_eq!(store.load_best(), 9);
        assert_eq!(store.writes, 1);
    }
}
