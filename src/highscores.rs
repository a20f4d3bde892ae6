//! High score leaderboard
//!
//! A pull-based view over `ScoreStore::list_all`. Every `load`/`refresh`
//! reflects the latest completed flush; nothing is cached beyond that.

use crate::persistence::{ScoreRecord, ScoreStore, fallback_records};

/// Leaderboard rows, highest score first
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<ScoreRecord>,
    fallback: bool,
}

impl Leaderboard {
    /// Read the store, or show the built-in rows if it cannot be read
    pub fn load(store: &dyn ScoreStore) -> Self {
        match store.list_all() {
            Ok(entries) => {
                log::info!("Loaded {} leaderboard entries", entries.len());
                Self {
                    entries,
                    fallback: false,
                }
            }
            Err(err) => {
                log::error!("Leaderboard unavailable: {}", err);
                Self::fallback()
            }
        }
    }

    pub fn fallback() -> Self {
        Self {
            entries: fallback_records(),
            fallback: true,
        }
    }

    pub fn refresh(&mut self, store: &dyn ScoreStore) {
        *self = Self::load(store);
    }

    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    /// True when showing built-in rows instead of stored ones
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// 1-indexed position of `name`, if listed
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name).map(|i| i + 1)
    }
}
