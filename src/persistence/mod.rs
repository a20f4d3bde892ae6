//! Cumulative score persistence
//!
//! - `ScoreStore`: keyed by player name, each upsert adds to the stored totals
//! - `SqliteScoreStore` / `MemoryScoreStore`: the two backends
//! - `ScoreFlusher`: background worker so the tick loop never waits on I/O

mod flush;
mod memory;
mod sqlite;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use flush::{FlushHandle, FlushWorker, ScoreFlusher};
pub use memory::MemoryScoreStore;
pub use sqlite::SqliteScoreStore;

/// One leaderboard row, or one session's result on its way to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
    pub count: u32,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, score: u32, count: u32) -> Self {
        Self {
            name: name.into(),
            score,
            count,
        }
    }
}

pub trait ScoreStore: Send + Sync {
    /// Add `score_delta` and `count_delta` to `name`'s totals, creating the
    /// row if absent
    fn upsert(&self, name: &str, score_delta: u32, count_delta: u32) -> Result<(), StoreError>;

    /// Every row, highest score first (ties by name)
    fn list_all(&self) -> Result<Vec<ScoreRecord>, StoreError>;
}

/// Where a finished session hands its result.
///
/// Must return promptly; failures are the sink's problem, never the caller's.
pub trait ScoreSink {
    fn submit(&self, record: ScoreRecord);
}

/// Sink for sessions that have nowhere to save
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl ScoreSink for DiscardSink {
    fn submit(&self, record: ScoreRecord) {
        log::debug!("Discarding result for {}: {} pts", record.name, record.score);
    }
}

/// Rows shown when the store cannot be read
pub fn fallback_records() -> Vec<ScoreRecord> {
    vec![
        ScoreRecord::new("Manusia", 1000, 100),
        ScoreRecord::new("BukanManusia", 800, 80),
        ScoreRecord::new("Barbie", 700, 40),
    ]
}

fn sort_records(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
}
