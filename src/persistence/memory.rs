use std::collections::HashMap;
use std::sync::Mutex;

use super::{ScoreRecord, ScoreStore, sort_records};
use crate::error::StoreError;

/// Process-local store, used when the database cannot be opened
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    rows: Mutex<HashMap<String, (u32, u32)>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn upsert(&self, name: &str, score_delta: u32, count_delta: u32) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        let row = rows.entry(name.to_string()).or_default();
        row.0 = row.0.saturating_add(score_delta);
        row.1 = row.1.saturating_add(count_delta);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let rows = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        let mut records: Vec<ScoreRecord> = rows
            .iter()
            .map(|(name, &(score, count))| ScoreRecord::new(name.clone(), score, count))
            .collect();
        sort_records(&mut records);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_and_sorts() {
        let store = MemoryScoreStore::new();
        store.upsert("b", 50, 2).unwrap();
        store.upsert("a", 50, 1).unwrap();
        store.upsert("c", 10, 1).unwrap();
        store.upsert("c", 60, 1).unwrap();

        let rows = store.list_all().unwrap();
        assert_eq!(
            rows,
            vec![
                ScoreRecord::new("c", 70, 2),
                ScoreRecord::new("a", 50, 1),
                ScoreRecord::new("b", 50, 2),
            ]
        );
    }
}
