use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use super::{ScoreRecord, ScoreSink, ScoreStore};

/// Background writer for finished-session results.
///
/// `spawn` returns a cheap `FlushHandle` for sessions and the `FlushWorker`
/// that owns the thread. The worker exits once every handle is dropped and
/// the queue is drained.
pub struct ScoreFlusher;

impl ScoreFlusher {
    pub fn spawn(store: Arc<dyn ScoreStore>) -> (FlushHandle, FlushWorker) {
        let (tx, rx) = mpsc::channel::<ScoreRecord>();
        let handle = thread::Builder::new()
            .name("score-flush".to_string())
            .spawn(move || {
                for record in rx {
                    match store.upsert(&record.name, record.score, record.count) {
                        Ok(()) => log::info!(
                            "Saved {} pts / {} catches for {}",
                            record.score,
                            record.count,
                            record.name
                        ),
                        Err(err) => log::warn!("Failed to save score for {}: {}", record.name, err),
                    }
                }
                log::debug!("Score flush worker drained");
            });

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("Could not start score flush worker: {}", err);
                None
            }
        };
        (FlushHandle { tx }, FlushWorker { handle })
    }
}

/// Sending side; one per session
#[derive(Debug, Clone)]
pub struct FlushHandle {
    tx: Sender<ScoreRecord>,
}

impl ScoreSink for FlushHandle {
    fn submit(&self, record: ScoreRecord) {
        let name = record.name.clone();
        if self.tx.send(record).is_err() {
            log::warn!("Score flush worker is gone; dropping result for {}", name);
        }
    }
}

pub struct FlushWorker {
    handle: Option<JoinHandle<()>>,
}

impl FlushWorker {
    /// Wait for every queued record to be written.
    ///
    /// Blocks until all `FlushHandle`s are dropped.
    pub fn join(mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if handle.join().is_err() {
            log::error!("Score flush worker panicked");
        }
    }
}
