//! Jelly Lasso entry point
//!
//! Runs a headless session with an autopilot standing in for the player, then
//! prints the leaderboard. Frontends embed `jelly_lasso::sim::Session` instead.

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use jelly_lasso::persistence::{MemoryScoreStore, ScoreFlusher, ScoreStore, SqliteScoreStore};
use jelly_lasso::sim::{Command, Direction, Session, Snapshot};
use jelly_lasso::{AudioManager, AudioService, Leaderboard, Settings};

const SETTINGS_PATH: &str = "jelly_lasso.json";

/// Demo-mode player: lines up with the nearest jellyfish and throws, with
/// enough aim wobble to miss now and then
struct Autopilot {
    rng: Pcg32,
    /// Max aim error in arena units
    wobble: i32,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            wobble: 45,
        }
    }

    fn decide(&mut self, snap: &Snapshot) -> Option<Command> {
        if snap.cutscene.is_some() || !snap.lasso.is_empty() {
            return None;
        }

        let target = snap.targets.iter().min_by_key(|t| {
            let d = t.pos - snap.hand;
            d.x.abs() + d.y.abs()
        })?;

        // Aim where the target will be after the next move
        let aim = target.pos + target.vel;
        let dy = aim.y - snap.hand.y;
        if dy.abs() > 60 {
            let dir = if dy < 0 { Direction::Up } else { Direction::Down };
            return Some(Command::Move(dir));
        }
        if (aim.x - snap.hand.x).abs() > 320 {
            return None;
        }

        let error = IVec2::new(
            self.rng.random_range(-self.wobble..=self.wobble),
            self.rng.random_range(-self.wobble..=self.wobble),
        );
        let click = aim + error;
        Some(Command::Throw {
            x: click.x,
            y: click.y,
        })
    }
}

fn open_store(settings: &Settings) -> Arc<dyn ScoreStore> {
    match SqliteScoreStore::open(&settings.database_path) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            log::error!("{}; scores will only be kept in memory", err);
            Arc::new(MemoryScoreStore::new())
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Jelly Lasso (headless) starting...");

    let settings = Settings::load(Path::new(SETTINGS_PATH));
    let store = open_store(&settings);
    let (sink, worker) = ScoreFlusher::spawn(Arc::clone(&store));

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    log::info!("Spawner seed: {}", seed);

    let mut audio = AudioManager::from_settings(&settings);
    audio.play_music();

    let mut session = Session::new(seed)
        .with_audio(audio)
        .with_score_sink(sink);
    let mut autopilot = Autopilot::new(seed);
    let period = settings.tick_period();

    session.start(&settings.player_name);
    let mut ticks = 0u64;
    while session.is_running() && ticks < settings.max_ticks {
        let frame_start = Instant::now();

        if let Some(command) = autopilot.decide(&session.snapshot()) {
            session.apply(command);
        }
        session.update();
        for event in session.drain_events() {
            log::debug!("{:?}", event);
        }

        ticks += 1;
        if let Some(rest) = period.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    session.stop();
    println!(
        "{}: {} pts, {} jellyfish, {} lives left after {} ticks",
        session.name(),
        session.score(),
        session.count(),
        session.lives(),
        ticks
    );

    // Dropping the session releases the last flush handle
    drop(session);
    worker.join();

    let board = Leaderboard::load(store.as_ref());
    if board.is_fallback() {
        println!("(leaderboard unavailable, showing defaults)");
    }
    println!("{:<4} {:<20} {:>8} {:>6}", "#", "Name", "Score", "Count");
    for (rank, entry) in board.entries().iter().enumerate() {
        println!(
            "{:<4} {:<20} {:>8} {:>6}",
            rank + 1,
            entry.name,
            entry.score,
            entry.count
        );
    }
}
