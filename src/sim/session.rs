//! Game session controller
//!
//! Owns all mutable game state. Commands and ticks are applied one at a time
//! by a single owner; collaborators only see `Snapshot`s.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::geometry::Rect;
use super::input::{Command, Direction};
use super::lasso::Lasso;
use super::spawn::Spawner;
use super::state::{CaughtMarker, Cutscene, GameEvent, Player, SessionPhase, Target};
use crate::audio::{AudioManager, AudioService, SoundEffect};
use crate::consts::{MAX_LIVES, THROW_MAX, THROW_MIN};
use crate::persistence::{DiscardSink, ScoreRecord, ScoreSink};

/// Read-only view of a session for the render surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub player: Rect,
    /// Where lasso lines start
    pub hand: IVec2,
    pub targets: Vec<Target>,
    pub lasso: Vec<IVec2>,
    pub lasso_returning: bool,
    pub lasso_target: Option<IVec2>,
    pub cutscene: Option<Cutscene>,
    pub markers: Vec<CaughtMarker>,
    pub score: u32,
    pub count: u32,
    pub lives: u8,
    pub max_lives: u8,
    pub running: bool,
    pub game_over: bool,
}

pub struct Session {
    pub(super) name: String,
    pub(super) phase: SessionPhase,
    pub(super) player: Player,
    /// Live targets in spawn order
    pub(super) targets: Vec<Target>,
    pub(super) lasso: Option<Lasso>,
    pub(super) cutscene: Option<Cutscene>,
    pub(super) markers: Vec<CaughtMarker>,
    pub(super) score: u32,
    pub(super) count: u32,
    pub(super) lives: u8,
    pub(super) spawner: Spawner,
    pub(super) events: Vec<GameEvent>,
    clock: Box<dyn Clock>,
    audio: Box<dyn AudioService>,
    scores: Box<dyn ScoreSink>,
}

impl Session {
    /// A session with a real clock, default audio and no score saving
    pub fn new(seed: u64) -> Self {
        Self {
            name: String::new(),
            phase: SessionPhase::NotStarted,
            player: Player::default(),
            targets: Vec::new(),
            lasso: None,
            cutscene: None,
            markers: Vec::new(),
            score: 0,
            count: 0,
            lives: MAX_LIVES,
            spawner: Spawner::new(seed),
            events: Vec::new(),
            clock: Box::new(SystemClock::new()),
            audio: Box::new(AudioManager::new()),
            scores: Box::new(DiscardSink),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioService + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_score_sink(mut self, sink: impl ScoreSink + 'static) -> Self {
        self.scores = Box::new(sink);
        self
    }

    pub(super) fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Begin a fresh run under `name`, discarding any previous state
    pub fn start(&mut self, name: &str) {
        let now = self.now();
        self.name = name.to_string();
        self.phase = SessionPhase::Running;
        self.player = Player::default();
        self.targets.clear();
        self.lasso = None;
        self.cutscene = None;
        self.markers.clear();
        self.score = 0;
        self.count = 0;
        self.lives = MAX_LIVES;
        self.spawner.reset(now);

        log::info!("Session started for {:?}", self.name);
        self.events.push(GameEvent::Started {
            name: self.name.clone(),
        });
    }

    /// End a running session early and save its result
    pub fn stop(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.phase = SessionPhase::Stopped;
        log::info!(
            "Session stopped: {} pts, {} catches, {} lives left",
            self.score,
            self.count,
            self.lives
        );
        self.flush_score();
        self.events.push(GameEvent::Stopped {
            score: self.score,
            count: self.count,
        });
    }

    pub fn move_player(&mut self, dir: Direction) {
        if self.phase == SessionPhase::Running {
            self.player.step(dir);
        }
    }

    /// Throw toward an arena point. Ignored unless running with no cutscene
    /// playing and no lasso retracting.
    ///
    /// Clicks outside `THROW_MIN..=THROW_MAX` are clamped onto that box.
    pub fn throw_lasso(&mut self, x: i32, y: i32) {
        if self.phase != SessionPhase::Running
            || self.cutscene.is_some()
            || self.lasso.as_ref().is_some_and(Lasso::is_returning)
        {
            return;
        }

        self.audio.play(SoundEffect::WebShoot);

        let target = IVec2::new(x, y).clamp(THROW_MIN, THROW_MAX);
        let lasso = Lasso::throw(self.player.hand(), target, self.now());
        log::debug!(
            "Lasso thrown from {} to {} ({} points)",
            self.player.hand(),
            target,
            lasso.points().len()
        );
        self.events.push(GameEvent::Thrown {
            target,
            points: lasso.points().len(),
        });
        self.lasso = Some(lasso);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Move(dir) => self.move_player(dir),
            Command::Throw { x, y } => self.throw_lasso(x, y),
            Command::Start { name } => self.start(&name),
            Command::Stop => self.stop(),
        }
    }

    /// Hand the result to the score sink, once per finished run
    pub(super) fn flush_score(&self) {
        let name = self.name.trim();
        if name.is_empty() {
            log::warn!("No player name; result of {} pts not saved", self.score);
            return;
        }
        self.scores
            .submit(ScoreRecord::new(name, self.score, self.count));
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player: self.player.bounds(),
            hand: self.player.hand(),
            targets: self.targets.clone(),
            lasso: self
                .lasso
                .as_ref()
                .map(|l| l.points().to_vec())
                .unwrap_or_default(),
            lasso_returning: self.lasso.as_ref().is_some_and(Lasso::is_returning),
            lasso_target: self.lasso.as_ref().map(Lasso::target),
            cutscene: self.cutscene,
            markers: self.markers.clone(),
            score: self.score,
            count: self.count,
            lives: self.lives,
            max_lives: MAX_LIVES,
            running: self.is_running(),
            game_over: self.is_game_over(),
        }
    }

    /// Take every event recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn lasso(&self) -> Option<&Lasso> {
        self.lasso.as_ref()
    }

    pub fn cutscene(&self) -> Option<&Cutscene> {
        self.cutscene.as_ref()
    }

    pub fn markers(&self) -> &[CaughtMarker] {
        &self.markers
    }
}
