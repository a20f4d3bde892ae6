//! Per-tick session update
//!
//! Priority each tick:
//! 1. A playing cutscene freezes everything else.
//! 2. A retracting lasso keeps retracting while the world keeps moving, but
//!    nothing can be caught.
//! 3. Otherwise the world moves and an active lasso is resolved.

use super::lasso::Lasso;
use super::session::Session;
use super::state::{CaughtMarker, Cutscene, GameEvent, SessionPhase};

impl Session {
    /// Advance one tick. No-op unless running.
    pub fn update(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        let now = self.now();

        if let Some(cutscene) = self.cutscene.as_mut() {
            cutscene.update(now);
            if cutscene.is_finished(now) {
                self.cutscene = None;
            }
            return;
        }

        if self.lasso.as_ref().is_some_and(Lasso::is_returning) {
            let retracted = self
                .lasso
                .as_mut()
                .is_some_and(|lasso| lasso.advance_bounce_back(now));
            if retracted {
                self.lasso = None;
            }
            self.advance_world(now);
            return;
        }

        self.advance_world(now);
        self.resolve_lasso(now);
    }

    /// Spawn, move and prune targets; age the catch markers
    fn advance_world(&mut self, now: u64) {
        if let Some(target) = self.spawner.maybe_spawn(now) {
            log::debug!("Spawned {:?} #{} at {}", target.kind, target.id, target.pos);
            self.events.push(GameEvent::Spawned {
                id: target.id,
                kind: target.kind,
            });
            self.targets.push(target);
        }

        self.targets.retain_mut(|target| {
            target.advance();
            !target.is_out_of_bounds()
        });

        self.markers.retain_mut(|marker| {
            marker.update(now);
            !marker.is_finished(now)
        });
    }

    fn resolve_lasso(&mut self, now: u64) {
        let Some(lasso) = self.lasso.as_ref() else {
            return;
        };

        if let Some(index) = lasso.first_hit(&self.targets) {
            self.catch(index, now);
        } else if lasso.has_reached_target() || lasso.timed_out(now) {
            self.begin_bounce_back(now);
        }
    }

    /// Score the target and start its cutscene, all within this tick
    fn catch(&mut self, index: usize, now: u64) {
        let target = self.targets.remove(index);
        let points = target.kind.points();
        self.score = self.score.saturating_add(points);
        self.count = self.count.saturating_add(1);
        self.cutscene = Some(Cutscene::new(target.kind, target.pos, now));
        self.markers.push(CaughtMarker::new(target.kind, target.pos, now));
        self.lasso = None;

        log::debug!(
            "Caught {:?} #{} for {} pts (score {}, count {})",
            target.kind,
            target.id,
            points,
            self.score,
            self.count
        );
        self.events.push(GameEvent::Caught {
            id: target.id,
            kind: target.kind,
            points,
        });
    }

    /// A miss: start retracting and take a life
    fn begin_bounce_back(&mut self, now: u64) {
        if let Some(lasso) = self.lasso.as_mut() {
            lasso.begin_bounce_back(now);
        }
        self.lives = self.lives.saturating_sub(1);
        log::debug!("Lasso missed, {} lives left", self.lives);
        self.events.push(GameEvent::Missed { lives: self.lives });

        if self.lives == 0 {
            self.phase = SessionPhase::GameOver;
            log::info!("Game over: {} pts, {} catches", self.score, self.count);
            self.flush_score();
            self.events.push(GameEvent::GameOver {
                score: self.score,
                count: self.count,
            });
        }
    }
}
