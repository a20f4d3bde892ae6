//! Target spawner: fixed cadence, fixed kind table, two lanes

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Target, TargetKind};
use crate::consts::{SPAWN_INTERVAL_MS, TARGET_SPEED};

/// Map a uniform roll in [0, 1) to a kind.
///
/// r < 0.05 → Black, r < 0.30 → Pink, r < 0.55 → Red, otherwise Blue.
pub fn kind_for_roll(r: f32) -> TargetKind {
    if r < 0.05 {
        TargetKind::Black
    } else if r < 0.30 {
        TargetKind::Pink
    } else if r < 0.55 {
        TargetKind::Red
    } else {
        TargetKind::Blue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    /// Enters on the right, drifts left through y in [50, 200)
    Top,
    /// Enters on the left, drifts right through y in [350, 500)
    Bottom,
}

impl Lane {
    fn entry_x(self) -> i32 {
        match self {
            Lane::Top => 800,
            Lane::Bottom => -50,
        }
    }

    fn min_y(self) -> i32 {
        match self {
            Lane::Top => 50,
            Lane::Bottom => 350,
        }
    }

    fn dx(self) -> i32 {
        match self {
            Lane::Top => -TARGET_SPEED,
            Lane::Bottom => TARGET_SPEED,
        }
    }
}

/// Width of each lane's y band
const LANE_SPREAD: i32 = 150;

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    last_spawn_ms: u64,
    next_id: u32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_spawn_ms: 0,
            next_id: 1,
        }
    }

    /// Restart the cooldown from `now` (new session)
    pub fn reset(&mut self, now: u64) {
        self.last_spawn_ms = now;
    }

    /// Spawn one target if the cooldown since the last spawn has elapsed
    pub fn maybe_spawn(&mut self, now: u64) -> Option<Target> {
        if now.saturating_sub(self.last_spawn_ms) < SPAWN_INTERVAL_MS {
            return None;
        }
        self.last_spawn_ms = now;
        Some(self.spawn())
    }

    fn spawn(&mut self) -> Target {
        let kind = kind_for_roll(self.rng.random::<f32>());
        let lane = if self.rng.random_bool(0.5) {
            Lane::Top
        } else {
            Lane::Bottom
        };
        let y = lane.min_y() + self.rng.random_range(0..LANE_SPREAD);

        let id = self.next_id;
        self.next_id += 1;
        Target {
            id,
            pos: IVec2::new(lane.entry_x(), y),
            vel: IVec2::new(lane.dx(), 0),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_kind_thresholds() {
        assert_eq!(kind_for_roll(0.0), TargetKind::Black);
        assert_eq!(kind_for_roll(0.049), TargetKind::Black);
        assert_eq!(kind_for_roll(0.05), TargetKind::Pink);
        assert_eq!(kind_for_roll(0.2999), TargetKind::Pink);
        assert_eq!(kind_for_roll(0.30), TargetKind::Red);
        assert_eq!(kind_for_roll(0.55), TargetKind::Blue);
        assert_eq!(kind_for_roll(0.9999), TargetKind::Blue);
    }

    #[test]
    fn test_cooldown_measured_from_previous_spawn() {
        let mut spawner = Spawner::new(7);
        spawner.reset(1000);
        assert!(spawner.maybe_spawn(2199).is_none());
        assert!(spawner.maybe_spawn(2200).is_some());
        assert!(spawner.maybe_spawn(2300).is_none());
        assert!(spawner.maybe_spawn(3399).is_none());
        assert!(spawner.maybe_spawn(3400).is_some());
    }

    #[test]
    fn test_spawned_targets_use_lanes() {
        let mut spawner = Spawner::new(42);
        let mut ids = Vec::new();
        for i in 1..=500u64 {
            let target = spawner.maybe_spawn(i * SPAWN_INTERVAL_MS).unwrap();
            ids.push(target.id);
            match target.vel.x {
                -2 => {
                    assert_eq!(target.pos.x, 800);
                    assert!((50..200).contains(&target.pos.y));
                }
                2 => {
                    assert_eq!(target.pos.x, -50);
                    assert!((350..500).contains(&target.pos.y));
                }
                other => panic!("unexpected dx {other}"),
            }
            assert_eq!(target.vel.y, 0);
        }
        ids.dedup();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_spawn_distribution() {
        let mut spawner = Spawner::new(12345);
        let n = 20_000u64;
        let mut counts: HashMap<TargetKind, u32> = HashMap::new();
        let mut top = 0u32;
        for i in 1..=n {
            let target = spawner.maybe_spawn(i * SPAWN_INTERVAL_MS).unwrap();
            *counts.entry(target.kind).or_default() += 1;
            if target.vel.x < 0 {
                top += 1;
            }
        }
        let share = |kind| counts.get(&kind).copied().unwrap_or(0) as f64 / n as f64;
        assert!((share(TargetKind::Black) - 0.05).abs() < 0.01);
        assert!((share(TargetKind::Pink) - 0.25).abs() < 0.015);
        assert!((share(TargetKind::Red) - 0.25).abs() < 0.015);
        assert!((share(TargetKind::Blue) - 0.45).abs() < 0.015);
        assert!((top as f64 / n as f64 - 0.5).abs() < 0.015);
    }
}
