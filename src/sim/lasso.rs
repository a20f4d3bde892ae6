//! The lasso: a sampled straight throw that either connects or retracts

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::sample_segment;
use super::state::Target;
use crate::consts::{BOUNCE_BACK_MS, LASSO_REACH_TOLERANCE, LASSO_STEP, LASSO_TIMEOUT_MS};
use crate::progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct BounceBack {
    started_at: u64,
    /// Point count when retraction began
    original_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lasso {
    points: Vec<IVec2>,
    target: IVec2,
    thrown_at: u64,
    bounce: Option<BounceBack>,
}

impl Lasso {
    /// Lay out a fresh throw from the hand anchor to the clicked point
    pub fn throw(anchor: IVec2, target: IVec2, now: u64) -> Self {
        Self {
            points: sample_segment(anchor, target, LASSO_STEP),
            target,
            thrown_at: now,
            bounce: None,
        }
    }

    pub fn points(&self) -> &[IVec2] {
        &self.points
    }

    pub fn target(&self) -> IVec2 {
        self.target
    }

    pub fn is_returning(&self) -> bool {
        self.bounce.is_some()
    }

    /// Last point is within tolerance of the clicked point
    pub fn has_reached_target(&self) -> bool {
        self.points
            .last()
            .is_some_and(|p| (*p - self.target).as_vec2().length() < LASSO_REACH_TOLERANCE)
    }

    pub fn timed_out(&self, now: u64) -> bool {
        now.saturating_sub(self.thrown_at) > LASSO_TIMEOUT_MS
    }

    /// Index of the caught target, if any.
    ///
    /// Tie-break: lasso points are scanned from the hand outward, and for each
    /// point the targets are scanned newest first. The first box containing a
    /// point wins.
    pub fn first_hit(&self, targets: &[Target]) -> Option<usize> {
        self.points.iter().find_map(|&p| {
            targets
                .iter()
                .enumerate()
                .rev()
                .find(|(_, t)| t.bounds().contains(p))
                .map(|(i, _)| i)
        })
    }

    pub fn begin_bounce_back(&mut self, now: u64) {
        self.bounce = Some(BounceBack {
            started_at: now,
            original_len: self.points.len(),
        });
    }

    /// Retract from the far end. Returns true once fully retracted.
    pub fn advance_bounce_back(&mut self, now: u64) -> bool {
        let Some(bounce) = self.bounce else {
            return false;
        };

        let p = progress(now.saturating_sub(bounce.started_at), BOUNCE_BACK_MS);
        if p >= 1.0 {
            self.points.clear();
            self.bounce = None;
            return true;
        }

        let keep = (bounce.original_len as f32 * (1.0 - p)) as usize;
        self.points.truncate(keep);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::TargetKind;
    use proptest::prelude::*;

    fn target_at(id: u32, x: i32, y: i32) -> Target {
        Target {
            id,
            pos: IVec2::new(x, y),
            vel: IVec2::ZERO,
            kind: TargetKind::Pink,
        }
    }

    #[test]
    fn test_throw_reaches_target_immediately() {
        let lasso = Lasso::throw(IVec2::new(512, 340), IVec2::new(400, 100), 0);
        assert!(lasso.has_reached_target());
        assert!(!lasso.is_returning());
        assert_eq!(lasso.points()[0], IVec2::new(512, 340));
    }

    #[test]
    fn test_timeout_is_strict() {
        let lasso = Lasso::throw(IVec2::ZERO, IVec2::new(10, 0), 500);
        assert!(!lasso.timed_out(1500));
        assert!(lasso.timed_out(1501));
    }

    #[test]
    fn test_first_hit_prefers_newest_target_on_shared_point() {
        let lasso = Lasso::throw(IVec2::new(0, 100), IVec2::new(100, 100), 0);
        let targets = vec![target_at(1, 60, 100), target_at(2, 60, 110)];
        // Both boxes first contain the point (36, 100); the newer one wins
        assert_eq!(lasso.first_hit(&targets), Some(1));
    }

    #[test]
    fn test_first_hit_prefers_point_nearest_hand() {
        let lasso = Lasso::throw(IVec2::new(0, 100), IVec2::new(300, 100), 0);
        let targets = vec![target_at(1, 50, 100), target_at(2, 250, 100)];
        assert_eq!(lasso.first_hit(&targets), Some(0));
    }

    #[test]
    fn test_first_hit_misses() {
        let lasso = Lasso::throw(IVec2::new(0, 0), IVec2::new(100, 0), 0);
        let targets = vec![target_at(1, 50, 200)];
        assert_eq!(lasso.first_hit(&targets), None);
    }

    #[test]
    fn test_bounce_back_shrinks_linearly() {
        let mut lasso = Lasso::throw(IVec2::ZERO, IVec2::new(198, 0), 0);
        assert_eq!(lasso.points().len(), 100);
        lasso.begin_bounce_back(1000);
        assert!(!lasso.advance_bounce_back(1000));
        assert_eq!(lasso.points().len(), 100);
        assert!(!lasso.advance_bounce_back(1150));
        assert_eq!(lasso.points().len(), 50);
        assert!(!lasso.advance_bounce_back(1225));
        assert_eq!(lasso.points().len(), 25);
        assert!(lasso.advance_bounce_back(1300));
        assert!(lasso.points().is_empty());
        assert!(!lasso.is_returning());
    }

    proptest! {
        #[test]
        fn bounce_back_is_monotonic(
            len in 0i32..800,
            mut steps in proptest::collection::vec(0u64..400, 1..40),
        ) {
            steps.sort_unstable();
            let mut lasso = Lasso::throw(IVec2::ZERO, IVec2::new(len, 0), 0);
            lasso.begin_bounce_back(0);
            let mut prev = lasso.points().len();
            for t in steps {
                let done = lasso.advance_bounce_back(t);
                let len = lasso.points().len();
                prop_assert!(len <= prev);
                prop_assert_eq!(done, t >= BOUNCE_BACK_MS);
                prop_assert_eq!(len == 0 && !lasso.is_returning(), t >= BOUNCE_BACK_MS);
                prev = len;
                if done {
                    break;
                }
            }
        }
    }
}
