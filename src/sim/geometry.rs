//! Integer arena geometry: boxes, the hand anchor and lasso sampling

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{HAND_FRACTION_X, HAND_FRACTION_Y};

/// Axis-aligned box, half-open on the far edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(min: IVec2, size: IVec2) -> Self {
        Self { min, size }
    }

    /// Box of `size` whose center is `center`
    pub fn centered(center: IVec2, size: IVec2) -> Self {
        Self {
            min: center - size / 2,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        self.min + self.size / 2
    }

    /// `min <= p < min + size` on both axes
    #[inline]
    pub fn contains(&self, p: IVec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x < max.x && p.y >= self.min.y && p.y < max.y
    }
}

/// Where the lasso leaves the player: 75% across, 60% down the player box.
///
/// This is the one anchor used for throwing and for anything that draws a
/// line from the player's hand.
pub fn hand_anchor(player: Rect) -> IVec2 {
    let offset = IVec2::new(
        (player.size.x as f32 * HAND_FRACTION_X) as i32,
        (player.size.y as f32 * HAND_FRACTION_Y) as i32,
    );
    player.min + offset
}

/// Points along `from -> to`, one every `step` units of straight-line distance.
///
/// Yields `floor(distance / step) + 1` points starting at `from`. Coordinates
/// are truncated toward zero. A zero-length segment yields just `from`.
pub fn sample_segment(from: IVec2, to: IVec2, step: i32) -> Vec<IVec2> {
    let step = step.max(1);
    let delta = to.as_dvec2() - from.as_dvec2();
    let distance = delta.length();
    if distance == 0.0 {
        return vec![from];
    }

    let mut points = Vec::with_capacity((distance / step as f64) as usize + 1);
    let mut i = 0;
    while (i as f64) <= distance {
        let ratio = i as f64 / distance;
        points.push(IVec2::new(
            (from.x as f64 + delta.x * ratio) as i32,
            (from.y as f64 + delta.y * ratio) as i32,
        ));
        i += step;
    }
    points
}
