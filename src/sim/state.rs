//! Session entities and their per-tick behavior

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, hand_anchor};
use super::input::Direction;
use crate::consts::*;
use crate::{ease_out_quad, progress};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Constructed, waiting for `start`
    NotStarted,
    /// Ticks advance the game
    Running,
    /// Lives ran out
    GameOver,
    /// Ended by an explicit stop
    Stopped,
}

/// Jellyfish kinds, named by display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Pink,
    Red,
    Blue,
    Black,
}

/// Per-kind constants, kept out of the entity itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    pub points: u32,
    /// sRGB display color
    pub color: [u8; 3],
}

static KIND_TABLE: [KindInfo; 4] = [
    KindInfo { points: 10, color: [255, 175, 175] },
    KindInfo { points: 20, color: [255, 0, 0] },
    KindInfo { points: 30, color: [0, 0, 255] },
    KindInfo { points: 100, color: [0, 0, 0] },
];

impl TargetKind {
    pub const ALL: [TargetKind; 4] = [
        TargetKind::Pink,
        TargetKind::Red,
        TargetKind::Blue,
        TargetKind::Black,
    ];

    pub fn info(self) -> &'static KindInfo {
        &KIND_TABLE[self as usize]
    }

    pub fn points(self) -> u32 {
        self.info().points
    }
}

/// The player character. Position is the top-left of its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
}

impl Default for Player {
    fn default() -> Self {
        Self { pos: PLAYER_ORIGIN }
    }
}

impl Player {
    /// Step once in `dir`, staying inside the arena
    pub fn step(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.pos.y = (self.pos.y - PLAYER_SPEED).max(0),
            Direction::Down => self.pos.y = (self.pos.y + PLAYER_SPEED).min(PLAYER_MAX_Y),
            Direction::Left => self.pos.x = (self.pos.x - PLAYER_SPEED).max(0),
            Direction::Right => self.pos.x = (self.pos.x + PLAYER_SPEED).min(PLAYER_MAX_X),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, PLAYER_SIZE)
    }

    pub fn hand(&self) -> IVec2 {
        hand_anchor(self.bounds())
    }
}

/// A jellyfish drifting across the arena. Position is the center of its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: IVec2,
    pub vel: IVec2,
    pub kind: TargetKind,
}

impl Target {
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, TARGET_SIZE)
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.x < TARGET_MIN_X || self.pos.x > TARGET_MAX_X
    }
}

/// A caught jellyfish flying into the basket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cutscene {
    pub kind: TargetKind,
    pub start: Vec2,
    pub basket: Vec2,
    /// Current eased position
    pub pos: Vec2,
    /// Raw (un-eased) completion in [0, 1]
    pub progress: f32,
    pub started_at: u64,
}

impl Cutscene {
    pub fn new(kind: TargetKind, start: IVec2, now: u64) -> Self {
        let start = start.as_vec2();
        Self {
            kind,
            start,
            basket: BASKET_ANCHOR.as_vec2(),
            pos: start,
            progress: 0.0,
            started_at: now,
        }
    }

    pub fn update(&mut self, now: u64) {
        self.progress = progress(now.saturating_sub(self.started_at), CUTSCENE_MS);
        self.pos = self.start.lerp(self.basket, ease_out_quad(self.progress));
    }

    pub fn is_finished(&self, now: u64) -> bool {
        now.saturating_sub(self.started_at) >= CUTSCENE_MS
    }
}

/// Shrinking, fading marker left where a jellyfish was caught
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaughtMarker {
    pub kind: TargetKind,
    pub pos: Vec2,
    pub scale: f32,
    pub alpha: f32,
    pub started_at: u64,
}

impl CaughtMarker {
    pub fn new(kind: TargetKind, pos: IVec2, now: u64) -> Self {
        Self {
            kind,
            pos: pos.as_vec2(),
            scale: 1.0,
            alpha: 1.0,
            started_at: now,
        }
    }

    pub fn update(&mut self, now: u64) {
        let t = progress(now.saturating_sub(self.started_at), CAUGHT_MARKER_MS);
        self.scale = 1.0 - t * 0.4;
        self.alpha = 1.0 - t;
    }

    pub fn is_finished(&self, now: u64) -> bool {
        now.saturating_sub(self.started_at) >= CAUGHT_MARKER_MS
    }
}

/// Notable things that happened during a command or tick, in order.
///
/// Drained by the driver for logging and UI cues; the session never reads
/// them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { name: String },
    Spawned { id: u32, kind: TargetKind },
    Thrown { target: IVec2, points: usize },
    Caught { id: u32, kind: TargetKind, points: u32 },
    Missed { lives: u8 },
    GameOver { score: u32, count: u32 },
    Stopped { score: u32, count: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_table() {
        let points: Vec<u32> = TargetKind::ALL.iter().map(|k| k.points()).collect();
        assert_eq!(points, vec![10, 20, 30, 100]);
        assert_eq!(TargetKind::Red.info().color, [255, 0, 0]);
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let mut player = Player { pos: IVec2::new(2, 518) };
        player.step(Direction::Left);
        assert_eq!(player.pos.x, 0);
        player.step(Direction::Down);
        assert_eq!(player.pos.y, PLAYER_MAX_Y);
        player.pos = IVec2::new(718, 3);
        player.step(Direction::Right);
        player.step(Direction::Up);
        assert_eq!(player.pos, IVec2::new(PLAYER_MAX_X, 0));
    }

    #[test]
    fn test_target_out_of_bounds() {
        let mut target = Target {
            id: 1,
            pos: IVec2::new(-49, 100),
            vel: IVec2::new(-2, 0),
            kind: TargetKind::Pink,
        };
        assert!(!target.is_out_of_bounds());
        target.advance();
        assert!(target.is_out_of_bounds());
    }

    #[test]
    fn test_cutscene_eases_into_basket() {
        let mut cutscene = Cutscene::new(TargetKind::Blue, IVec2::new(130, 260), 1000);
        cutscene.update(1500);
        // ease_out_quad(0.5) = 0.75
        let expected = Vec2::new(130.0, 260.0).lerp(BASKET_ANCHOR.as_vec2(), 0.75);
        assert!((cutscene.pos - expected).length() < 1e-3);
        assert!(!cutscene.is_finished(1999));
        assert!(cutscene.is_finished(2000));
        cutscene.update(2400);
        assert_eq!(cutscene.pos, BASKET_ANCHOR.as_vec2());
    }

    #[test]
    fn test_caught_marker_shrinks_and_fades() {
        let mut marker = CaughtMarker::new(TargetKind::Black, IVec2::new(10, 10), 0);
        marker.update(300);
        assert!((marker.scale - 0.8).abs() < 1e-6);
        assert!((marker.alpha - 0.5).abs() < 1e-6);
        assert!(marker.is_finished(600));
    }
}
