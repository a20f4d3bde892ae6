//! Game session simulation
//!
//! All gameplay logic lives here. Rules for this module:
//! - Time comes only from the injected `Clock`
//! - Randomness comes only from the seeded spawner RNG
//! - No rendering, audio device or database access (collaborators are traits)

pub mod clock;
pub mod geometry;
pub mod input;
pub mod lasso;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{Clock, ManualClock, SystemClock};
pub use geometry::{Rect, hand_anchor, sample_segment};
pub use input::{Command, Direction};
pub use lasso::Lasso;
pub use session::{Session, Snapshot};
pub use spawn::{Lane, Spawner, kind_for_roll};
pub use state::{CaughtMarker, Cutscene, GameEvent, KindInfo, Player, SessionPhase, Target, TargetKind};
