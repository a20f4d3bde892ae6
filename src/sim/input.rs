//! Discrete commands posted by the input source

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Everything the outside world may ask of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    /// Throw the lasso toward a clicked arena point
    Throw { x: i32, y: i32 },
    Start { name: String },
    Stop,
}
