//! Normalized remote control input.

use geom::Direction;
use serde::Deserialize;

/// Physical key code decoding.
pub mod key;

/// A logical remote control action. Physical keys are decoded into these by
/// a [`key::KeyMap`] before they reach the engine.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemoteAction {
    /// Directional pad up.
    MoveUp,
    /// Directional pad down.
    MoveDown,
    /// Directional pad left.
    MoveLeft,
    /// Directional pad right.
    MoveRight,
    /// OK / enter.
    Activate,
    /// Back / return.
    Cancel,
}

impl RemoteAction {
    /// The focus direction of a move action.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::MoveUp => Some(Direction::Up),
            Self::MoveDown => Some(Direction::Down),
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveRight => Some(Direction::Right),
            Self::Activate | Self::Cancel => None,
        }
    }
}

impl From<Direction> for RemoteAction {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => Self::MoveUp,
            Direction::Down => Self::MoveDown,
            Direction::Left => Self::MoveLeft,
            Direction::Right => Self::MoveRight,
        }
    }
}
