use std::fmt;
use std::str::FromStr;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A grid cell coordinate. `x` grows eastward, `y` grows northward.
pub type Cell = IVec2;

/// Opaque handle for a player. Handles are issued monotonically and never
/// reused for another player within the lifetime of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dir {
    N,
    E,
    S,
    W,
}

impl Dir {
    /// All directions in compass order.
    pub const ALL: [Dir; 4] = [Dir::N, Dir::E, Dir::S, Dir::W];

    /// Unit offset for one step in this direction.
    pub fn offset(self) -> IVec2 {
        match self {
            Dir::N => IVec2::Y,
            Dir::E => IVec2::X,
            Dir::S => IVec2::NEG_Y,
            Dir::W => IVec2::NEG_X,
        }
    }

    /// The cell one step from `cell` in this direction. May be out of bounds.
    pub fn step(self, cell: Cell) -> Cell {
        cell + self.offset()
    }

    /// Wire letter for this direction.
    pub fn as_char(self) -> char {
        match self {
            Dir::N => 'N',
            Dir::E => 'E',
            Dir::S => 'S',
            Dir::W => 'W',
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Input text that does not name one of the four directions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {0:?}")]
pub struct ParseDirError(pub String);

impl FromStr for Dir {
    type Err = ParseDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" | "n" => Ok(Dir::N),
            "E" | "e" => Ok(Dir::E),
            "S" | "s" => Ok(Dir::S),
            "W" | "w" => Ok(Dir::W),
            other => Err(ParseDirError(other.to_string())),
        }
    }
}
