//! World Kernel: authoritative maze state, player sensing and the task that
//! serializes every access to the player set.
//!
//! # Invariants
//! - The grid and the present never change after construction.
//! - Every player stands on an open, in-bounds cell at every observable instant.
//! - All player mutations and reads flow through one ordering point
//!   ([`WorldHandle`]); callers only ever see copies.

pub mod export;
pub mod handle;
pub mod sensor;
pub mod view;
pub mod world;

pub use export::{MazeExport, PlayerExport};
pub use handle::WorldHandle;
pub use sensor::{Compass, GoalHint, measure_free};
pub use view::MazeView;
pub use world::{Player, World};

use reindeer_common::Cell;
use reindeer_maze::MazeError;

/// Errors from building or talking to the world.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("present at {0} is not an open cell")]
    GoalBlocked(Cell),
    #[error("world task has shut down")]
    Closed,
}
