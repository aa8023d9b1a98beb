//! Maze: an immutable wall grid and the generator that carves it.
//!
//! # Invariants
//! - A generated grid's open cells form exactly one 4-connected component.
//! - The start cell handed to the generator is always open.
//! - A grid never changes after construction.

pub mod generate;
pub mod grid;

pub use generate::generate;
pub use grid::Grid;

use reindeer_common::Cell;

/// Errors raised while building a grid. All of them are configuration
/// mistakes and are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("maze dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("maze dimensions {width}x{height} exceed the addressable range")]
    TooLarge { width: u32, height: u32 },
    #[error("cell {cell} lies outside the {width}x{height} grid")]
    OutOfBounds { cell: Cell, width: u32, height: u32 },
}
