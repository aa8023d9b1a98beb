//! Shared types for the reindeer maze.

pub mod types;

pub use types::{Cell, Dir, ParseDirError, PlayerId};
