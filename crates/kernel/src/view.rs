use std::sync::Arc;

use reindeer_common::Cell;
use reindeer_maze::Grid;

use crate::export::MazeExport;
use crate::sensor::Compass;
use crate::WorldError;

/// Read-only view of the immutable parts of the world: the grid and the
/// present. Cheap to clone and safe to read from any number of tasks.
#[derive(Debug, Clone)]
pub struct MazeView {
    grid: Arc<Grid>,
    goal: Cell,
}

impl MazeView {
    /// Pair a grid with its present. The present must be an open cell.
    pub fn new(grid: Grid, goal: Cell) -> Result<Self, WorldError> {
        grid.check_in_bounds(goal)?;
        if !grid.is_open(goal) {
            return Err(WorldError::GoalBlocked(goal));
        }
        Ok(Self {
            grid: Arc::new(grid),
            goal,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Sensor reading for a player standing at `position`.
    pub fn compass(&self, position: Cell) -> Compass {
        Compass::read(&self.grid, self.goal, position)
    }

    pub fn export(&self) -> MazeExport {
        MazeExport::from_view(self)
    }
}
