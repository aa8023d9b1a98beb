//! Player sensing: free distances in the four directions plus a hint toward
//! the present.
//!
//! Everything here reads only the grid and the present, both of which are
//! immutable, so no synchronization is needed.

use std::fmt;

use reindeer_common::{Cell, Dir};
use reindeer_maze::Grid;
use serde::{Deserialize, Serialize};

/// What a player knows about where the present is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalHint {
    /// Not aligned with the present, or the straight path to it is blocked.
    Unknown,
    /// The present lies in this direction along a clear row or column.
    Toward(Dir),
    /// The player is standing on the present.
    OnGoal,
}

impl GoalHint {
    pub fn as_char(self) -> char {
        match self {
            GoalHint::Unknown => '?',
            GoalHint::Toward(d) => d.as_char(),
            GoalHint::OnGoal => 'X',
        }
    }
}

/// One sensor reading for a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compass {
    pub north: u32,
    pub east: u32,
    pub south: u32,
    pub west: u32,
    pub hint: GoalHint,
}

impl Compass {
    /// Take a reading at `position` against `grid` with the present at `goal`.
    pub fn read(grid: &Grid, goal: Cell, position: Cell) -> Self {
        Self {
            north: measure_free(grid, position, Dir::N),
            east: measure_free(grid, position, Dir::E),
            south: measure_free(grid, position, Dir::S),
            west: measure_free(grid, position, Dir::W),
            hint: goal_hint(grid, goal, position),
        }
    }

    pub fn distance(&self, dir: Dir) -> u32 {
        match dir {
            Dir::N => self.north,
            Dir::E => self.east,
            Dir::S => self.south,
            Dir::W => self.west,
        }
    }

    pub fn on_goal(&self) -> bool {
        self.hint == GoalHint::OnGoal
    }
}

/// Wire format: `N<d> E<d> S<d> W<d> P<c>`.
impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N{} E{} S{} W{} P{}",
            self.north,
            self.east,
            self.south,
            self.west,
            self.hint.as_char()
        )
    }
}

/// Count the open cells stepped over from `from` in `dir` before hitting a
/// wall or the edge of the grid. The starting cell itself is not counted.
pub fn measure_free(grid: &Grid, from: Cell, dir: Dir) -> u32 {
    let mut count = 0;
    let mut cell = dir.step(from);
    while grid.is_open(cell) {
        count += 1;
        cell = dir.step(cell);
    }
    count
}

fn goal_hint(grid: &Grid, goal: Cell, position: Cell) -> GoalHint {
    if position == goal {
        return GoalHint::OnGoal;
    }

    let (candidate, distance) = if position.x == goal.x {
        let dir = if goal.y > position.y { Dir::N } else { Dir::S };
        (dir, goal.y.abs_diff(position.y))
    } else if position.y == goal.y {
        let dir = if goal.x > position.x { Dir::E } else { Dir::W };
        (dir, goal.x.abs_diff(position.x))
    } else {
        // Only straight lines are checked; no L-shaped search.
        return GoalHint::Unknown;
    };

    if measure_free(grid, position, candidate) >= distance {
        GoalHint::Toward(candidate)
    } else {
        GoalHint::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOAL: Cell = Cell::new(2, 2);

    fn open5() -> Grid {
        Grid::open(5, 5).unwrap()
    }

    #[test]
    fn measure_free_on_open_grid() {
        let grid = open5();
        let p = Cell::new(2, 0);
        assert_eq!(measure_free(&grid, p, Dir::S), 0);
        assert_eq!(measure_free(&grid, p, Dir::N), 4);
        assert_eq!(measure_free(&grid, p, Dir::E), 2);
        assert_eq!(measure_free(&grid, p, Dir::W), 2);
    }

    #[test]
    fn measure_free_stops_at_walls() {
        let grid = Grid::from_walls(5, 5, [Cell::new(2, 3), Cell::new(0, 0)]).unwrap();
        assert_eq!(measure_free(&grid, Cell::new(2, 0), Dir::N), 2);
        assert_eq!(measure_free(&grid, Cell::new(2, 2), Dir::N), 0);
        assert_eq!(measure_free(&grid, Cell::new(3, 0), Dir::W), 1);
    }

    #[test]
    fn compass_below_goal_points_north() {
        let compass = Compass::read(&open5(), GOAL, Cell::new(2, 0));
        assert_eq!(compass.to_string(), "N4 E2 S0 W2 PN");
        assert_eq!(compass.hint, GoalHint::Toward(Dir::N));
    }

    #[test]
    fn compass_points_along_rows_and_columns() {
        let grid = open5();
        assert_eq!(
            Compass::read(&grid, GOAL, Cell::new(2, 4)).hint,
            GoalHint::Toward(Dir::S)
        );
        assert_eq!(
            Compass::read(&grid, GOAL, Cell::new(0, 2)).hint,
            GoalHint::Toward(Dir::E)
        );
        assert_eq!(
            Compass::read(&grid, GOAL, Cell::new(4, 2)).hint,
            GoalHint::Toward(Dir::W)
        );
    }

    #[test]
    fn compass_unknown_when_not_aligned() {
        let compass = Compass::read(&open5(), GOAL, Cell::new(0, 0));
        assert_eq!(compass.hint, GoalHint::Unknown);
        assert_eq!(compass.to_string(), "N4 E4 S0 W0 P?");
    }

    #[test]
    fn compass_unknown_when_path_blocked() {
        let grid = Grid::from_walls(5, 5, [Cell::new(2, 1)]).unwrap();
        let compass = Compass::read(&grid, GOAL, Cell::new(2, 0));
        assert_eq!(compass.hint, GoalHint::Unknown);
        assert_eq!(compass.north, 0);
    }

    #[test]
    fn compass_on_goal() {
        let compass = Compass::read(&open5(), GOAL, GOAL);
        assert!(compass.on_goal());
        assert_eq!(compass.to_string(), "N2 E2 S2 W2 PX");
    }

    #[test]
    fn distance_matches_fields() {
        let compass = Compass::read(&open5(), GOAL, Cell::new(1, 3));
        for d in Dir::ALL {
            assert_eq!(compass.distance(d), measure_free(&open5(), Cell::new(1, 3), d));
        }
    }
}
