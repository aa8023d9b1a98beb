use std::fmt;

use reindeer_common::{Cell, Dir};

use crate::MazeError;

/// Rectangular wall grid.
///
/// Cells are stored row-major with `y = 0` as the southernmost row. Anything
/// outside `0..width` x `0..height` is treated as solid by [`Grid::is_open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    walls: Vec<bool>,
}

impl Grid {
    /// A grid where every cell is a wall.
    pub fn solid(width: u32, height: u32) -> Result<Self, MazeError> {
        Self::filled(width, height, true)
    }

    /// A grid with no walls at all.
    pub fn open(width: u32, height: u32) -> Result<Self, MazeError> {
        Self::filled(width, height, false)
    }

    /// An otherwise open grid with walls at the given cells.
    pub fn from_walls(
        width: u32,
        height: u32,
        walls: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, MazeError> {
        let mut grid = Self::open(width, height)?;
        for cell in walls {
            grid.check_in_bounds(cell)?;
            grid.set_wall(cell, true);
        }
        Ok(grid)
    }

    fn filled(width: u32, height: u32, wall: bool) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::EmptyDimensions { width, height });
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(MazeError::TooLarge { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(MazeError::TooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            walls: vec![wall; len],
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `cell` lies inside the grid.
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Returns an error naming the cell if it lies outside the grid.
    pub fn check_in_bounds(&self, cell: Cell) -> Result<(), MazeError> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// True for in-bounds wall cells. Out-of-bounds cells are not walls,
    /// they are simply not part of the grid.
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.walls[i])
    }

    /// True for in-bounds cells that can be stood on.
    pub fn is_open(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| !self.walls[i])
    }

    pub(crate) fn set_wall(&mut self, cell: Cell, wall: bool) {
        if let Some(i) = self.index(cell) {
            self.walls[i] = wall;
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// In-bounds neighbours of `cell`, tagged with the direction leading to them.
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = (Dir, Cell)> + '_ {
        Dir::ALL
            .into_iter()
            .map(move |d| (d, d.step(cell)))
            .filter(|(_, c)| self.in_bounds(*c))
    }

    /// Every wall cell, column by column (x outer, y inner).
    pub fn wall_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.width as i32)
            .flat_map(move |x| (0..self.height as i32).map(move |y| Cell::new(x, y)))
            .filter(|c| self.is_wall(*c))
    }

    /// Number of open cells.
    pub fn open_count(&self) -> usize {
        self.walls.iter().filter(|w| !**w).count()
    }
}

/// Two characters per cell, north at the top.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height as i32).rev() {
            for x in 0..self.width as i32 {
                let glyph = if self.is_wall(Cell::new(x, y)) {
                    "██"
                } else {
                    "  "
                };
                f.write_str(glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            Grid::open(0, 5),
            Err(MazeError::EmptyDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::solid(5, 0).is_err());
    }

    #[test]
    fn oversized_dimensions_rejected() {
        assert!(matches!(
            Grid::open(u32::MAX, 1),
            Err(MazeError::TooLarge { .. })
        ));
    }

    #[test]
    fn bounds_and_openness() {
        let grid = Grid::from_walls(3, 2, [Cell::new(1, 1)]).unwrap();
        assert!(grid.in_bounds(Cell::new(2, 1)));
        assert!(!grid.in_bounds(Cell::new(3, 0)));
        assert!(!grid.in_bounds(Cell::new(0, -1)));

        assert!(grid.is_wall(Cell::new(1, 1)));
        assert!(!grid.is_open(Cell::new(1, 1)));
        assert!(grid.is_open(Cell::new(0, 0)));

        // Outside the grid is neither wall nor open.
        assert!(!grid.is_wall(Cell::new(-1, 0)));
        assert!(!grid.is_open(Cell::new(-1, 0)));
    }

    #[test]
    fn from_walls_rejects_stray_cells() {
        let err = Grid::from_walls(2, 2, [Cell::new(2, 0)]).unwrap_err();
        assert!(matches!(err, MazeError::OutOfBounds { .. }));
    }

    #[test]
    fn neighbours_stay_in_bounds() {
        let grid = Grid::open(3, 3).unwrap();
        assert_eq!(grid.neighbours(Cell::new(1, 1)).count(), 4);

        let corner: Vec<_> = grid.neighbours(Cell::new(0, 0)).collect();
        assert_eq!(
            corner,
            vec![(Dir::N, Cell::new(0, 1)), (Dir::E, Cell::new(1, 0))]
        );
    }

    #[test]
    fn wall_cells_are_column_major() {
        let grid = Grid::from_walls(
            3,
            3,
            [Cell::new(2, 0), Cell::new(0, 2), Cell::new(0, 1)],
        )
        .unwrap();
        let walls: Vec<_> = grid.wall_cells().collect();
        assert_eq!(walls, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(2, 0)]);
        assert_eq!(grid.open_count(), 6);
    }

    #[test]
    fn display_draws_north_first() {
        let grid = Grid::from_walls(2, 2, [Cell::new(0, 1)]).unwrap();
        assert_eq!(grid.to_string(), "██  \n    \n");
    }
}
