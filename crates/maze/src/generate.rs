//! Randomized frontier expansion over the wall grid.
//!
//! Starting from a single open cell, the generator keeps a frontier of wall
//! candidates next to already opened cells. Each round draws one candidate
//! uniformly at random and tries to tunnel through it to the cell beyond.
//! Opened cells are never closed again, so every open cell stays reachable
//! from the start.

use rand::Rng;
use reindeer_common::{Cell, Dir};

use crate::{Grid, MazeError};

/// Carve a `width` x `height` maze outward from `start`.
///
/// The random source is injected so callers can seed it for reproducible
/// layouts. Out-of-range dimensions or an out-of-bounds start are rejected.
pub fn generate<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    start: Cell,
    rng: &mut R,
) -> Result<Grid, MazeError> {
    let mut grid = Grid::solid(width, height)?;
    grid.check_in_bounds(start)?;
    grid.set_wall(start, false);

    let mut frontier: Vec<(Cell, Dir)> = grid.neighbours(start).map(|(d, c)| (c, d)).collect();
    let mut opened = 1usize;

    while !frontier.is_empty() {
        let (candidate, dir) = frontier.swap_remove(rng.gen_range(0..frontier.len()));
        let far = dir.step(candidate);

        if !grid.in_bounds(far) {
            // A candidate on the edge has nothing to tunnel into; it is
            // absorbed into the maze regardless of its neighbours.
            if grid.is_wall(candidate) {
                opened += 1;
            }
            grid.set_wall(candidate, false);
        } else if grid.is_wall(candidate) && grid.is_wall(far) {
            grid.set_wall(candidate, false);
            grid.set_wall(far, false);
            opened += 2;

            frontier.extend(
                grid.neighbours(far)
                    .filter(|(_, c)| grid.is_wall(*c))
                    .map(|(d, c)| (c, d)),
            );
        }
    }

    tracing::debug!(width, height, %start, opened, "maze generated");
    Ok(grid)
}
