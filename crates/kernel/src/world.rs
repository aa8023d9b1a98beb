use std::collections::BTreeMap;

use rand::Rng;
use rand::rngs::StdRng;
use reindeer_common::{Cell, Dir, PlayerId};
use serde::{Deserialize, Serialize};

use crate::WorldError;
use crate::view::MazeView;

/// A participant in the maze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Cell,
}

/// The authoritative maze world.
///
/// Owns the immutable grid and present (through [`MazeView`]) and the live
/// player set. Plain single-threaded state: concurrent access goes through
/// [`crate::WorldHandle`], which owns one `World` and applies commands to it
/// one at a time.
///
/// Players are kept in a BTreeMap keyed by monotonically issued handles, so
/// listings come out in join order and a removed handle is never reissued.
#[derive(Debug)]
pub struct World {
    view: MazeView,
    players: BTreeMap<PlayerId, Player>,
    next_id: u64,
    /// Seeded once; drives both maze carving and spawn placement.
    rng: StdRng,
}

impl World {
    /// Wrap an existing grid + present.
    pub fn new(view: MazeView, rng: StdRng) -> Self {
        Self {
            view,
            players: BTreeMap::new(),
            next_id: 0,
            rng,
        }
    }

    /// Carve a fresh `width` x `height` maze with the present at its centre.
    pub fn generate(width: u32, height: u32, mut rng: StdRng) -> Result<Self, WorldError> {
        let goal = Cell::new((width / 2) as i32, (height / 2) as i32);
        let grid = reindeer_maze::generate(width, height, goal, &mut rng)?;
        let view = MazeView::new(grid, goal)?;
        tracing::info!(width, height, %goal, open = view.grid().open_count(), "world created");
        Ok(Self::new(view, rng))
    }

    /// Shared read-only grid and present.
    pub fn view(&self) -> &MazeView {
        &self.view
    }

    /// Number of live players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The live player with this handle, if any.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Current cell of a live player.
    pub fn position(&self, id: PlayerId) -> Option<Cell> {
        self.players.get(&id).map(|p| p.position)
    }

    /// Independent copy of every live player, in join order.
    pub fn players(&self) -> Vec<Player> {
        self.players.values().cloned().collect()
    }

    /// Register a player on a uniformly random open cell.
    pub fn add_player(&mut self, name: impl Into<String>) -> PlayerId {
        let cell = self.random_open_cell();
        self.insert(name.into(), cell)
    }

    /// Register a player on a chosen cell. `None` if the cell is not open.
    pub fn add_player_at(&mut self, name: impl Into<String>, cell: Cell) -> Option<PlayerId> {
        self.view
            .grid()
            .is_open(cell)
            .then(|| self.insert(name.into(), cell))
    }

    fn insert(&mut self, name: String, position: Cell) -> PlayerId {
        let id = PlayerId(self.next_id);
        self.next_id += 1;
        tracing::debug!(%id, %name, %position, "player added");
        self.players.insert(id, Player { id, name, position });
        id
    }

    /// Rejection sampling: draw cells until one is open. Terminates because
    /// the present is always open.
    fn random_open_cell(&mut self) -> Cell {
        let grid = self.view.grid();
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        loop {
            let cell = Cell::new(
                self.rng.gen_range(0..width),
                self.rng.gen_range(0..height),
            );
            if grid.is_open(cell) {
                return cell;
            }
        }
    }

    /// Deregister a player. Unknown or already removed handles are ignored.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let removed = self.players.remove(&id);
        if removed.is_none() {
            tracing::debug!(%id, "remove of unknown player ignored");
        }
        removed
    }

    /// Step a player one cell in `dir` if the destination is open.
    ///
    /// Returns whether the player moved. Unknown handles never move.
    pub fn move_player(&mut self, id: PlayerId, dir: Dir) -> bool {
        let Some(player) = self.players.get_mut(&id) else {
            return false;
        };
        let dest = dir.step(player.position);
        if self.view.grid().is_open(dest) {
            player.position = dest;
            true
        } else {
            false
        }
    }
}
