//! The single ordering point for all player access.
//!
//! A [`WorldHandle`] owns nothing but a command sender and a [`MazeView`].
//! The [`World`] itself lives inside one tokio task that drains an unbounded
//! command queue and applies each command to completion before taking the
//! next, answering over a oneshot channel. Every operation is therefore
//! atomic with respect to every other one, and a command that has been sent
//! is always applied even if the caller stops waiting for the reply.

use reindeer_common::{Cell, Dir, PlayerId};
use tokio::sync::{mpsc, oneshot};

use crate::WorldError;
use crate::sensor::Compass;
use crate::view::MazeView;
use crate::world::{Player, World};

enum Command {
    AddPlayer {
        name: String,
        reply: oneshot::Sender<PlayerId>,
    },
    RemovePlayer {
        id: PlayerId,
        reply: oneshot::Sender<bool>,
    },
    MovePlayer {
        id: PlayerId,
        dir: Dir,
        reply: oneshot::Sender<bool>,
    },
    Position {
        id: PlayerId,
        reply: oneshot::Sender<Option<Cell>>,
    },
    ListPlayers {
        reply: oneshot::Sender<Vec<Player>>,
    },
}

/// Cloneable handle to a world running in its own task.
#[derive(Debug, Clone)]
pub struct WorldHandle {
    tx: mpsc::UnboundedSender<Command>,
    view: MazeView,
}

impl WorldHandle {
    /// Move `world` into a new task on the current tokio runtime.
    ///
    /// The task stops once every handle has been dropped.
    pub fn spawn(world: World) -> Self {
        let view = world.view().clone();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(world, rx));
        Self { tx, view }
    }

    /// Grid and present. Immutable, so reading them needs no round trip.
    pub fn view(&self) -> &MazeView {
        &self.view
    }

    pub async fn add_player(&self, name: impl Into<String>) -> Result<PlayerId, WorldError> {
        let name = name.into();
        self.request(|reply| Command::AddPlayer { name, reply }).await
    }

    /// Returns `false` if the player was not registered.
    pub async fn remove_player(&self, id: PlayerId) -> Result<bool, WorldError> {
        self.request(|reply| Command::RemovePlayer { id, reply })
            .await
    }

    /// Returns whether the player moved. Blocked moves and unknown players
    /// leave the world untouched.
    pub async fn move_player(&self, id: PlayerId, dir: Dir) -> Result<bool, WorldError> {
        self.request(|reply| Command::MovePlayer { id, dir, reply })
            .await
    }

    pub async fn position(&self, id: PlayerId) -> Result<Option<Cell>, WorldError> {
        self.request(|reply| Command::Position { id, reply }).await
    }

    /// Snapshot of all live players taken at a single point in the order.
    pub async fn list_players(&self) -> Result<Vec<Player>, WorldError> {
        self.request(|reply| Command::ListPlayers { reply }).await
    }

    /// Sensor reading at the player's current position. `None` for unknown
    /// players.
    pub async fn compass(&self, id: PlayerId) -> Result<Option<Compass>, WorldError> {
        let position = self.position(id).await?;
        Ok(position.map(|p| self.view.compass(p)))
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, WorldError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(command(reply))
            .map_err(|_| WorldError::Closed)?;
        rx.await.map_err(|_| WorldError::Closed)
    }
}

async fn run(mut world: World, mut rx: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = rx.recv().await {
        apply(&mut world, command);
    }
    tracing::info!(players = world.player_count(), "world task stopped");
}

// A dropped reply receiver only means the caller stopped waiting; the
// command has still been applied.
fn apply(world: &mut World, command: Command) {
    match command {
        Command::AddPlayer { name, reply } => {
            let _ = reply.send(world.add_player(name));
        }
        Command::RemovePlayer { id, reply } => {
            let _ = reply.send(world.remove_player(id).is_some());
        }
        Command::MovePlayer { id, dir, reply } => {
            let _ = reply.send(world.move_player(id, dir));
        }
        Command::Position { id, reply } => {
            let _ = reply.send(world.position(id));
        }
        Command::ListPlayers { reply } => {
            let _ = reply.send(world.players());
        }
    }
}
