//! JSON shapes handed to external renderers.

use serde::{Deserialize, Serialize};

use crate::view::MazeView;
use crate::world::Player;

/// Everything needed to draw the maze without re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeExport {
    pub width: u32,
    pub height: u32,
    pub present_x: i32,
    pub present_y: i32,
    /// `[x, y]` of every wall cell.
    pub walls: Vec<[i32; 2]>,
}

impl MazeExport {
    pub fn from_view(view: &MazeView) -> Self {
        let grid = view.grid();
        Self {
            width: grid.width(),
            height: grid.height(),
            present_x: view.goal().x,
            present_y: view.goal().y,
            walls: grid.wall_cells().map(|c| c.to_array()).collect(),
        }
    }
}

/// Public part of a player: no handle, just name and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerExport {
    pub name: String,
    pub x: i32,
    pub y: i32,
}

impl From<&Player> for PlayerExport {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            x: player.position.x,
            y: player.position.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reindeer_common::{Cell, PlayerId};
    use reindeer_maze::Grid;

    #[test]
    fn maze_export_json_shape() {
        let grid = Grid::from_walls(3, 2, [Cell::new(0, 1), Cell::new(2, 0)]).unwrap();
        let view = MazeView::new(grid, Cell::new(1, 1)).unwrap();
        let json = serde_json::to_value(view.export()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "width": 3,
                "height": 2,
                "presentX": 1,
                "presentY": 1,
                "walls": [[0, 1], [2, 0]],
            })
        );
    }

    #[test]
    fn player_export_drops_the_handle() {
        let player = Player {
            id: PlayerId(9),
            name: "Dasher".into(),
            position: Cell::new(4, 7),
        };
        let json = serde_json::to_value(PlayerExport::from(&player)).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Dasher", "x": 4, "y": 7}));
    }
}
