//! Operator console on stdin: `maze`, `players` and `show`.

use std::collections::HashSet;
use std::fmt::Write as _;

use reindeer_common::Cell;
use reindeer_kernel::{MazeView, Player, WorldError, WorldHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Read commands until stdin closes. Output goes to stderr so it does not
/// mix with anything piped from stdout.
pub async fn run(world: WorldHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match execute(line.trim(), &world).await {
                Ok(Some(output)) => eprint!("{output}"),
                Ok(None) => debug!(command = %line.trim(), "unknown console command"),
                Err(err) => warn!(%err, "console command failed"),
            },
            Ok(None) => break,
            Err(err) => {
                warn!(%err, "reading console input failed");
                break;
            }
        }
    }
    debug!("console closed");
}

/// Text produced by one console command, or `None` if it is not a command.
async fn execute(command: &str, world: &WorldHandle) -> Result<Option<String>, WorldError> {
    let output = match command {
        "maze" => render_maze(world.view()),
        "players" => render_player_list(&world.list_players().await?),
        "show" => render_board(world.view(), &world.list_players().await?),
        _ => return Ok(None),
    };
    Ok(Some(output))
}

/// Two characters per cell, north at the top, the present drawn as `PP`.
pub fn render_maze(view: &MazeView) -> String {
    let grid = view.grid();
    let mut out = String::new();
    for y in (0..grid.height() as i32).rev() {
        for x in 0..grid.width() as i32 {
            let cell = Cell::new(x, y);
            out.push_str(if cell == view.goal() {
                "PP"
            } else if grid.is_wall(cell) {
                "██"
            } else {
                "  "
            });
        }
        out.push('\n');
    }
    out
}

/// One `name @ x, y` line per player under a `Players:` header.
pub fn render_player_list(players: &[Player]) -> String {
    let mut out = String::from("Players:\n");
    for p in players {
        let _ = writeln!(out, "  {} @ {}, {}", p.name, p.position.x, p.position.y);
    }
    out
}

/// Maze with walls drawn as connected box lines, players as `▒▒` and the
/// present as `◆◆`.
pub fn render_board(view: &MazeView, players: &[Player]) -> String {
    let grid = view.grid();
    let occupied: HashSet<Cell> = players.iter().map(|p| p.position).collect();
    // The edge of the grid counts as wall so the border joins up.
    let solid = |c: Cell| !grid.in_bounds(c) || grid.is_wall(c);

    let mut out = String::new();
    for y in (0..grid.height() as i32).rev() {
        for x in 0..grid.width() as i32 {
            let cell = Cell::new(x, y);
            let glyph = if occupied.contains(&cell) {
                "▒▒"
            } else if grid.is_wall(cell) {
                wall_glyph(
                    solid(cell + Cell::Y),
                    solid(cell + Cell::X),
                    solid(cell - Cell::Y),
                    solid(cell - Cell::X),
                )
            } else if cell == view.goal() {
                "◆◆"
            } else {
                "  "
            };
            out.push_str(glyph);
        }
        out.push('\n');
    }
    out
}

/// Pick the two box-drawing characters for a wall cell from which of its
/// north, east, south and west neighbours are also solid.
fn wall_glyph(n: bool, e: bool, s: bool, w: bool) -> &'static str {
    match (n, e, s, w) {
        (false, false, false, false) => "··",
        (true, true, true, true) => "┼┼",
        (true, false, false, false) => "└┘",
        (false, false, true, false) => "┌┐",
        (true, false, true, false) => "││",
        (false, _, false, _) => "──",
        (true, true, false, false) => "└┴",
        (false, true, true, false) => "┌┬",
        (false, false, true, true) => "┬┐",
        (true, false, false, true) => "┴┘",
        (true, true, true, false) => "├┼",
        (false, true, true, true) => "┬┬",
        (true, false, true, true) => "┼┤",
        (true, true, false, true) => "┴┴",
    }
}
