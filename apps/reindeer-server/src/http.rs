//! HTTP viewer: maze and player JSON plus the static page that draws them.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use reindeer_kernel::{MazeExport, PlayerExport, WorldHandle};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

#[derive(Clone)]
struct AppState {
    world: WorldHandle,
    /// The grid never changes, so its export is built once.
    maze: Arc<MazeExport>,
}

/// `/maze` and `/players` as JSON, everything else from `static_dir`.
pub fn router(world: WorldHandle, static_dir: &Path) -> Router {
    let maze = Arc::new(world.view().export());
    Router::new()
        .route("/maze", get(maze_json))
        .route("/players", get(players_json))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { world, maze })
}

async fn maze_json(State(state): State<AppState>) -> Json<MazeExport> {
    Json(MazeExport::clone(&state.maze))
}

async fn players_json(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerExport>>, StatusCode> {
    let players = state.world.list_players().await.map_err(|err| {
        warn!(%err, "listing players failed");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok(Json(players.iter().map(PlayerExport::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use reindeer_common::Cell;
    use reindeer_kernel::{MazeView, World};
    use reindeer_maze::Grid;
    use tower::ServiceExt;

    fn small_world() -> WorldHandle {
        let grid = Grid::from_walls(3, 3, [Cell::new(0, 0), Cell::new(2, 1)]).unwrap();
        let view = MazeView::new(grid, Cell::new(1, 1)).unwrap();
        let mut world = World::new(view, StdRng::seed_from_u64(0));
        world.add_player_at("Dasher", Cell::new(0, 2)).unwrap();
        world.add_player_at("Dancer", Cell::new(1, 1)).unwrap();
        WorldHandle::spawn(world)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn maze_endpoint() {
        let app = router(small_world(), Path::new("does-not-exist"));
        let (status, json) = get_json(app, "/maze").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "width": 3,
                "height": 3,
                "presentX": 1,
                "presentY": 1,
                "walls": [[0, 0], [2, 1]],
            })
        );
    }

    #[tokio::test]
    async fn players_endpoint() {
        let app = router(small_world(), Path::new("does-not-exist"));
        let (status, json) = get_json(app, "/players").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "Dasher", "x": 0, "y": 2},
                {"name": "Dancer", "x": 1, "y": 1},
            ])
        );
    }

    #[tokio::test]
    async fn static_files_are_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>maze</h1>").unwrap();

        let app = router(small_world(), dir.path());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"<h1>maze</h1>");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(small_world(), dir.path());
        let response = app
            .oneshot(Request::builder().uri("/nope.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
