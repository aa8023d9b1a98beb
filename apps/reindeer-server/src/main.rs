use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use reindeer_kernel::{World, WorldHandle};
use tokio::net::TcpListener;
use tracing::{Instrument, info, warn};
use tracing_subscriber::EnvFilter;

mod console;
mod http;
mod session;

#[derive(Parser)]
#[command(name = "reindeer-maze", about = "Shared maze server for reindeer teams")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the game server, the HTTP viewer and the operator console
    Serve(ServeArgs),
    /// Generate a maze, print it and exit
    Render {
        #[command(flatten)]
        maze: MazeArgs,
    },
}

#[derive(Args)]
struct MazeArgs {
    /// Maze width in cells
    #[arg(long, default_value = "50")]
    width: u32,
    /// Maze height in cells
    #[arg(long, default_value = "50")]
    height: u32,
    /// RNG seed; drawn from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,
}

impl MazeArgs {
    /// The one RNG for this process: carves the maze, then places players.
    fn build(&self) -> anyhow::Result<World> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        World::generate(self.width, self.height, rng)
            .with_context(|| format!("generating {}x{} maze", self.width, self.height))
    }
}

#[derive(Args)]
struct ServeArgs {
    #[command(flatten)]
    maze: MazeArgs,
    /// Address for team connections
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
    /// Address for the HTTP viewer
    #[arg(long, default_value = "127.0.0.1:3001")]
    http_bind: SocketAddr,
    /// Minimum time between two commands from one team
    #[arg(long, default_value = "100")]
    move_delay_ms: u64,
    /// Directory holding index.html and reindeer.js, relative to the working directory
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
    /// Do not read operator commands from stdin
    #[arg(long)]
    no_console: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Render { maze } => {
            let world = maze.build()?;
            print!("{}", console::render_maze(world.view()));
            Ok(())
        }
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    info!("starting up");

    let world = WorldHandle::spawn(args.maze.build()?);

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding game port {}", args.bind))?;
    let http_listener = TcpListener::bind(args.http_bind)
        .await
        .with_context(|| format!("binding http port {}", args.http_bind))?;

    let app = http::router(world.clone(), &args.static_dir);
    tokio::spawn(async move {
        if let Err(err) = axum::serve(http_listener, app).await {
            warn!(%err, "http server stopped");
        }
    });
    info!(addr = %args.http_bind, static_dir = %args.static_dir.display(), "viewer listening");

    if !args.no_console {
        tokio::spawn(console::run(world.clone()));
    }

    let move_delay = Duration::from_millis(args.move_delay_ms);
    info!(addr = %args.bind, ?move_delay, "listening for teams");

    loop {
        let (stream, peer) = listener.accept().await.context("accepting connection")?;
        let world = world.clone();
        tokio::spawn(
            async move {
                if let Err(err) = session::run(stream, world, move_delay).await {
                    warn!("session ended with error: {err:#}");
                }
            }
            .instrument(tracing::info_span!("session", %peer)),
        );
    }
}
