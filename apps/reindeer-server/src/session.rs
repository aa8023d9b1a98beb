//! One team's connection: a name line, then one direction per line, each
//! answered with a compass line.

use std::io;
use std::time::Duration;

use anyhow::Context;
use reindeer_common::{Dir, PlayerId};
use reindeer_kernel::WorldHandle;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const WELCOME: &str = "Welcome to the reindeer maze! What is your team name?\n";
pub const BAD_COMMAND: &str = "Bad command, please try again\n";

/// Longest line accepted from a team, terminator excluded.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// One newline-terminated line from the peer.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    /// Raw bytes with the `\n` and at most one `\r` before it removed.
    Text(Vec<u8>),
    /// Longer than [`MAX_LINE_LEN`]; its bytes were dropped.
    TooLong,
}

/// Splits a byte stream into lines without assuming UTF-8 and without
/// buffering more than [`MAX_LINE_LEN`] bytes of any one line.
struct LineReader<R> {
    inner: BufReader<R>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
        }
    }

    /// Next line, or `None` once the peer has closed its side.
    async fn next_line(&mut self) -> io::Result<Option<Line>> {
        let mut buf = Vec::new();
        let read = (&mut self.inner)
            .take(MAX_LINE_LEN as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if read == 0 {
            return Ok(None);
        }

        let terminated = buf.last() == Some(&b'\n');
        if terminated {
            buf.pop();
        } else if buf.len() > MAX_LINE_LEN {
            self.discard_rest_of_line().await?;
            return Ok(Some(Line::TooLong));
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        Ok(Some(Line::Text(buf)))
    }

    async fn discard_rest_of_line(&mut self) -> io::Result<()> {
        loop {
            let (newline, len) = {
                let chunk = self.inner.fill_buf().await?;
                (chunk.iter().position(|&b| b == b'\n'), chunk.len())
            };
            match newline {
                Some(at) => {
                    self.inner.consume(at + 1);
                    return Ok(());
                }
                None if len == 0 => return Ok(()),
                None => self.inner.consume(len),
            }
        }
    }
}

/// Drive a session until the peer hangs up.
///
/// The player is removed exactly once after it has joined, whether the
/// session ends cleanly or with an I/O error.
pub async fn run<S>(stream: S, world: WorldHandle, move_delay: Duration) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut lines = LineReader::new(reader);

    writer.write_all(WELCOME.as_bytes()).await?;
    let name = match lines.next_line().await? {
        Some(Line::Text(raw)) => String::from_utf8_lossy(&raw).into_owned(),
        Some(Line::TooLong) => {
            warn!("team name too long, closing");
            return Ok(());
        }
        None => {
            debug!("closed before naming a team");
            return Ok(());
        }
    };

    let id = world.add_player(name.clone()).await?;
    info!(%name, %id, "joined");

    let played = play(&mut lines, &mut writer, &world, id, &name, move_delay).await;
    world.remove_player(id).await?;
    info!(%name, "disconnected");
    played
}

/// A direction, if the line spells one.
fn parse_command(line: &Line) -> Option<Dir> {
    let Line::Text(raw) = line else {
        debug!("rejected overlong command");
        return None;
    };
    let text = match std::str::from_utf8(raw) {
        Ok(text) => text,
        Err(err) => {
            debug!(%err, "rejected command");
            return None;
        }
    };
    text.parse::<Dir>()
        .inspect_err(|err| debug!(%err, "rejected command"))
        .ok()
}

async fn play<R, W>(
    lines: &mut LineReader<R>,
    writer: &mut W,
    world: &WorldHandle,
    id: PlayerId,
    name: &str,
    move_delay: Duration,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    send_compass(writer, world, id, name).await?;

    let mut last_command = Instant::now();
    while let Some(line) = lines.next_line().await? {
        tokio::time::sleep(move_delay.saturating_sub(last_command.elapsed())).await;
        last_command = Instant::now();

        let Some(dir) = parse_command(&line) else {
            writer.write_all(BAD_COMMAND.as_bytes()).await?;
            continue;
        };
        let moved = world.move_player(id, dir).await?;
        debug!(%dir, moved, "move");

        send_compass(writer, world, id, name).await?;
    }
    Ok(())
}

async fn send_compass<W>(
    writer: &mut W,
    world: &WorldHandle,
    id: PlayerId,
    name: &str,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let compass = world
        .compass(id)
        .await?
        .with_context(|| format!("player {id} is no longer registered"))?;
    if compass.on_goal() {
        info!(%name, "found the present");
    }
    writer.write_all(format!("{compass}\n").as_bytes()).await?;
    Ok(())
}
