//! Unix-socket control interface.
//!
//! Lets scripts trigger the reveal in a running instance:
//! `triveal --ctl "play GOOD MORNING"`. One line per connection, one reply.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Commands sent from the IPC server to the render loop.
pub enum IpcCommand {
    /// Start (or restart) the reveal, optionally with a new message.
    Play {
        text: Option<String>,
        reply: oneshot::Sender<String>,
    },
    /// Re-run the reveal with the current message.
    Replay { reply: oneshot::Sender<String> },
    Status { reply: oneshot::Sender<String> },
    Ping { reply: oneshot::Sender<String> },
    Quit { reply: oneshot::Sender<String> },
}

/// Get the socket path for IPC
pub fn socket_path() -> PathBuf {
    if let Ok(dir) = std::env::var("XDG_RUNTIME_DIR") {
        PathBuf::from(dir).join("triveal.sock")
    } else {
        PathBuf::from("/tmp/triveal.sock")
    }
}

/// Parse a protocol line into an IpcCommand
fn parse_command(line: &str, reply: oneshot::Sender<String>) -> Result<IpcCommand> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("play") => {
            let rest = parts.collect::<Vec<_>>().join(" ");
            let text = if rest.is_empty() { None } else { Some(rest) };
            Ok(IpcCommand::Play { text, reply })
        }
        Some("replay") => Ok(IpcCommand::Replay { reply }),
        Some("status") => Ok(IpcCommand::Status { reply }),
        Some("ping") => Ok(IpcCommand::Ping { reply }),
        Some("quit") => Ok(IpcCommand::Quit { reply }),
        _ => Err(anyhow::anyhow!("Unknown command: {}", line)),
    }
}

/// Handle a single client connection
async fn handle_client(stream: UnixStream, cmd_tx: mpsc::Sender<IpcCommand>) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut buf_reader = BufReader::new(reader);
    let mut line = String::new();
    buf_reader.read_line(&mut line).await?;
    let line = line.trim();

    if line.is_empty() {
        return Ok(());
    }

    let (reply_tx, reply_rx) = oneshot::channel();

    let command = match parse_command(line, reply_tx) {
        Ok(cmd) => cmd,
        Err(e) => {
            writer.write_all(format!("err: {}\n", e).as_bytes()).await?;
            return Ok(());
        }
    };

    cmd_tx
        .send(command)
        .await
        .map_err(|_| anyhow::anyhow!("Render loop has shut down"))?;

    let response = reply_rx
        .await
        .unwrap_or_else(|_| "err: internal error".to_string());

    writer
        .write_all(format!("{}\n", response).as_bytes())
        .await?;
    Ok(())
}

/// Start the IPC server, listening for commands on a Unix socket
pub async fn start_server(cmd_tx: mpsc::Sender<IpcCommand>) -> Result<()> {
    let path = socket_path();

    // Remove stale socket from previous run
    let _ = std::fs::remove_file(&path);

    let listener = UnixListener::bind(&path).context("Failed to bind IPC socket")?;

    info!("IPC server listening on {}", path.display());

    loop {
        let (stream, _) = listener.accept().await?;
        let cmd_tx = cmd_tx.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, cmd_tx).await {
                debug!("IPC client error: {}", e);
            }
        });
    }
}

/// Send a command to a running triveal instance (client mode)
pub async fn send_command(line: &str) -> Result<String> {
    let path = socket_path();

    let stream = tokio::time::timeout(
        std::time::Duration::from_secs(2),
        UnixStream::connect(&path),
    )
    .await
    .context("Connection timed out")?
    .context("Could not connect to triveal. Is it running?")?;

    let (reader, mut writer) = stream.into_split();

    writer.write_all(format!("{}\n", line).as_bytes()).await?;
    writer.shutdown().await?;

    let mut buf_reader = BufReader::new(reader);
    let mut response = String::new();

    tokio::time::timeout(
        std::time::Duration::from_secs(2),
        buf_reader.read_line(&mut response),
    )
    .await
    .context("Response timed out")?
    .context("Failed to read response")?;

    Ok(response.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<IpcCommand> {
        let (tx, _rx) = oneshot::channel();
        parse_command(line, tx)
    }

    #[test]
    fn play_carries_the_rest_of_the_line_as_text() {
        match parse("play GOOD MORNING").unwrap() {
            IpcCommand::Play { text, .. } => assert_eq!(text.as_deref(), Some("GOOD MORNING")),
            _ => panic!("expected play"),
        }
        match parse("play").unwrap() {
            IpcCommand::Play { text, .. } => assert!(text.is_none()),
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn bare_commands_parse() {
        assert!(matches!(parse("replay").unwrap(), IpcCommand::Replay { .. }));
        assert!(matches!(parse("status").unwrap(), IpcCommand::Status { .. }));
        assert!(matches!(parse("ping").unwrap(), IpcCommand::Ping { .. }));
        assert!(matches!(parse("quit").unwrap(), IpcCommand::Quit { .. }));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("fandango").is_err());
    }
}
