use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

use crate::events::Event;

/// Parse one line typed by the user.
///
/// | Input              | Event                  |
/// |--------------------|------------------------|
/// | `start` or empty   | Start                  |
/// | `turn <n>`         | Turn { Some(n) }       |
/// | `turn none`        | Turn { None }          |
/// | `quit` / `exit`    | Shutdown               |
pub fn parse_command(line: &str) -> Option<Event> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or("start").to_ascii_lowercase();

    match cmd.as_str() {
        "start" | "s" => Some(Event::Start),
        "quit" | "exit" | "q" => Some(Event::Shutdown),
        "turn" => match parts.next()? {
            "none" | "-" => Some(Event::Turn { turn: None }),
            n => n.parse().ok().map(|turn| Event::Turn { turn: Some(turn) }),
        },
        _ => None,
    }
}

/// Spawns a task that reads commands from stdin. Closing stdin shuts down.
pub fn spawn_stdin(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_command(&line) {
                    Some(event) => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    None => warn!(target: "input", "unknown command: {}", line.trim()),
                },
                Ok(None) => {
                    let _ = tx.send(Event::Shutdown).await;
                    break;
                }
                Err(e) => {
                    warn!(target: "input", "stdin error: {}", e);
                    break;
                }
            }
        }
    });
}
